//! Paice/Husk ("Lancaster") stemmer.
//!
//! Rules are written with the ending reversed, e.g. `"gni3>"` removes three
//! letters from words ending in "ing" and keeps stemming. A `*` marks rules
//! that only fire on a word no rule has touched yet; `.` stops stemming.

use std::sync::OnceLock;

const RULE_TABLE: &[&str] = &[
    "ai*2.", "a*1.", "bb1.", "city3s.", "ci2>", "cn1t>", "dd1.", "dei3y>", "deec2ss.", "dee1.",
    "de2>", "dooh4>", "e1>", "feil1v.", "fi2>", "gni3>", "gai3y.", "ga2>", "gg1.", "ht*2.",
    "hsiug5ct.", "hsi3>", "i*1.", "i1y>", "ji1d.", "juf1s.", "ju1d.", "jo1d.", "jeh1r.",
    "jrev1t.", "jsim2t.", "jn1d.", "j1s.", "lbaifi6.", "lbai4y.", "lba3>", "lbi3.", "lib2l>",
    "lc1.", "lufi4y.", "luf3>", "lu2.", "lai3>", "lau3>", "la2>", "ll1.", "mui3.", "mu*2.",
    "msi3>", "mm1.", "nois4j>", "noix4ct.", "noi3>", "nai3>", "na2>", "nee0.", "ne2>", "nn1.",
    "pihs4>", "pp1.", "re2>", "rae0.", "ra2.", "ro2>", "ru2>", "rr1.", "rt1>", "rei3y>",
    "sei3y>", "sis2.", "si2>", "ssen4>", "ss0.", "suo3>", "su*2.", "s*1>", "s0.", "tacilp4y.",
    "ta2>", "tnem4>", "tne3>", "tna3>", "tpir2b.", "tpro2b.", "tcud1.", "tpmus2.", "tpec2iv.",
    "tulo2v.", "tsis0.", "tsi3>", "tt1.", "uqi3.", "ugo1.", "vis3j>", "vie0.", "vi2>", "ylb1>",
    "yli3y>", "ylp0.", "yl2>", "ygo1.", "yhp1.", "ymo1.", "ypo1.", "yti3>", "yte3>", "ytl2.",
    "yrtsi5.", "yra3>", "yro3>", "yfi3.", "ycn2t>", "yca3>", "zi2>", "zy1s.",
];

#[derive(Debug)]
struct Rule {
    /// Ending in normal (not reversed) order.
    ending: Vec<char>,
    intact_only: bool,
    remove: usize,
    append: Vec<char>,
    proceed: bool,
}

fn parse_rule(text: &str) -> Option<Rule> {
    let mut chars = text.chars().peekable();
    let mut reversed = Vec::new();
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_lowercase() {
            break;
        }
        reversed.push(c);
        chars.next();
    }
    let intact_only = chars.next_if_eq(&'*').is_some();
    let remove = chars.next()?.to_digit(10)? as usize;
    let mut append = Vec::new();
    while let Some(c) = chars.next_if(char::is_ascii_lowercase) {
        append.push(c);
    }
    let proceed = match chars.next() {
        Some('>') => true,
        Some('.') | None => false,
        Some(_) => return None,
    };
    reversed.reverse();
    Some(Rule {
        ending: reversed,
        intact_only,
        remove,
        append,
        proceed,
    })
}

fn rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| RULE_TABLE.iter().filter_map(|text| parse_rule(text)).collect())
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

/// A stem must keep two letters when it starts with a vowel, or three
/// letters including a vowel in the first three when it starts with a
/// consonant.
fn is_acceptable(word: &[char], remove: usize) -> bool {
    let Some(&first) = word.first() else {
        return false;
    };
    let remaining = word.len().saturating_sub(remove);
    if is_vowel(first) {
        remaining >= 2
    } else {
        remaining >= 3 && (is_vowel(word[1]) || is_vowel(word[2]))
    }
}

/// Stem a single lowercase word.
pub fn stem(word: &str) -> String {
    let mut current: Vec<char> = word.to_lowercase().chars().collect();
    let intact = current.clone();

    'outer: loop {
        let Some(&last) = current.last() else {
            break;
        };

        for rule in rules().iter().filter(|r| r.ending.last() == Some(&last)) {
            if !current.ends_with(&rule.ending) {
                continue;
            }
            if rule.intact_only && current != intact {
                continue;
            }
            if !is_acceptable(&current, rule.remove) {
                continue;
            }
            current.truncate(current.len() - rule.remove);
            current.extend_from_slice(&rule.append);
            if rule.proceed {
                continue 'outer;
            }
            break 'outer;
        }
        break;
    }

    current.into_iter().collect()
}
