//! Part-of-speech tagging and noun-phrase chunking for skill phrases.
//!
//! Skill phrases are short ("Agile software development", "HTML/CSS
//! styling"), so a lexicon backed by suffix rules is enough to find the
//! noun-phrase chunks `(Gerund|Adjective)* Noun+`.

/// Coarse part-of-speech tags used by the chunker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// `-ing` verb form used as a modifier ("testing", "programming").
    Gerund,
    /// Adjective ("agile", "technical").
    Adjective,
    /// Noun or proper noun.
    Noun,
    /// Anything that breaks a chunk: function words, verbs, numbers, punctuation.
    Other,
}

impl Tag {
    fn is_modifier(self) -> bool {
        matches!(self, Tag::Gerund | Tag::Adjective)
    }
}

/// Assigns a [`Tag`] to every token of a phrase.
pub trait Tagger: Send + Sync {
    /// Tag the tokens; the result has the same length as `tokens`.
    fn tag(&self, tokens: &[&str]) -> Vec<Tag>;
}

const FUNCTION_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "nor", "but", "of", "at", "in", "on", "for", "with", "to",
    "from", "by", "as", "into", "onto", "over", "under", "via", "per", "about", "i", "we", "you",
    "he", "she", "it", "they", "my", "our", "your", "their", "its", "this", "that", "these",
    "those", "is", "are", "was", "were", "be", "been", "am", "have", "has", "had", "do", "does",
    "did", "can", "could", "will", "would", "should", "may", "might", "must", "not", "no", "some",
    "any", "all", "both", "each", "other", "such", "also", "very", "etc", "eg", "ie", "like",
    "use", "used", "work", "worked", "make", "made", "know", "known",
];

const ADJECTIVES: &[&str] = &[
    "agile", "advanced", "basic", "mobile", "technical", "digital", "social", "financial",
    "professional", "strong", "fluent", "native", "senior", "junior", "new", "modern",
    "responsive", "functional", "relational", "good", "excellent", "fast", "full", "big",
    "small", "large", "high", "low", "deep", "visual", "graphic", "interactive", "creative",
    "analytical", "secure", "scalable", "embedded", "automated", "distributed", "concurrent",
    "parallel", "real", "virtual", "general", "internal", "external", "public", "private",
    "open", "lean", "clean", "statistical", "mathematical", "physical", "electrical",
    "mechanical", "commercial", "legal", "cross", "multiple", "various", "different",
];

const ING_NOUNS: &[&str] = &[
    "string", "spring", "thing", "nothing", "something", "anything", "everything", "morning",
    "evening", "ceiling", "swing", "wing", "king", "ring", "ping", "bing", "sing", "ding",
];

const ADJECTIVE_SUFFIXES: &[&str] = &["ical", "ive", "ous", "ful", "able", "ible", "less"];

/// Lexicon and suffix based tagger for English skill phrases.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexiconTagger;

impl LexiconTagger {
    fn tag_token(token: &str) -> Tag {
        if !token.chars().any(char::is_alphabetic) {
            return Tag::Other;
        }
        let lower = token.to_lowercase();
        let word = lower.as_str();

        if FUNCTION_WORDS.contains(&word) {
            return Tag::Other;
        }
        if ADJECTIVES.contains(&word) {
            return Tag::Adjective;
        }
        if ING_NOUNS.contains(&word) {
            return Tag::Noun;
        }
        if word.len() > 4 && word.ends_with("ing") {
            return Tag::Gerund;
        }
        if word.len() > 3 && word.ends_with("ed") && !word.ends_with("eed") {
            return Tag::Other;
        }
        if word.len() > 3 && word.ends_with("ly") {
            return Tag::Other;
        }
        if word.len() > 5 && ADJECTIVE_SUFFIXES.iter().any(|s| word.ends_with(s)) {
            return Tag::Adjective;
        }
        Tag::Noun
    }
}

impl Tagger for LexiconTagger {
    fn tag(&self, tokens: &[&str]) -> Vec<Tag> {
        tokens.iter().map(|t| Self::tag_token(t)).collect()
    }
}

/// Characters that separate tokens and break chunks.
const SEPARATORS: &[char] = &['/', '(', ')', '&', '|', '!', '?', '[', ']', '{', '}'];

/// Split a phrase into word tokens and single-character separator tokens.
pub fn tokenize(phrase: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    for word in phrase.split_whitespace() {
        let mut start = 0;
        for (idx, c) in word.char_indices() {
            if SEPARATORS.contains(&c) {
                if start < idx {
                    tokens.push(&word[start..idx]);
                }
                tokens.push(&word[idx..idx + c.len_utf8()]);
                start = idx + c.len_utf8();
            }
        }
        if start < word.len() {
            tokens.push(&word[start..]);
        }
    }
    tokens
}

/// Extract `(Gerund|Adjective)* Noun+` chunks, joined with single spaces.
pub fn chunk_noun_phrases(tokens: &[&str], tags: &[Tag]) -> Vec<String> {
    let mut phrases = Vec::new();
    let len = tokens.len().min(tags.len());
    let mut i = 0;

    while i < len {
        let mut j = i;
        while j < len && tags[j].is_modifier() {
            j += 1;
        }
        let mut k = j;
        while k < len && tags[k] == Tag::Noun {
            k += 1;
        }
        if k > j {
            phrases.push(tokens[i..k].join(" "));
            i = k;
        } else {
            i += 1;
        }
    }

    phrases
}

/// Noun phrases of a skill string. Single-word skills pass through unchanged.
pub fn noun_phrases(skill: &str, tagger: &dyn Tagger) -> Vec<String> {
    let words: Vec<&str> = skill.split_whitespace().collect();
    if words.len() == 1 {
        return vec![words[0].to_string()];
    }
    let tokens = tokenize(skill);
    let tags = tagger.tag(&tokens);
    chunk_noun_phrases(&tokens, &tags)
}
