//! Cleaning of raw skill strings.

use crate::types::{FeatureProfiles, SkillProfiles};

/// Decorative and punctuation characters removed from every skill string.
const REMOVED_CHARS: &[char] = &[
    '\u{2022}', '●', '"', '\'', '“', '”', '♡', '-', '_', '.', ',', ':', ';', '⁃',
];

/// Clean one raw skill string.
///
/// Removes bullets, quotes, dashes, underscores and terminal punctuation,
/// optionally drops trailing standalone numbers (`"Python 3"` -> `"Python"`),
/// and trims surrounding whitespace.
pub fn clean_one(raw: &str, remove_numbers: bool) -> String {
    let mut cleaned: String = raw.chars().filter(|c| !REMOVED_CHARS.contains(c)).collect();

    if remove_numbers {
        strip_trailing_numbers(&mut cleaned);
    }

    cleaned.trim().to_string()
}

fn strip_trailing_numbers(text: &mut String) {
    loop {
        let trimmed_len = text.trim_end().len();
        text.truncate(trimmed_len);

        let start = text
            .rfind(char::is_whitespace)
            .map(|idx| idx + text[idx..].chars().next().map_or(1, char::len_utf8))
            .unwrap_or(0);
        let last = &text[start..];

        if last.is_empty() || !last.chars().all(|c| c.is_ascii_digit()) {
            return;
        }
        text.truncate(start);
    }
}

/// Clean every skill of every employee.
///
/// Employees whose skill list is `None` are dropped; they contribute no rows.
pub fn clean_profiles(
    profiles: &SkillProfiles,
    remove_numbers: bool,
) -> FeatureProfiles {
    profiles
        .iter()
        .filter_map(|(id, skills)| {
            skills.as_ref().map(|skills| {
                let cleaned = skills
                    .iter()
                    .map(|s| clean_one(s, remove_numbers))
                    .collect();
                (*id, cleaned)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_terminal_punctuation() {
        assert_eq!(clean_one("Project Management.", false), "Project Management");
        assert_eq!(clean_one("  “Leadership”; ", false), "Leadership");
    }

    #[test]
    fn test_strips_bullets_and_dashes() {
        assert_eq!(clean_one("• front-end", false), "frontend");
        assert_eq!(clean_one("● node.js", false), "nodejs");
        assert_eq!(clean_one("⁃ unit_testing", false), "unittesting");
    }

    #[test]
    fn test_keeps_other_symbols() {
        assert_eq!(clean_one("c++", false), "c++");
        assert_eq!(clean_one("C#", false), "C#");
    }

    #[test]
    fn test_remove_numbers_only_when_enabled() {
        assert_eq!(clean_one("Python 3", false), "Python 3");
        assert_eq!(clean_one("Python 3", true), "Python");
        assert_eq!(clean_one("Angular 2 4", true), "Angular");
    }

    #[test]
    fn test_remove_numbers_keeps_embedded_digits() {
        assert_eq!(clean_one("html5", true), "html5");
        assert_eq!(clean_one("3D modelling", true), "3D modelling");
        assert_eq!(clean_one("Web 2.0", true), "Web");
    }

    #[test]
    fn test_remove_numbers_on_number_only_skill() {
        assert_eq!(clean_one("2020", true), "");
    }

    #[test]
    fn test_clean_profiles_drops_missing_data() {
        let mut profiles = SkillProfiles::new();
        profiles.insert(1, Some(vec!["Rust.".to_string()]));
        profiles.insert(2, None);
        profiles.insert(3, Some(vec![]));

        let cleaned = clean_profiles(&profiles, false);
        assert_eq!(cleaned.len(), 2);
        assert_eq!(cleaned[&1], vec!["Rust".to_string()]);
        assert!(cleaned[&3].is_empty());
        assert!(!cleaned.contains_key(&2));
    }
}

#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Cleaning only removes characters, it never adds any.
        #[test]
        fn clean_never_grows(input in "\\PC*", remove_numbers in any::<bool>()) {
            let cleaned = clean_one(&input, remove_numbers);
            prop_assert!(cleaned.chars().count() <= input.chars().count());
        }

        /// Cleaning is idempotent.
        #[test]
        fn clean_is_idempotent(input in "\\PC*", remove_numbers in any::<bool>()) {
            let once = clean_one(&input, remove_numbers);
            prop_assert_eq!(clean_one(&once, remove_numbers), once.clone());
        }
    }
}
