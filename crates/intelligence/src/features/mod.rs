//! Turning raw skill strings into countable skill features.
//!
//! The pipeline is: clean each raw string ([`clean_one`]), split it into
//! surface features with the configured [`FeatureStrategy`], then case-fold
//! and stem every surface feature. The [`SkillKey`] built alongside maps each
//! processed feature back to a display string.

mod lancaster;
mod normalize;
mod stem;
mod tagger;

pub use normalize::{clean_one, clean_profiles};
pub use stem::{FeatureStemmer, PROTECTED_TOKENS};
pub use tagger::{chunk_noun_phrases, noun_phrases, tokenize, LexiconTagger, Tag, Tagger};

use crate::config::{FeatureConfig, FeatureStrategy};
use crate::types::{FeatureProfiles, SkillProfiles};
use std::collections::HashMap;

/// Words dropped by the `word` strategy.
pub const STOP_WORDS: &[&str] = &[
    "a",
    "an",
    "the",
    "i",
    "of",
    "at",
    "in",
    "we",
    "implementation",
    "development",
    "for",
    "with",
];

/// Lookup from processed feature to a representative display string.
///
/// Several surface forms may collapse onto one processed feature (for
/// example when stemming merges "framework" and "frameworks"); the last one
/// seen wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillKey {
    display: HashMap<String, String>,
}

impl SkillKey {
    /// Record the display string for a processed feature.
    pub fn insert(&mut self, feature: impl Into<String>, display: impl Into<String>) {
        self.display.insert(feature.into(), display.into());
    }

    /// Display string for a processed feature, if known.
    pub fn get(&self, feature: &str) -> Option<&str> {
        self.display.get(feature).map(String::as_str)
    }

    /// Display string for a processed feature, falling back to the feature itself.
    pub fn display<'a>(&'a self, feature: &'a str) -> &'a str {
        self.get(feature).unwrap_or(feature)
    }

    /// Number of processed features with a display string.
    pub fn len(&self) -> usize {
        self.display.len()
    }

    /// True when no features were recorded.
    pub fn is_empty(&self) -> bool {
        self.display.is_empty()
    }
}

/// Per-employee features plus the reverse lookup for presentation.
#[derive(Debug, Clone, Default)]
pub struct ExtractedFeatures {
    /// Processed features per employee, in extraction order.
    pub profiles: FeatureProfiles,
    /// Processed feature -> display string.
    pub skill_key: SkillKey,
}

/// Converts cleaned skill lists into processed features.
pub struct SkillExtractor {
    config: FeatureConfig,
    stemmer: FeatureStemmer,
    tagger: Box<dyn Tagger>,
}

impl std::fmt::Debug for SkillExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkillExtractor")
            .field("config", &self.config)
            .field("stemmer", &self.stemmer)
            .finish_non_exhaustive()
    }
}

impl SkillExtractor {
    /// Create an extractor using the built-in [`LexiconTagger`].
    pub fn new(config: &FeatureConfig) -> Self {
        Self {
            config: config.clone(),
            stemmer: FeatureStemmer::new(config.stemmer),
            tagger: Box::new(LexiconTagger),
        }
    }

    /// Replace the part-of-speech tagger used by the `noun` strategy.
    pub fn with_tagger(mut self, tagger: impl Tagger + 'static) -> Self {
        self.tagger = Box::new(tagger);
        self
    }

    /// Clean raw profiles and extract features in one step.
    pub fn extract_raw(&self, raw: &SkillProfiles) -> ExtractedFeatures {
        self.extract(&clean_profiles(raw, self.config.remove_numbers))
    }

    /// Extract features from already-cleaned skill lists.
    pub fn extract(&self, cleaned: &FeatureProfiles) -> ExtractedFeatures {
        let mut skill_key = SkillKey::default();
        let mut profiles = FeatureProfiles::new();

        for (&employee_id, skills) in cleaned {
            let mut features = Vec::new();
            for skill in skills {
                for surface in self.surface_features(skill) {
                    let processed = self.process(&surface);
                    if processed.is_empty() {
                        continue;
                    }
                    skill_key.insert(processed.clone(), surface);
                    features.push(processed);
                }
            }
            profiles.insert(employee_id, features);
        }

        ExtractedFeatures {
            profiles,
            skill_key,
        }
    }

    /// Strategy-specific split of one cleaned skill, keeping original casing.
    fn surface_features(&self, skill: &str) -> Vec<String> {
        match self.config.feature_type {
            FeatureStrategy::Skill => vec![skill.trim().to_string()],
            FeatureStrategy::Word => skill
                .split_whitespace()
                .filter(|w| !STOP_WORDS.contains(&w.to_lowercase().as_str()))
                .map(str::to_string)
                .collect(),
            FeatureStrategy::Noun => noun_phrases(skill, self.tagger.as_ref()),
        }
    }

    /// Case folding and stemming applied uniformly to every strategy.
    fn process(&self, surface: &str) -> String {
        let folded = if self.config.use_lowercase {
            surface.to_lowercase()
        } else {
            surface.to_string()
        };
        self.stemmer.stem_feature(folded.trim()).trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StemmerKind;

    fn profiles(entries: &[(i64, &[&str])]) -> FeatureProfiles {
        entries
            .iter()
            .map(|(id, skills)| (*id, skills.iter().map(|s| s.to_string()).collect()))
            .collect()
    }

    fn config(feature_type: FeatureStrategy) -> FeatureConfig {
        FeatureConfig {
            feature_type,
            ..Default::default()
        }
    }

    #[test]
    fn test_skill_strategy_lowercases() {
        let extractor = SkillExtractor::new(&config(FeatureStrategy::Skill));
        let out = extractor.extract(&profiles(&[(1, &["Project Management", "Rust"])]));
        assert_eq!(out.profiles[&1], vec!["project management", "rust"]);
        assert_eq!(out.skill_key.get("project management"), Some("Project Management"));
    }

    #[test]
    fn test_skill_strategy_keeps_case_when_disabled() {
        let extractor = SkillExtractor::new(&FeatureConfig {
            use_lowercase: false,
            ..config(FeatureStrategy::Skill)
        });
        let out = extractor.extract(&profiles(&[(1, &["Rust"])]));
        assert_eq!(out.profiles[&1], vec!["Rust"]);
    }

    #[test]
    fn test_word_strategy_drops_stop_words() {
        let extractor = SkillExtractor::new(&config(FeatureStrategy::Word));
        let out = extractor.extract(&profiles(&[(
            7,
            &["Implementation of the Web Application", "Game development"],
        )]));
        assert_eq!(out.profiles[&7], vec!["web", "application", "game"]);
        assert_eq!(out.skill_key.display("web"), "Web");
    }

    #[test]
    fn test_noun_strategy_extracts_chunks() {
        let extractor = SkillExtractor::new(&config(FeatureStrategy::Noun));
        let out = extractor.extract(&profiles(&[(
            1,
            &["design of web applications", "Kubernetes"],
        )]));
        assert_eq!(out.profiles[&1], vec!["design", "web applications", "kubernetes"]);
    }

    #[test]
    fn test_custom_tagger() {
        struct AllNouns;
        impl Tagger for AllNouns {
            fn tag(&self, tokens: &[&str]) -> Vec<Tag> {
                vec![Tag::Noun; tokens.len()]
            }
        }
        let extractor =
            SkillExtractor::new(&config(FeatureStrategy::Noun)).with_tagger(AllNouns);
        let out = extractor.extract(&profiles(&[(1, &["design of web applications"])]));
        assert_eq!(out.profiles[&1], vec!["design of web applications"]);
    }

    #[test]
    fn test_stemming_merges_and_last_display_wins() {
        let extractor = SkillExtractor::new(&FeatureConfig {
            stemmer: StemmerKind::Porter,
            ..config(FeatureStrategy::Skill)
        });
        let out = extractor.extract(&profiles(&[
            (1, &["web framework"]),
            (2, &["web frameworks"]),
        ]));
        assert_eq!(out.profiles[&1], out.profiles[&2]);
        assert_eq!(out.skill_key.len(), 1);
        assert_eq!(out.skill_key.display(&out.profiles[&1][0]), "web frameworks");
    }

    #[test]
    fn test_empty_features_dropped() {
        let extractor = SkillExtractor::new(&config(FeatureStrategy::Skill));
        let out = extractor.extract(&profiles(&[(1, &["", "   ", "go"])]));
        assert_eq!(out.profiles[&1], vec!["go"]);
    }

    #[test]
    fn test_extract_raw_cleans_first() {
        let extractor = SkillExtractor::new(&config(FeatureStrategy::Skill));
        let mut raw = SkillProfiles::new();
        raw.insert(5, Some(vec!["Project Management.".to_string()]));
        raw.insert(6, None);

        let out = extractor.extract_raw(&raw);
        assert_eq!(out.profiles[&5], vec!["project management"]);
        assert_eq!(out.skill_key.get("project management"), Some("Project Management"));
        assert!(!out.profiles.contains_key(&6));
    }

    #[test]
    fn test_display_falls_back_to_feature() {
        let key = SkillKey::default();
        assert_eq!(key.display("unknown"), "unknown");
        assert!(key.is_empty());
    }
}
