//! Token stemming with a protected-token list.

use super::lancaster;
use crate::config::StemmerKind;
use rust_stemmers::{Algorithm, Stemmer};

/// Tokens that are never stemmed (acronyms and proper nouns whose trailing
/// letters are not inflections).
pub const PROTECTED_TOKENS: &[&str] = &[
    "aws", "ios", "js", "css", "sass", "less", "rails", "kubernetes", "jenkins", "pandas",
    "redis", "windows", "express", "analytics", "devops", "graphics", "business", "sales",
    "ansible", "cypress", "nodejs", "reactjs", "vuejs", "typescript", "postgres", "gis", "mysql",
];

/// Stems features token by token according to the configured algorithm.
pub struct FeatureStemmer {
    kind: StemmerKind,
    english: Option<Stemmer>,
}

impl std::fmt::Debug for FeatureStemmer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureStemmer")
            .field("kind", &self.kind)
            .finish()
    }
}

impl FeatureStemmer {
    /// Create a stemmer for the given algorithm.
    pub fn new(kind: StemmerKind) -> Self {
        let english = match kind {
            StemmerKind::Porter | StemmerKind::Snowball => Some(Stemmer::create(Algorithm::English)),
            StemmerKind::None | StemmerKind::Lancaster => None,
        };
        Self { kind, english }
    }

    /// The configured algorithm.
    pub fn kind(&self) -> StemmerKind {
        self.kind
    }

    /// True when a token must be left untouched.
    pub fn is_protected(token: &str) -> bool {
        PROTECTED_TOKENS
            .iter()
            .any(|p| p.eq_ignore_ascii_case(token))
    }

    /// Stem one token. Stemmed output is lowercase; protected tokens keep
    /// their original form.
    pub fn stem_token(&self, token: &str) -> String {
        if self.kind == StemmerKind::None || Self::is_protected(token) {
            return token.to_string();
        }
        let lower = token.to_lowercase();
        match (&self.english, self.kind) {
            (Some(stemmer), _) => stemmer.stem(&lower).into_owned(),
            (None, StemmerKind::Lancaster) => lancaster::stem(&lower),
            (None, _) => lower,
        }
    }

    /// Stem every whitespace-separated token of a feature.
    pub fn stem_feature(&self, feature: &str) -> String {
        if self.kind == StemmerKind::None {
            return feature.to_string();
        }
        feature
            .split_whitespace()
            .map(|token| self.stem_token(token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
