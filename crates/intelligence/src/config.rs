//! Typed recommender configuration.
//!
//! Enum-valued options are matched by case-insensitive prefix, so `"skills"`
//! selects [`FeatureStrategy::Skill`] and `"Cosine similarity"` selects
//! [`SimilarityMetric::Cosine`]. Invalid values are rejected while the
//! configuration is parsed, never at first use.
//!
//! ```
//! use skillrec_intelligence::{RecommenderConfig, SimilarityMetric};
//!
//! let config = RecommenderConfig::default()
//!     .with_override("similarity_metric", "adjusted-cosine-0.5")
//!     .unwrap();
//! assert_eq!(config.similarity_metric, SimilarityMetric::AdjustedCosine { alpha: 0.5 });
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default alpha for the adjusted cosine metric when no suffix is given.
pub const DEFAULT_ADJUSTED_ALPHA: f64 = 1.0;

/// Every option accepted by [`RecommenderConfig::with_override`].
pub const OPTION_NAMES: &[&str] = &[
    "feature_type",
    "stemmer",
    "use_lowercase",
    "remove_numbers",
    "rarest_allowed_skill",
    "use_binary",
    "normalize_skill_vectors",
    "similarity_metric",
    "use_neighbourhood",
    "neighbourhood_size",
    "convert_back",
    "nb_workers",
];

/// How cleaned skill strings become countable features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FeatureStrategy {
    /// Noun-phrase chunks of multi-word skills.
    Noun,
    /// Each skill string is one feature.
    Skill,
    /// Whitespace tokens minus stop words.
    Word,
}

impl FeatureStrategy {
    /// All strategies in prefix-match order.
    pub const ALL: [FeatureStrategy; 3] = [Self::Noun, Self::Skill, Self::Word];

    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Noun => "noun",
            Self::Skill => "skill",
            Self::Word => "word",
        }
    }
}

/// Stemming algorithm applied to every feature token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StemmerKind {
    /// Leave tokens untouched.
    None,
    /// Porter-family English stemmer.
    Porter,
    /// Snowball English stemmer.
    Snowball,
    /// Paice/Husk (Lancaster) stemmer.
    Lancaster,
}

impl StemmerKind {
    /// All stemmers in prefix-match order.
    pub const ALL: [StemmerKind; 4] = [Self::None, Self::Porter, Self::Snowball, Self::Lancaster];

    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Porter => "porter",
            Self::Snowball => "snowball",
            Self::Lancaster => "lancaster",
        }
    }
}

/// Pairwise skill similarity function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SimilarityMetric {
    /// `1 - cosine_distance`.
    Cosine,
    /// `1 - hamming_distance` over binarized columns.
    Jaccard,
    /// Raw inner product.
    Dot,
    /// `(|a| * |b|)^alpha * (1 - cosine_similarity(a, b))`.
    AdjustedCosine {
        /// Exponent applied to the product of column norms.
        alpha: f64,
    },
}

impl SimilarityMetric {
    /// Names listed in error messages.
    pub const AVAILABLE: &'static str = "cosine, jaccard (hamming), dot, adjusted-cosine-<alpha>";
}

fn join_names<T>(items: &[T], name: impl Fn(&T) -> &'static str) -> String {
    items.iter().map(name).collect::<Vec<_>>().join(", ")
}

impl FromStr for FeatureStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|strategy| lower.starts_with(strategy.name()))
            .ok_or_else(|| ConfigError::UnknownFeatureStrategy {
                value: s.to_string(),
                available: join_names(&Self::ALL, |k| k.name()),
            })
    }
}

impl FromStr for StemmerKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| lower.starts_with(kind.name()))
            .ok_or_else(|| ConfigError::UnknownStemmer {
                value: s.to_string(),
                available: join_names(&Self::ALL, |k| k.name()),
            })
    }
}

impl FromStr for SimilarityMetric {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();

        if lower.starts_with("cosine") {
            return Ok(Self::Cosine);
        }
        if lower.starts_with("jaccard") || lower.starts_with("hamming") {
            return Ok(Self::Jaccard);
        }
        if lower.starts_with("dot") {
            return Ok(Self::Dot);
        }
        if let Some(rest) = lower.strip_prefix("adjusted") {
            // Optional "-cosine" / "_cosine" / " cosine" qualifier.
            let rest = rest
                .strip_prefix(&['-', '_', ' '][..])
                .and_then(|r| r.strip_prefix("cosine"))
                .unwrap_or(rest);
            let rest = rest.strip_prefix("cosine").unwrap_or(rest);

            if rest.is_empty() {
                return Ok(Self::AdjustedCosine {
                    alpha: DEFAULT_ADJUSTED_ALPHA,
                });
            }
            let invalid = || ConfigError::InvalidMetricParameter {
                metric: s.to_string(),
                param: rest.to_string(),
            };
            let param = rest.strip_prefix('-').ok_or_else(invalid)?;
            let alpha: f64 = param.parse().map_err(|_| invalid())?;
            if !alpha.is_finite() {
                return Err(invalid());
            }
            return Ok(Self::AdjustedCosine { alpha });
        }

        Err(ConfigError::UnknownMetric {
            value: s.to_string(),
            available: Self::AVAILABLE.to_string(),
        })
    }
}

impl fmt::Display for FeatureStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for StemmerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for SimilarityMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cosine => f.write_str("cosine"),
            Self::Jaccard => f.write_str("jaccard"),
            Self::Dot => f.write_str("dot"),
            Self::AdjustedCosine { alpha } => write!(f, "adjusted-cosine-{alpha}"),
        }
    }
}

macro_rules! string_conversions {
    ($($ty:ty),*) => {$(
        impl TryFrom<String> for $ty {
            type Error = ConfigError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.to_string()
            }
        }
    )*};
}

string_conversions!(FeatureStrategy, StemmerKind, SimilarityMetric);

/// Feature extraction options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Extraction strategy.
    pub feature_type: FeatureStrategy,
    /// Stemmer applied after extraction.
    pub stemmer: StemmerKind,
    /// Case-fold features.
    pub use_lowercase: bool,
    /// Strip trailing standalone numbers while cleaning.
    pub remove_numbers: bool,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            feature_type: FeatureStrategy::Skill,
            stemmer: StemmerKind::None,
            use_lowercase: true,
            remove_numbers: false,
        }
    }
}

/// Neighbourhood restriction options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeighbourhoodConfig {
    /// Restrict scoring to the neighbourhoods of the employee's skills.
    pub use_neighbourhood: bool,
    /// Number of neighbours kept per skill.
    pub neighbourhood_size: usize,
}

impl Default for NeighbourhoodConfig {
    fn default() -> Self {
        Self {
            use_neighbourhood: false,
            neighbourhood_size: 10,
        }
    }
}

/// Complete recommender configuration.
///
/// Values are immutable once handed to the engine; [`with_override`]
/// returns a new value instead of mutating.
///
/// [`with_override`]: RecommenderConfig::with_override
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// Feature extraction options.
    pub skill_features: FeatureConfig,
    /// Minimum number of distinct employees a feature must appear in.
    pub rarest_allowed_skill: usize,
    /// Collapse counts to presence.
    pub use_binary: bool,
    /// Unit-normalize employee rows.
    pub normalize_skill_vectors: bool,
    /// Pairwise similarity metric.
    pub similarity_metric: SimilarityMetric,
    /// Neighbourhood restriction.
    pub neighbourhood: NeighbourhoodConfig,
    /// Map processed feature names back to display strings in results.
    pub convert_back: bool,
    /// Worker threads for the similarity computation (0 = one per CPU).
    pub nb_workers: usize,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            skill_features: FeatureConfig::default(),
            rarest_allowed_skill: 1,
            use_binary: true,
            normalize_skill_vectors: false,
            similarity_metric: SimilarityMetric::Cosine,
            neighbourhood: NeighbourhoodConfig::default(),
            convert_back: true,
            nb_workers: 1,
        }
    }
}

impl RecommenderConfig {
    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rarest_allowed_skill == 0 {
            return Err(ConfigError::InvalidValue {
                option: "rarest_allowed_skill".to_string(),
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.neighbourhood.use_neighbourhood && self.neighbourhood.neighbourhood_size == 0 {
            return Err(ConfigError::InvalidValue {
                option: "neighbourhood_size".to_string(),
                value: "0".to_string(),
                reason: "must be at least 1 when use_neighbourhood is enabled".to_string(),
            });
        }
        if let SimilarityMetric::AdjustedCosine { alpha } = self.similarity_metric {
            if !alpha.is_finite() {
                return Err(ConfigError::InvalidMetricParameter {
                    metric: self.similarity_metric.to_string(),
                    param: alpha.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Effective worker count for the similarity computation.
    pub fn worker_count(&self) -> usize {
        match self.nb_workers {
            0 => num_cpus::get().max(1),
            n => n,
        }
    }

    /// Return a copy with one option replaced.
    ///
    /// `key` may be dotted (`neighbourhood.neighbourhood_size`); only the last
    /// segment is significant. `feature_strategy` is accepted as an alias of
    /// `feature_type`.
    pub fn with_override(&self, key: &str, value: &str) -> Result<Self, ConfigError> {
        let option = key.rsplit('.').next().unwrap_or(key).trim().to_lowercase();
        let mut next = self.clone();

        match option.as_str() {
            "feature_type" | "feature_strategy" => {
                next.skill_features.feature_type = value.parse()?;
            }
            "stemmer" => next.skill_features.stemmer = value.parse()?,
            "use_lowercase" => next.skill_features.use_lowercase = parse_bool(&option, value)?,
            "remove_numbers" => next.skill_features.remove_numbers = parse_bool(&option, value)?,
            "rarest_allowed_skill" => next.rarest_allowed_skill = parse_usize(&option, value)?,
            "use_binary" => next.use_binary = parse_bool(&option, value)?,
            "normalize_skill_vectors" => next.normalize_skill_vectors = parse_bool(&option, value)?,
            "similarity_metric" => next.similarity_metric = value.parse()?,
            "use_neighbourhood" => {
                next.neighbourhood.use_neighbourhood = parse_bool(&option, value)?;
            }
            "neighbourhood_size" => {
                next.neighbourhood.neighbourhood_size = parse_usize(&option, value)?;
            }
            "convert_back" => next.convert_back = parse_bool(&option, value)?,
            "nb_workers" => next.nb_workers = parse_usize(&option, value)?,
            _ => return Err(ConfigError::UnknownOption(key.to_string())),
        }

        next.validate()?;
        Ok(next)
    }

    /// Apply several overrides in order.
    pub fn with_overrides<'a>(
        &self,
        overrides: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, ConfigError> {
        overrides
            .into_iter()
            .try_fold(self.clone(), |config, (key, value)| {
                config.with_override(key, value)
            })
    }
}

fn parse_bool(option: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            option: option.to_string(),
            value: value.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}

fn parse_usize(option: &str, value: &str) -> Result<usize, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            option: option.to_string(),
            value: value.to_string(),
            reason: "expected a non-negative integer".to_string(),
        })
}
