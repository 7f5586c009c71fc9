//! Error types for configuration, engine construction and queries.

use crate::types::EmployeeId;
use thiserror::Error;

/// Errors raised while parsing or validating recommender configuration.
///
/// These are fatal to the (re)initialization attempt that produced them; a
/// previously published snapshot stays in service.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Feature strategy did not match any known prefix.
    #[error("Skill feature {value:?} not recognized! Available options are: {available}")]
    UnknownFeatureStrategy {
        /// The rejected value.
        value: String,
        /// Comma-separated list of accepted values.
        available: String,
    },

    /// Stemmer name did not match any known prefix.
    #[error("Stemmer {value:?} not recognized! Available options are: {available}")]
    UnknownStemmer {
        /// The rejected value.
        value: String,
        /// Comma-separated list of accepted values.
        available: String,
    },

    /// Similarity metric did not match any known prefix.
    #[error("Unknown similarity metric {value:?}! Available options are: {available}")]
    UnknownMetric {
        /// The rejected value.
        value: String,
        /// Comma-separated list of accepted values.
        available: String,
    },

    /// The numeric suffix of a parametrized metric could not be parsed.
    #[error("Invalid parameter {param:?} for similarity metric {metric:?}")]
    InvalidMetricParameter {
        /// Metric name as given.
        metric: String,
        /// The offending parameter text.
        param: String,
    },

    /// A numeric or boolean option has an unusable value.
    #[error("Invalid value {value:?} for option '{option}': {reason}")]
    InvalidValue {
        /// Option name.
        option: String,
        /// Value as given.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// An override targeted an option that does not exist.
    #[error("Unknown configuration option '{0}'")]
    UnknownOption(String),
}

/// Errors returned by recommendation queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecommendError {
    /// The employee is absent from the skill index or has no known skills.
    #[error("No skill data found for employee {employee_id}")]
    NoDataForEmployee {
        /// Employee that was queried.
        employee_id: EmployeeId,
    },
}

/// Errors raised while building or rebuilding the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The profile datasource failed.
    #[error("failed to fetch skill profiles: {0:#}")]
    Datasource(anyhow::Error),

    /// `apply_staged` was called with nothing staged.
    #[error("no staged configuration to apply")]
    NothingStaged,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_strategy_names_options() {
        let err = ConfigError::UnknownFeatureStrategy {
            value: "phrase".to_string(),
            available: "noun, skill, word".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("\"phrase\""));
        assert!(msg.contains("noun, skill, word"));
    }

    #[test]
    fn test_no_data_message() {
        let err = RecommendError::NoDataForEmployee { employee_id: 775 };
        assert_eq!(err.to_string(), "No skill data found for employee 775");
    }

    #[test]
    fn test_engine_error_wraps_config() {
        let err: EngineError = ConfigError::UnknownOption("colour".to_string()).into();
        assert!(matches!(err, EngineError::Config(_)));
        assert_eq!(err.to_string(), "Unknown configuration option 'colour'");
    }
}
