//! Collaborative-filtering skill recommendations.
//!
//! This crate provides:
//! - Skill text cleaning and feature extraction (whole skill, word or noun phrase)
//! - An employee x feature index with rarity filtering
//! - Pairwise skill similarity (cosine, Jaccard, dot, adjusted cosine)
//! - Recommendations with per-employee history and atomic reconfiguration
//!
//! ```no_run
//! use skillrec_intelligence::{InMemoryDatasource, RecommenderConfig, SkillRecommender};
//!
//! let source = InMemoryDatasource::default()
//!     .with_employee(1, ["Rust", "Go"])
//!     .with_employee(2, ["Rust"]);
//! let engine = SkillRecommender::new(source, RecommenderConfig::default())?;
//! let rec = engine.recommend(2, 1, 1)?;
//! println!("{}", engine.explain(&rec));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod datasource;
pub mod engine;
pub mod error;
pub mod features;
pub mod history;
pub mod recommend;
pub mod types;

pub use config::{
    FeatureConfig, FeatureStrategy, NeighbourhoodConfig, RecommenderConfig, SimilarityMetric,
    StemmerKind, OPTION_NAMES,
};
pub use datasource::{Datasource, InMemoryDatasource};
pub use engine::SkillRecommender;
pub use error::{ConfigError, EngineError, RecommendError};
pub use features::{clean_one, ExtractedFeatures, SkillExtractor, SkillKey};
pub use history::RecommendationHistory;
pub use recommend::{explain, summarize_recommendations, IndexStats, SkillIndex, Snapshot};
pub use types::{EmployeeId, FeatureProfiles, SkillProfiles, SkillRecommendation};
