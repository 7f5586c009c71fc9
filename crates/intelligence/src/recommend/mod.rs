//! Collaborative-filtering recommendations over an immutable snapshot.
//!
//! A [`Snapshot`] bundles everything a query reads: the configuration it was
//! built with, the skill index, the similarity matrix, the optional
//! neighbourhood and the display lookup. Snapshots are never mutated after
//! construction, so concurrent queries need no locking.

mod explainer;
pub mod index;
pub mod matrix;
pub mod neighbourhood;
mod scorer;
pub mod similarity;

pub use explainer::{explain, summarize_recommendations};
pub use index::{rarity_filter, IndexOptions, IndexStats, SkillIndex};
pub use matrix::DenseMatrix;
pub use neighbourhood::Neighbourhood;
pub use scorer::{most_similar_known, top_n, ScoredSkill, Scorer};
pub use similarity::SimilarityMatrix;

use crate::config::RecommenderConfig;
use crate::error::{ConfigError, RecommendError};
use crate::features::{SkillExtractor, SkillKey};
use crate::types::{EmployeeId, SkillProfiles, SkillRecommendation};
use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Frozen index, similarity and neighbourhood built from one configuration.
#[derive(Debug, Clone)]
pub struct Snapshot {
    config: RecommenderConfig,
    skill_key: SkillKey,
    index: SkillIndex,
    similarity: SimilarityMatrix,
    neighbourhood: Option<Neighbourhood>,
}

impl Snapshot {
    /// Build a snapshot from raw profiles.
    pub fn build(profiles: &SkillProfiles, config: RecommenderConfig) -> Result<Self, ConfigError> {
        let extractor = SkillExtractor::new(&config.skill_features);
        Self::build_with_extractor(profiles, config, &extractor)
    }

    /// Build a snapshot using a caller-supplied feature extractor.
    pub fn build_with_extractor(
        profiles: &SkillProfiles,
        config: RecommenderConfig,
        extractor: &SkillExtractor,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let started = Instant::now();
        info!(
            target: "skillrec::engine",
            strategy = %config.skill_features.feature_type,
            stemmer = %config.skill_features.stemmer,
            "Extracting skill features"
        );
        let extracted = extractor.extract_raw(profiles);
        debug!(
            target: "skillrec::engine",
            employees = extracted.profiles.len(),
            features = extracted.skill_key.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Extracted skill features"
        );

        let phase = Instant::now();
        info!(target: "skillrec::engine", "Constructing skill index");
        let index = SkillIndex::build(&extracted.profiles, IndexOptions::from(&config));
        let stats = index.stats();
        debug!(
            target: "skillrec::engine",
            employees = stats.employees,
            features = stats.features,
            dropped_rare = stats.dropped_rare,
            elapsed_ms = phase.elapsed().as_millis() as u64,
            "Constructed skill index"
        );
        if stats.features == 0 && stats.employees > 0 {
            warn!(
                target: "skillrec::engine",
                rarest_allowed_skill = config.rarest_allowed_skill,
                "No skill features survived rarity filtering"
            );
        }

        let phase = Instant::now();
        info!(
            target: "skillrec::engine",
            metric = %config.similarity_metric,
            workers = config.worker_count(),
            "Constructing skill similarity matrix"
        );
        let similarity =
            SimilarityMatrix::compute(&index, config.similarity_metric, config.worker_count());
        debug!(
            target: "skillrec::engine",
            size = similarity.len(),
            elapsed_ms = phase.elapsed().as_millis() as u64,
            "Constructed skill similarity matrix"
        );

        let neighbourhood = if config.neighbourhood.use_neighbourhood {
            let phase = Instant::now();
            info!(
                target: "skillrec::engine",
                size = config.neighbourhood.neighbourhood_size,
                "Evaluating skill neighbours"
            );
            let hood = Neighbourhood::compute(&similarity, config.neighbourhood.neighbourhood_size);
            debug!(
                target: "skillrec::engine",
                elapsed_ms = phase.elapsed().as_millis() as u64,
                "Evaluated skill neighbours"
            );
            Some(hood)
        } else {
            None
        };

        info!(
            target: "skillrec::engine",
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Recommender ready"
        );

        Ok(Self {
            config,
            skill_key: extracted.skill_key,
            index,
            similarity,
            neighbourhood,
        })
    }

    /// Configuration this snapshot was built with.
    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// The employee x feature index.
    pub fn index(&self) -> &SkillIndex {
        &self.index
    }

    /// The skill x skill similarity matrix.
    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    /// Neighbour lists, when enabled.
    pub fn neighbourhood(&self) -> Option<&Neighbourhood> {
        self.neighbourhood.as_ref()
    }

    /// Processed feature -> display string lookup.
    pub fn skill_key(&self) -> &SkillKey {
        &self.skill_key
    }

    /// Index size figures.
    pub fn stats(&self) -> IndexStats {
        self.index.stats()
    }

    /// Similarity between two processed features, if both are indexed.
    pub fn similarity_between(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.index.skill_column(a)?;
        let j = self.index.skill_column(b)?;
        Some(self.similarity.get(i, j))
    }

    /// Name of a column as presented to callers.
    fn present(&self, col: usize) -> String {
        let feature = self.index.skill_name(col);
        if self.config.convert_back {
            self.skill_key.display(feature).to_string()
        } else {
            feature.to_string()
        }
    }

    /// True if a column is named in `excluded` by processed or display name.
    fn is_excluded(&self, col: usize, excluded: &HashSet<String>) -> bool {
        let feature = self.index.skill_name(col);
        excluded.contains(feature) || excluded.contains(self.skill_key.display(feature))
    }

    /// Skills the employee already has, in column order.
    pub fn known_skills(&self, employee_id: EmployeeId) -> Vec<String> {
        self.index
            .known_columns(employee_id)
            .into_iter()
            .map(|col| self.present(col))
            .collect()
    }

    /// Recommend up to `nb_recommendations` new skills for an employee.
    ///
    /// Known skills and anything in `excluded` (processed or display names)
    /// are never returned. Scores are ranked descending with ties broken by
    /// ascending feature name.
    pub fn recommend(
        &self,
        employee_id: EmployeeId,
        nb_recommendations: usize,
        nb_most_similar: usize,
        excluded: &HashSet<String>,
    ) -> Result<SkillRecommendation, RecommendError> {
        let known = self.index.known_columns(employee_id);
        let weights = match self.index.weights(employee_id) {
            Some(weights) if !known.is_empty() => weights,
            _ => return Err(RecommendError::NoDataForEmployee { employee_id }),
        };

        let known_set: HashSet<usize> = known.iter().copied().collect();
        let candidates = Scorer::new(&self.similarity, self.neighbourhood.as_ref())
            .score(weights, &known)
            .into_iter()
            .filter(|c| !known_set.contains(&c.skill) && !self.is_excluded(c.skill, excluded))
            .collect();
        let picked = top_n(candidates, nb_recommendations);

        let recommended: Vec<usize> = picked.iter().map(|s| s.skill).collect();
        let most_similar = most_similar_known(&self.similarity, &recommended, &known, nb_most_similar);

        Ok(SkillRecommendation {
            recommendation_list: recommended.iter().map(|&col| self.present(col)).collect(),
            similarities: picked.iter().map(|s| s.score).collect(),
            most_similar_to: most_similar.into_iter().map(|col| self.present(col)).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimilarityMetric;

    fn profiles(entries: &[(EmployeeId, &[&str])]) -> SkillProfiles {
        entries
            .iter()
            .map(|(id, skills)| (*id, Some(skills.iter().map(|s| s.to_string()).collect())))
            .collect()
    }

    fn snapshot(entries: &[(EmployeeId, &[&str])], config: RecommenderConfig) -> Snapshot {
        match Snapshot::build(&profiles(entries), config) {
            Ok(snapshot) => snapshot,
            Err(err) => panic!("snapshot failed to build: {err}"),
        }
    }

    #[test]
    fn test_recommends_co_occurring_skill() {
        let snap = snapshot(
            &[
                (1, &["Rust", "Go"]),
                (2, &["Rust", "Go"]),
                (3, &["Rust"]),
                (4, &["Python"]),
            ],
            RecommenderConfig::default(),
        );
        let rec = snap.recommend(3, 1, 1, &HashSet::new()).unwrap_or_default();
        assert_eq!(rec.recommendation_list, vec!["Go"]);
        assert_eq!(rec.most_similar_to, vec!["Rust"]);
    }

    #[test]
    fn test_convert_back_disabled_returns_processed_names() {
        let snap = snapshot(
            &[(1, &["Rust", "Go"]), (2, &["Rust"])],
            RecommenderConfig {
                convert_back: false,
                ..Default::default()
            },
        );
        let rec = snap.recommend(2, 1, 1, &HashSet::new()).unwrap_or_default();
        assert_eq!(rec.recommendation_list, vec!["go"]);
        assert_eq!(snap.known_skills(2), vec!["rust"]);
    }

    #[test]
    fn test_exclusion_matches_display_or_processed_name() {
        let snap = snapshot(
            &[(1, &["Rust", "Go", "C"]), (2, &["Rust"])],
            RecommenderConfig::default(),
        );
        let excluded: HashSet<String> = ["Go".to_string(), "c".to_string()].into();
        let rec = snap.recommend(2, 5, 1, &excluded).unwrap_or_default();
        assert!(rec.is_empty());
    }

    #[test]
    fn test_no_data_for_unknown_or_empty_employee() {
        let mut raw = profiles(&[(1, &["Rust"]), (2, &[])]);
        raw.insert(3, None);
        let snap = match Snapshot::build(&raw, RecommenderConfig::default()) {
            Ok(snapshot) => snapshot,
            Err(err) => panic!("{err}"),
        };
        for id in [2, 3, 99] {
            assert_eq!(
                snap.recommend(id, 1, 1, &HashSet::new()),
                Err(RecommendError::NoDataForEmployee { employee_id: id })
            );
        }
    }

    #[test]
    fn test_rejects_invalid_config() {
        let err = Snapshot::build(
            &profiles(&[(1, &["Rust"])]),
            RecommenderConfig {
                rarest_allowed_skill: 0,
                ..Default::default()
            },
        );
        assert!(matches!(err, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_neighbourhood_snapshot() {
        let config = RecommenderConfig {
            similarity_metric: SimilarityMetric::Cosine,
            ..Default::default()
        }
        .with_override("use_neighbourhood", "true")
        .and_then(|c| c.with_override("neighbourhood_size", "1"));
        let config = match config {
            Ok(config) => config,
            Err(err) => panic!("{err}"),
        };
        let snap = snapshot(
            &[(1, &["a", "b"]), (2, &["b", "c"]), (3, &["c", "d"]), (4, &["a"])],
            config,
        );
        assert!(snap.neighbourhood().is_some());
        let rec = snap.recommend(4, 5, 1, &HashSet::new()).unwrap_or_default();
        assert_eq!(rec.recommendation_list, vec!["b"]);
    }
}
