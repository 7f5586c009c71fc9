//! Common types shared across intelligence modules.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Employee identifier as issued by the upstream people data.
pub type EmployeeId = i64;

/// Raw per-employee skill lists.
///
/// `None` means the source has no skill data for that employee; such entries
/// contribute nothing to the index.
pub type SkillProfiles = BTreeMap<EmployeeId, Option<Vec<String>>>;

/// Per-employee extracted skill features (employees without data removed).
pub type FeatureProfiles = BTreeMap<EmployeeId, Vec<String>>;

/// Output of a recommendation query.
///
/// `recommendation_list` and `similarities` are parallel and ordered by
/// descending score. `most_similar_to` lists the employee's own skills that
/// best explain the recommendations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillRecommendation {
    /// Recommended skills, best first.
    pub recommendation_list: Vec<String>,
    /// Score for each recommended skill.
    pub similarities: Vec<f64>,
    /// Existing skills most similar to the recommendations.
    pub most_similar_to: Vec<String>,
}

impl SkillRecommendation {
    /// Number of recommended skills.
    pub fn len(&self) -> usize {
        self.recommendation_list.len()
    }

    /// True when nothing was recommended.
    pub fn is_empty(&self) -> bool {
        self.recommendation_list.is_empty()
    }

    /// Iterate `(skill, score)` pairs in rank order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.recommendation_list
            .iter()
            .map(String::as_str)
            .zip(self.similarities.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iter_pairs_in_order() {
        let rec = SkillRecommendation {
            recommendation_list: vec!["rust".to_string(), "go".to_string()],
            similarities: vec![0.9, 0.4],
            most_similar_to: vec!["c".to_string()],
        };
        let pairs: Vec<_> = rec.iter().collect();
        assert_eq!(pairs, vec![("rust", 0.9), ("go", 0.4)]);
        assert_eq!(rec.len(), 2);
        assert!(!rec.is_empty());
    }

    #[test]
    fn test_default_is_empty() {
        assert!(SkillRecommendation::default().is_empty());
    }

    #[test]
    fn test_serializes_field_names() {
        let rec = SkillRecommendation::default();
        let json = serde_json::to_value(&rec).unwrap();
        assert!(json.get("recommendation_list").is_some());
        assert!(json.get("most_similar_to").is_some());
    }
}
