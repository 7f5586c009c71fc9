//! Similarity-weighted scoring and top-N selection.

use super::neighbourhood::Neighbourhood;
use super::similarity::SimilarityMatrix;
use std::cmp::Ordering;

/// One candidate skill column and its score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredSkill {
    /// Column in the skill index.
    pub skill: usize,
    /// Similarity-weighted average of the employee's weights.
    pub score: f64,
}

/// Scores every candidate skill for an employee.
///
/// `score(s) = sum(sim(s, t) * w(t)) / sum(sim(s, t))` over the scoring
/// universe `t`. Without a neighbourhood the universe is every skill; with
/// one it is the employee's known skills plus their neighbours, and only
/// skills in that universe are scored. A zero denominator scores 0.
pub struct Scorer<'a> {
    similarity: &'a SimilarityMatrix,
    neighbourhood: Option<&'a Neighbourhood>,
}

impl<'a> Scorer<'a> {
    /// Create a scorer over a similarity matrix.
    pub fn new(similarity: &'a SimilarityMatrix, neighbourhood: Option<&'a Neighbourhood>) -> Self {
        Self {
            similarity,
            neighbourhood,
        }
    }

    /// Score candidates given the employee's weight row and known columns.
    pub fn score(&self, weights: &[f64], known: &[usize]) -> Vec<ScoredSkill> {
        let numerator = |s: usize| -> f64 {
            known
                .iter()
                .map(|&k| self.similarity.get(s, k) * weights[k])
                .sum()
        };
        let ratio = |num: f64, den: f64| if den != 0.0 { num / den } else { 0.0 };

        match self.neighbourhood {
            None => (0..self.similarity.len())
                .map(|s| ScoredSkill {
                    skill: s,
                    score: ratio(numerator(s), self.similarity.row_sum(s)),
                })
                .collect(),
            Some(hood) => {
                let universe: Vec<usize> = hood.reachable_from(known).into_iter().collect();
                universe
                    .iter()
                    .map(|&s| {
                        let den: f64 = universe.iter().map(|&t| self.similarity.get(s, t)).sum();
                        ScoredSkill {
                            skill: s,
                            score: ratio(numerator(s), den),
                        }
                    })
                    .collect()
            }
        }
    }
}

/// Descending score, then ascending column.
fn rank(a: &ScoredSkill, b: &ScoredSkill) -> Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then(a.skill.cmp(&b.skill))
}

/// The `n` best candidates.
pub fn top_n(mut candidates: Vec<ScoredSkill>, n: usize) -> Vec<ScoredSkill> {
    candidates.retain(|c| c.score.is_finite());
    candidates.sort_by(rank);
    candidates.truncate(n);
    candidates
}

/// The employee's own skills that best account for a set of recommendations.
///
/// Each known skill is ranked by the summed similarity to every
/// recommended skill; the best `n` are returned. Nothing is returned when
/// there are no recommendations.
pub fn most_similar_known(
    similarity: &SimilarityMatrix,
    recommended: &[usize],
    known: &[usize],
    n: usize,
) -> Vec<usize> {
    if recommended.is_empty() {
        return Vec::new();
    }
    let combined = known
        .iter()
        .map(|&k| ScoredSkill {
            skill: k,
            score: recommended.iter().map(|&r| similarity.get(r, k)).sum(),
        })
        .collect();
    top_n(combined, n).into_iter().map(|s| s.skill).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimilarityMetric;
    use crate::recommend::index::{IndexOptions, SkillIndex};
    use crate::types::FeatureProfiles;

    fn build(entries: &[(i64, &[&str])]) -> (SkillIndex, SimilarityMatrix) {
        let profiles: FeatureProfiles = entries
            .iter()
            .map(|(id, skills)| (*id, skills.iter().map(|s| s.to_string()).collect()))
            .collect();
        let index = SkillIndex::build(&profiles, IndexOptions::default());
        let sim = SimilarityMatrix::compute(&index, SimilarityMetric::Cosine, 1);
        (index, sim)
    }

    #[test]
    fn test_weighted_average() {
        // columns: angular, js, python
        let (index, sim) = build(&[(1, &["js", "angular"]), (2, &["js"]), (3, &["python"])]);
        let weights = index.weights(2).unwrap_or_default();
        let known = index.known_columns(2);
        let scores = Scorer::new(&sim, None).score(weights, &known);

        let c = 1.0 / 2f64.sqrt();
        // angular: sim(angular, js) / (1 + c)
        assert!((scores[0].score - c / (1.0 + c)).abs() < 1e-12);
        assert_eq!(scores[2].score, 0.0);
    }

    #[test]
    fn test_neighbourhood_limits_universe() {
        let (index, sim) = build(&[
            (1, &["a", "b"]),
            (2, &["b", "c"]),
            (3, &["c", "d"]),
            (4, &["a"]),
        ]);
        let hood = Neighbourhood::compute(&sim, 1);
        let known = index.known_columns(4);
        let weights = index.weights(4).unwrap_or_default();
        let scores = Scorer::new(&sim, Some(&hood)).score(weights, &known);
        let scored: Vec<usize> = scores.iter().map(|s| s.skill).collect();
        assert_eq!(scored, hood.reachable_from(&known).into_iter().collect::<Vec<_>>());
        assert!(!scored.contains(&3));
    }

    #[test]
    fn test_top_n_breaks_ties_by_column() {
        let picked = top_n(
            vec![
                ScoredSkill { skill: 3, score: 0.5 },
                ScoredSkill { skill: 1, score: 0.5 },
                ScoredSkill { skill: 2, score: 0.9 },
                ScoredSkill { skill: 0, score: f64::NAN },
            ],
            3,
        );
        let order: Vec<usize> = picked.iter().map(|s| s.skill).collect();
        assert_eq!(order, vec![2, 1, 3]);
    }

    #[test]
    fn test_most_similar_known_orders_by_contribution() {
        // columns: a, b, c, r
        let (_, sim) = build(&[
            (1, &["a", "r"]),
            (2, &["a", "r"]),
            (3, &["b", "r"]),
            (4, &["b"]),
            (5, &["c"]),
        ]);
        let picked = most_similar_known(&sim, &[3], &[0, 1, 2], 2);
        assert_eq!(picked, vec![0, 1]);
        assert!(most_similar_known(&sim, &[], &[0, 1], 2).is_empty());
    }
}
