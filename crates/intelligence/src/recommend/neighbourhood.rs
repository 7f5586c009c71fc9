//! K nearest skills per skill.

use super::similarity::SimilarityMatrix;
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// For each skill, its `size` most similar other skills, best first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neighbourhood {
    size: usize,
    neighbours: Vec<Vec<usize>>,
}

impl Neighbourhood {
    /// Select neighbours from a similarity matrix.
    ///
    /// A skill is never its own neighbour. Equal similarities are ordered by
    /// ascending column, which is ascending skill name.
    pub fn compute(similarity: &SimilarityMatrix, size: usize) -> Self {
        let neighbours = (0..similarity.len())
            .map(|i| {
                let row = similarity.row(i);
                let mut others: Vec<usize> = (0..row.len()).filter(|&j| j != i).collect();
                others.sort_by(|&a, &b| {
                    row[b]
                        .partial_cmp(&row[a])
                        .unwrap_or(Ordering::Equal)
                        .then(a.cmp(&b))
                });
                others.truncate(size);
                others
            })
            .collect();
        Self { size, neighbours }
    }

    /// Configured number of neighbours per skill.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Neighbours of one skill, most similar first.
    pub fn of(&self, skill: usize) -> &[usize] {
        self.neighbours.get(skill).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The given skills together with all of their neighbours.
    pub fn reachable_from(&self, skills: &[usize]) -> BTreeSet<usize> {
        skills
            .iter()
            .flat_map(|&s| std::iter::once(s).chain(self.of(s).iter().copied()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimilarityMetric;
    use crate::recommend::index::{IndexOptions, SkillIndex};
    use crate::types::FeatureProfiles;

    fn similarity(entries: &[(i64, &[&str])]) -> SimilarityMatrix {
        let profiles: FeatureProfiles = entries
            .iter()
            .map(|(id, skills)| (*id, skills.iter().map(|s| s.to_string()).collect()))
            .collect();
        let index = SkillIndex::build(&profiles, IndexOptions::default());
        SimilarityMatrix::compute(&index, SimilarityMetric::Cosine, 1)
    }

    #[test]
    fn test_best_first_without_self() {
        // a, b, c, d
        let sim = similarity(&[
            (1, &["a", "b", "c"]),
            (2, &["a", "b"]),
            (3, &["a", "d"]),
        ]);
        let hood = Neighbourhood::compute(&sim, 2);
        assert_eq!(hood.of(0), &[1, 2]);
        assert!(!hood.of(1).contains(&1));
        assert_eq!(hood.of(1).len(), 2);
        assert_eq!(hood.of(1)[0], 0);
    }

    #[test]
    fn test_ties_break_by_column() {
        let sim = similarity(&[(1, &["a"]), (2, &["b"]), (3, &["c"])]);
        let hood = Neighbourhood::compute(&sim, 5);
        assert_eq!(hood.of(2), &[0, 1]);
    }

    #[test]
    fn test_reachable_includes_sources() {
        let sim = similarity(&[(1, &["a", "b"]), (2, &["c", "d"])]);
        let hood = Neighbourhood::compute(&sim, 1);
        let reach = hood.reachable_from(&[0]);
        assert_eq!(reach.into_iter().collect::<Vec<_>>(), vec![0, 1]);
        assert!(hood.of(99).is_empty());
        assert_eq!(hood.size(), 1);
    }
}
