//! Pairwise similarity between skill columns.
//!
//! Supports cosine, Jaccard-style (share of matching rows after
//! binarization), raw dot product and adjusted cosine. Rows and columns of
//! the result follow the column order of the [`SkillIndex`].

use super::index::SkillIndex;
use super::matrix::DenseMatrix;
use crate::config::SimilarityMetric;
use rayon::prelude::*;
use tracing::warn;

/// Symmetric skill x skill similarity matrix.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    values: DenseMatrix,
    row_sums: Vec<f64>,
}

struct Columns {
    data: Vec<Vec<f64>>,
    norms: Vec<f64>,
    rows: usize,
}

impl Columns {
    fn new(index: &SkillIndex, metric: SimilarityMetric) -> Self {
        let mut data = index.matrix().columns();
        if matches!(metric, SimilarityMetric::Jaccard) {
            for column in &mut data {
                for v in column.iter_mut() {
                    *v = if *v > 0.0 { 1.0 } else { 0.0 };
                }
            }
        }
        let norms = data
            .iter()
            .map(|c| c.iter().map(|v| v * v).sum::<f64>().sqrt())
            .collect();
        Self {
            data,
            norms,
            rows: index.matrix().rows(),
        }
    }

    fn dot(&self, i: usize, j: usize) -> f64 {
        self.data[i]
            .iter()
            .zip(&self.data[j])
            .map(|(a, b)| a * b)
            .sum()
    }

    fn cosine(&self, i: usize, j: usize) -> f64 {
        let (ni, nj) = (self.norms[i], self.norms[j]);
        if ni == 0.0 || nj == 0.0 {
            return 0.0;
        }
        if i == j {
            return 1.0;
        }
        (self.dot(i, j) / (ni * nj)).clamp(-1.0, 1.0)
    }

    fn pair(&self, metric: SimilarityMetric, i: usize, j: usize) -> f64 {
        match metric {
            SimilarityMetric::Cosine => self.cosine(i, j),
            SimilarityMetric::Jaccard => {
                if self.rows == 0 {
                    return 0.0;
                }
                let equal = self.data[i]
                    .iter()
                    .zip(&self.data[j])
                    .filter(|(a, b)| a == b)
                    .count();
                equal as f64 / self.rows as f64
            }
            SimilarityMetric::Dot => self.dot(i, j),
            SimilarityMetric::AdjustedCosine { alpha } => {
                let magnitude = self.norms[i] * self.norms[j];
                if magnitude == 0.0 {
                    return 0.0;
                }
                magnitude.powf(alpha) * (1.0 - self.cosine(i, j))
            }
        }
    }

    fn upper_row(&self, metric: SimilarityMetric, i: usize) -> Vec<f64> {
        (i..self.data.len()).map(|j| self.pair(metric, i, j)).collect()
    }
}

impl SimilarityMatrix {
    /// Compute the matrix for every pair of index columns.
    ///
    /// With `workers > 1` rows are computed on a dedicated rayon pool of that
    /// size; otherwise the work runs on the calling thread.
    pub fn compute(index: &SkillIndex, metric: SimilarityMetric, workers: usize) -> Self {
        let columns = Columns::new(index, metric);
        let n = columns.data.len();

        let upper: Vec<Vec<f64>> = if workers > 1 && n > 1 {
            match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
                Ok(pool) => pool.install(|| {
                    (0..n)
                        .into_par_iter()
                        .map(|i| columns.upper_row(metric, i))
                        .collect()
                }),
                Err(err) => {
                    warn!(
                        target: "skillrec::similarity",
                        workers,
                        error = %err,
                        "Could not start worker pool, computing sequentially"
                    );
                    (0..n).map(|i| columns.upper_row(metric, i)).collect()
                }
            }
        } else {
            (0..n).map(|i| columns.upper_row(metric, i)).collect()
        };

        let mut values = DenseMatrix::zeros(n, n);
        for (i, row) in upper.into_iter().enumerate() {
            for (offset, value) in row.into_iter().enumerate() {
                let j = i + offset;
                values.set(i, j, value);
                values.set(j, i, value);
            }
        }
        let row_sums = (0..n).map(|i| values.row(i).iter().sum()).collect();

        Self { values, row_sums }
    }

    /// Number of skills on each side.
    pub fn len(&self) -> usize {
        self.values.rows()
    }

    /// True for a matrix over no skills.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Similarity of two skill columns.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values.get(i, j)
    }

    /// Similarities of one skill to every skill.
    pub fn row(&self, i: usize) -> &[f64] {
        self.values.row(i)
    }

    /// Sum of one row.
    pub fn row_sum(&self, i: usize) -> f64 {
        self.row_sums[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommend::index::IndexOptions;
    use crate::types::FeatureProfiles;

    fn index(entries: &[(i64, &[&str])], options: IndexOptions) -> SkillIndex {
        let profiles: FeatureProfiles = entries
            .iter()
            .map(|(id, skills)| (*id, skills.iter().map(|s| s.to_string()).collect()))
            .collect();
        SkillIndex::build(&profiles, options)
    }

    fn sample() -> SkillIndex {
        // columns: angular, js, python
        index(
            &[(1, &["js", "angular"]), (2, &["js"]), (3, &["python"])],
            IndexOptions::default(),
        )
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_cosine() {
        let sim = SimilarityMatrix::compute(&sample(), SimilarityMetric::Cosine, 1);
        assert_eq!(sim.len(), 3);
        assert!(approx(sim.get(0, 1), 1.0 / 2f64.sqrt()));
        assert_eq!(sim.get(1, 2), 0.0);
        assert!(sim.get(0, 1) > sim.get(1, 2));
        for i in 0..3 {
            assert_eq!(sim.get(i, i), 1.0);
        }
    }

    #[test]
    fn test_jaccard_counts_matching_rows() {
        let sim = SimilarityMatrix::compute(&sample(), SimilarityMetric::Jaccard, 1);
        // angular=[1,0,0], js=[1,1,0]: rows 1 and 3 match
        assert!(approx(sim.get(0, 1), 2.0 / 3.0));
        // js vs python=[0,0,1]: no row matches
        assert!(approx(sim.get(1, 2), 0.0));
        assert!(approx(sim.get(2, 2), 1.0));
    }

    #[test]
    fn test_jaccard_binarizes_counts() {
        let idx = index(
            &[(1, &["a", "a", "b"]), (2, &["a", "b"])],
            IndexOptions {
                use_binary: false,
                ..Default::default()
            },
        );
        let sim = SimilarityMatrix::compute(&idx, SimilarityMetric::Jaccard, 1);
        assert!(approx(sim.get(0, 1), 1.0));
    }

    #[test]
    fn test_dot_is_unnormalized() {
        let idx = index(
            &[(1, &["a", "a", "b"]), (2, &["a", "b"])],
            IndexOptions {
                use_binary: false,
                ..Default::default()
            },
        );
        let sim = SimilarityMatrix::compute(&idx, SimilarityMetric::Dot, 1);
        assert!(approx(sim.get(0, 1), 3.0));
        assert!(approx(sim.get(0, 0), 5.0));
    }

    #[test]
    fn test_adjusted_cosine() {
        let sim = SimilarityMatrix::compute(
            &sample(),
            SimilarityMetric::AdjustedCosine { alpha: 1.0 },
            1,
        );
        let cos = 1.0 / 2f64.sqrt();
        assert!(approx(sim.get(0, 1), 2f64.sqrt() * (1.0 - cos)));
        assert!(approx(sim.get(1, 2), 2f64.sqrt()));
        assert_eq!(sim.get(0, 0), 0.0);
    }

    #[test]
    fn test_symmetric_and_row_sums() {
        let sim = SimilarityMatrix::compute(&sample(), SimilarityMetric::Cosine, 1);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(sim.get(i, j), sim.get(j, i));
            }
            assert!(approx(sim.row_sum(i), sim.row(i).iter().sum()));
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let idx = index(
            &[
                (1, &["a", "b", "c"]),
                (2, &["b", "c", "d"]),
                (3, &["a", "d", "e"]),
                (4, &["e", "f"]),
            ],
            IndexOptions::default(),
        );
        let one = SimilarityMatrix::compute(&idx, SimilarityMetric::Cosine, 1);
        let many = SimilarityMatrix::compute(&idx, SimilarityMetric::Cosine, 4);
        for i in 0..one.len() {
            assert_eq!(one.row(i), many.row(i));
        }
    }

    #[test]
    fn test_empty_index() {
        let idx = index(&[], IndexOptions::default());
        let sim = SimilarityMatrix::compute(&idx, SimilarityMetric::Cosine, 2);
        assert!(sim.is_empty());
    }
}
