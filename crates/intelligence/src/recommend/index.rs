//! Employee x skill-feature matrix.
//!
//! Rows are employee ids in ascending order, columns are the features that
//! survive the rarity filter in lexicographic order. Both orders are fixed so
//! the same input and configuration always yield the same matrix.

use super::matrix::DenseMatrix;
use crate::config::RecommenderConfig;
use crate::types::{EmployeeId, FeatureProfiles};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Options controlling how the index is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOptions {
    /// Minimum number of distinct employees a feature must appear in.
    pub rarest_allowed_skill: usize,
    /// Collapse counts to presence.
    pub use_binary: bool,
    /// Divide every non-zero row by its Euclidean norm.
    pub normalize: bool,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            rarest_allowed_skill: 1,
            use_binary: true,
            normalize: false,
        }
    }
}

impl From<&RecommenderConfig> for IndexOptions {
    fn from(config: &RecommenderConfig) -> Self {
        Self {
            rarest_allowed_skill: config.rarest_allowed_skill,
            use_binary: config.use_binary,
            normalize: config.normalize_skill_vectors,
        }
    }
}

/// Summary numbers about a built index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndexStats {
    /// Number of rows.
    pub employees: usize,
    /// Number of columns after rarity filtering.
    pub features: usize,
    /// Distinct features removed by the rarity filter.
    pub dropped_rare: usize,
    /// Share of non-zero cells, 0.0 for an empty matrix.
    pub density: f64,
}

/// Features appearing in at least `threshold` distinct employee profiles,
/// in lexicographic order.
///
/// A threshold of 0 or 1 keeps every feature.
pub fn rarity_filter(profiles: &FeatureProfiles, threshold: usize) -> BTreeSet<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for features in profiles.values() {
        let distinct: HashSet<&str> = features.iter().map(String::as_str).collect();
        for feature in distinct {
            *counts.entry(feature).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .filter(|&(_, count)| count >= threshold)
        .map(|(feature, _)| feature.to_string())
        .collect()
}

/// Employee x feature matrix with id <-> index lookups.
#[derive(Debug, Clone)]
pub struct SkillIndex {
    employees: Vec<EmployeeId>,
    employee_rows: HashMap<EmployeeId, usize>,
    skills: Vec<String>,
    skill_columns: HashMap<String, usize>,
    values: DenseMatrix,
    dropped_rare: usize,
}

impl SkillIndex {
    /// Build the index from processed feature profiles.
    pub fn build(profiles: &FeatureProfiles, options: IndexOptions) -> Self {
        let all_features: HashSet<&str> = profiles
            .values()
            .flat_map(|features| features.iter().map(String::as_str))
            .collect();
        let kept = rarity_filter(profiles, options.rarest_allowed_skill);
        let dropped_rare = all_features.len() - kept.len();

        let skills: Vec<String> = kept.into_iter().collect();
        let skill_columns: HashMap<String, usize> = skills
            .iter()
            .enumerate()
            .map(|(col, skill)| (skill.clone(), col))
            .collect();

        // BTreeMap keys are already ascending.
        let employees: Vec<EmployeeId> = profiles.keys().copied().collect();
        let employee_rows: HashMap<EmployeeId, usize> = employees
            .iter()
            .enumerate()
            .map(|(row, &id)| (id, row))
            .collect();

        let mut values = DenseMatrix::zeros(employees.len(), skills.len());
        for (row, features) in profiles.values().enumerate() {
            for feature in features {
                if let Some(&col) = skill_columns.get(feature) {
                    let current = values.get(row, col);
                    let next = if options.use_binary { 1.0 } else { current + 1.0 };
                    values.set(row, col, next);
                }
            }
            if options.normalize {
                normalize_row(values.row_mut(row));
            }
        }

        Self {
            employees,
            employee_rows,
            skills,
            skill_columns,
            values,
            dropped_rare,
        }
    }

    /// Employee ids in row order.
    pub fn employees(&self) -> &[EmployeeId] {
        &self.employees
    }

    /// Feature names in column order.
    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    /// Feature name of a column.
    pub fn skill_name(&self, col: usize) -> &str {
        &self.skills[col]
    }

    /// Column of a feature, if it survived filtering.
    pub fn skill_column(&self, skill: &str) -> Option<usize> {
        self.skill_columns.get(skill).copied()
    }

    /// Row of an employee, if present.
    pub fn employee_row(&self, employee_id: EmployeeId) -> Option<usize> {
        self.employee_rows.get(&employee_id).copied()
    }

    /// The employee's weight vector.
    pub fn weights(&self, employee_id: EmployeeId) -> Option<&[f64]> {
        self.employee_row(employee_id).map(|row| self.values.row(row))
    }

    /// Value of one cell; zero when either id is unknown.
    pub fn value(&self, employee_id: EmployeeId, skill: &str) -> f64 {
        match (self.employee_row(employee_id), self.skill_column(skill)) {
            (Some(row), Some(col)) => self.values.get(row, col),
            _ => 0.0,
        }
    }

    /// Columns with positive weight for the employee, ascending.
    pub fn known_columns(&self, employee_id: EmployeeId) -> Vec<usize> {
        self.weights(employee_id)
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter(|&(_, &w)| w > 0.0)
                    .map(|(col, _)| col)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Underlying matrix.
    pub fn matrix(&self) -> &DenseMatrix {
        &self.values
    }

    /// Size and sparsity figures.
    pub fn stats(&self) -> IndexStats {
        let cells = self.values.rows() * self.values.cols();
        let non_zero = self.values.values().filter(|&v| v != 0.0).count();
        IndexStats {
            employees: self.employees.len(),
            features: self.skills.len(),
            dropped_rare: self.dropped_rare,
            density: if cells == 0 {
                0.0
            } else {
                non_zero as f64 / cells as f64
            },
        }
    }
}

/// Scale a row to unit length; all-zero rows stay zero.
fn normalize_row(row: &mut [f64]) {
    let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm > 0.0 {
        for v in row.iter_mut() {
            *v /= norm;
        }
    }
}
