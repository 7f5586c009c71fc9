//! Per-employee record of skills already suggested.

use crate::types::EmployeeId;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

/// Skills previously suggested to each employee.
///
/// Recorded skills are excluded from later recommendations until the
/// history is cleared. Reads never create entries.
#[derive(Debug, Default)]
pub struct RecommendationHistory {
    entries: Mutex<HashMap<EmployeeId, HashSet<String>>>,
}

impl RecommendationHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one skill to an employee's exclusion set.
    pub fn record(&self, employee_id: EmployeeId, skill: impl Into<String>) {
        self.entries
            .lock()
            .entry(employee_id)
            .or_default()
            .insert(skill.into());
    }

    /// Copy of an employee's exclusion set; empty when nothing was recorded.
    pub fn get_or_empty(&self, employee_id: EmployeeId) -> HashSet<String> {
        self.entries
            .lock()
            .get(&employee_id)
            .cloned()
            .unwrap_or_default()
    }

    /// True if the skill was recorded for the employee.
    pub fn contains(&self, employee_id: EmployeeId, skill: &str) -> bool {
        self.entries
            .lock()
            .get(&employee_id)
            .is_some_and(|set| set.contains(skill))
    }

    /// Forget every employee's history.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Number of employees with recorded skills.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// True when nothing is recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
