//! Source of raw skill profiles.

use crate::types::{EmployeeId, SkillProfiles};
use std::sync::Arc;

/// Provides raw per-employee skill lists.
///
/// Called once per engine initialization and on every refresh.
pub trait Datasource: Send + Sync {
    /// Fetch all profiles. Employees without skill data map to `None`.
    fn skills_by_user(&self) -> anyhow::Result<SkillProfiles>;
}

impl<D: Datasource + ?Sized> Datasource for Arc<D> {
    fn skills_by_user(&self) -> anyhow::Result<SkillProfiles> {
        (**self).skills_by_user()
    }
}

impl<D: Datasource + ?Sized> Datasource for Box<D> {
    fn skills_by_user(&self) -> anyhow::Result<SkillProfiles> {
        (**self).skills_by_user()
    }
}

/// Datasource backed by a map held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDatasource {
    profiles: SkillProfiles,
}

impl InMemoryDatasource {
    /// Wrap existing profiles.
    pub fn new(profiles: SkillProfiles) -> Self {
        Self { profiles }
    }

    /// Add or replace one employee's skills.
    pub fn with_employee<I, S>(mut self, employee_id: EmployeeId, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.profiles
            .insert(employee_id, Some(skills.into_iter().map(Into::into).collect()));
        self
    }

    /// Add an employee with no skill data.
    pub fn with_missing(mut self, employee_id: EmployeeId) -> Self {
        self.profiles.insert(employee_id, None);
        self
    }
}

impl Datasource for InMemoryDatasource {
    fn skills_by_user(&self) -> anyhow::Result<SkillProfiles> {
        Ok(self.profiles.clone())
    }
}
