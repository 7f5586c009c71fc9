//! Plain JSON object mapping employee ids to skill lists.

use crate::error::DatasourceError;
use skillrec_intelligence::{Datasource, SkillProfiles};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Parse `{"775": ["Java", "SQL"], "12": null}`.
pub fn parse_skill_map(path: &Path, contents: &str) -> Result<SkillProfiles, DatasourceError> {
    serde_json::from_str(contents).map_err(|source| DatasourceError::SkillMap {
        path: path.to_path_buf(),
        source,
    })
}

/// Datasource reading a skill map file on every fetch.
#[derive(Debug, Clone)]
pub struct SkillMapFileDatasource {
    path: PathBuf,
}

impl SkillMapFileDatasource {
    /// Use the map stored at `path`. The file is read on fetch.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the map file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the file.
    pub fn load(&self) -> Result<SkillProfiles, DatasourceError> {
        let contents = fs::read_to_string(&self.path).map_err(|source| DatasourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        let profiles = parse_skill_map(&self.path, &contents)?;
        debug!(
            target: "skillrec::datasource",
            path = %self.path.display(),
            employees = profiles.len(),
            "Loaded skill map"
        );
        Ok(profiles)
    }
}

impl Datasource for SkillMapFileDatasource {
    fn skills_by_user(&self) -> anyhow::Result<SkillProfiles> {
        Ok(self.load()?)
    }
}
