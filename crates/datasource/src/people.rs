//! The "people" export: pretty-printed JSON objects written back to back.
//!
//! Each employee record ends with a line whose first character is `}`.
//! Nested objects are indented, so only the record's own closing brace
//! starts at column 0.

use crate::error::DatasourceError;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use skillrec_intelligence::{Datasource, EmployeeId, SkillProfiles};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One employee as exported by the people system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    /// Employee identifier.
    pub employee_id: EmployeeId,
    /// Job title.
    #[serde(default)]
    pub role: Option<String>,
    /// Free-text skills; `None` when the employee never filled them in.
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    /// Skills the employee would like to learn.
    #[serde(default)]
    pub wishes: Option<Vec<String>>,
}

/// Parse the contents of a people export.
///
/// `path` is used for error messages only. Later records with a repeated
/// `employeeId` replace earlier ones.
pub fn parse_people(
    path: &Path,
    contents: &str,
) -> Result<BTreeMap<EmployeeId, EmployeeRecord>, DatasourceError> {
    let mut records = BTreeMap::new();
    let mut buffer = String::new();
    let mut start_line = 1;

    for (idx, line) in contents.lines().enumerate() {
        let line_no = idx + 1;
        if buffer.trim().is_empty() {
            start_line = line_no;
        }
        if line.starts_with('}') {
            buffer.push('}');
            let record = parse_record(path, start_line, &buffer)?;
            records.insert(record.employee_id, record);
            buffer.clear();
        } else {
            buffer.push_str(line);
            buffer.push('\n');
        }
    }

    if !buffer.trim().is_empty() {
        return Err(DatasourceError::Unterminated {
            path: path.to_path_buf(),
            line: start_line,
        });
    }
    Ok(records)
}

fn parse_record(path: &Path, line: usize, text: &str) -> Result<EmployeeRecord, DatasourceError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|source| DatasourceError::Record {
            path: path.to_path_buf(),
            line,
            source,
        })?;
    if value.get("employeeId").and_then(serde_json::Value::as_i64).is_none() {
        return Err(DatasourceError::MissingEmployeeId {
            path: path.to_path_buf(),
            line,
        });
    }
    serde_json::from_value(value).map_err(|source| DatasourceError::Record {
        path: path.to_path_buf(),
        line,
        source,
    })
}

/// Datasource reading a people export from disk.
///
/// The file is re-read on every [`Datasource::skills_by_user`] call; the
/// records from the latest read back [`user_info`](Self::user_info).
#[derive(Debug)]
pub struct PeopleFileDatasource {
    path: PathBuf,
    records: RwLock<BTreeMap<EmployeeId, EmployeeRecord>>,
}

impl PeopleFileDatasource {
    /// Open and parse a people export.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, DatasourceError> {
        let path = path.into();
        let records = Self::read(&path)?;
        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }

    fn read(path: &Path) -> Result<BTreeMap<EmployeeId, EmployeeRecord>, DatasourceError> {
        let contents = fs::read_to_string(path).map_err(|source| DatasourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let records = parse_people(path, &contents)?;
        debug!(
            target: "skillrec::datasource",
            path = %path.display(),
            employees = records.len(),
            "Loaded people export"
        );
        Ok(records)
    }

    /// Path of the export.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full record for one employee.
    pub fn user_info(&self, employee_id: EmployeeId) -> Option<EmployeeRecord> {
        self.records.read().get(&employee_id).cloned()
    }

    /// Number of employees in the last read.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// True when the last read found no employees.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl Datasource for PeopleFileDatasource {
    fn skills_by_user(&self) -> anyhow::Result<SkillProfiles> {
        let records = Self::read(&self.path)?;
        let profiles = records
            .iter()
            .map(|(&id, record)| (id, record.skills.clone()))
            .collect();
        *self.records.write() = records;
        Ok(profiles)
    }
}
