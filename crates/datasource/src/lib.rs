//! File-backed skill profile datasources.
//!
//! Two formats are supported:
//! - the people export, pretty-printed employee records written back to back
//!   (see [`people`]);
//! - a JSON object mapping employee ids to skill lists (see [`skill_map`]).
//!
//! # Examples
//!
//! ```
//! use skillrec_datasource::{open_profiles, ProfileFormat};
//! use skillrec_intelligence::Datasource;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let path = dir.path().join("skills.json");
//! std::fs::write(&path, r#"{"1": ["Rust"], "2": null}"#).unwrap();
//!
//! let source = open_profiles(&path, ProfileFormat::Auto).unwrap();
//! assert_eq!(source.skills_by_user().unwrap().len(), 2);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
/// Parser and datasource for the people export.
pub mod people;
/// Parser and datasource for id -> skills maps.
pub mod skill_map;

pub use error::DatasourceError;
pub use people::{parse_people, EmployeeRecord, PeopleFileDatasource};
pub use skill_map::{parse_skill_map, SkillMapFileDatasource};

use skillrec_intelligence::Datasource;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Layout of a profile file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileFormat {
    /// Decide from the file contents.
    #[default]
    Auto,
    /// People export.
    People,
    /// JSON id -> skills map.
    Map,
}

impl ProfileFormat {
    /// Guess the format: people exports carry `employeeId` fields.
    pub fn detect(contents: &str) -> Self {
        if contents.contains("\"employeeId\"") {
            ProfileFormat::People
        } else {
            ProfileFormat::Map
        }
    }
}

impl FromStr for ProfileFormat {
    type Err = DatasourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(ProfileFormat::Auto),
            "people" => Ok(ProfileFormat::People),
            "map" => Ok(ProfileFormat::Map),
            _ => Err(DatasourceError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for ProfileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProfileFormat::Auto => "auto",
            ProfileFormat::People => "people",
            ProfileFormat::Map => "map",
        })
    }
}

/// Open a profile file as a boxed datasource.
pub fn open_profiles(
    path: &Path,
    format: ProfileFormat,
) -> Result<Box<dyn Datasource>, DatasourceError> {
    let format = match format {
        ProfileFormat::Auto => {
            let contents = std::fs::read_to_string(path).map_err(|source| DatasourceError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            ProfileFormat::detect(&contents)
        }
        explicit => explicit,
    };
    tracing::debug!(
        target: "skillrec::datasource",
        path = %path.display(),
        %format,
        "Opening profile file"
    );

    Ok(match format {
        ProfileFormat::People => Box::new(PeopleFileDatasource::open(path)?),
        _ => {
            let source = SkillMapFileDatasource::new(path);
            source.load()?;
            Box::new(source)
        }
    })
}
