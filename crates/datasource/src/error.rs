use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading profile files.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DatasourceError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A people record is not valid JSON or has the wrong shape.
    #[error("invalid employee record at line {line} of {}: {source}", path.display())]
    Record {
        /// File being read.
        path: PathBuf,
        /// First line of the record (1-based).
        line: usize,
        /// Parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A people record has no integer `employeeId`.
    #[error("employee record at line {line} of {} has no employeeId", path.display())]
    MissingEmployeeId {
        /// File being read.
        path: PathBuf,
        /// First line of the record (1-based).
        line: usize,
    },

    /// The file ends inside a record.
    #[error("unterminated employee record at line {line} of {}", path.display())]
    Unterminated {
        /// File being read.
        path: PathBuf,
        /// First line of the record (1-based).
        line: usize,
    },

    /// A skill map file is not a JSON object of id -> skills.
    #[error("invalid skill map {}: {source}", path.display())]
    SkillMap {
        /// File being read.
        path: PathBuf,
        /// Parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Unrecognized `--format` value.
    #[error("unknown profile format {0:?} (expected people, map or auto)")]
    UnknownFormat(String),
}
