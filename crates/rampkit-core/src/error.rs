//! Error handling for RampKit
//!
//! The layout engine itself never fails: every odd input resolves to a
//! well-defined value. Errors only exist at the edges where projects are
//! read from or written to storage.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Project file error type
///
/// Represents problems with the content of a persisted project, as opposed
/// to the I/O needed to reach it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectError {
    /// The file was written by an incompatible schema
    #[error("Unsupported project schema {found} (expected {expected})")]
    UnsupportedSchema {
        /// The schema version found in the file.
        found: u32,
        /// The schema version this build reads.
        expected: u32,
    },

    /// Two objects share an id
    #[error("Duplicate object id: {id}")]
    DuplicateObjectId {
        /// The repeated id.
        id: String,
    },

    /// Structurally invalid project
    #[error("Invalid project: {reason}")]
    InvalidProject {
        /// Why the project was rejected.
        reason: String,
    },
}

/// Main error type for RampKit
///
/// A unified error type used by the fallible public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Project content error
    #[error(transparent)]
    Project(#[from] ProjectError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a project content error
    pub fn is_project_error(&self) -> bool {
        matches!(self, Error::Project(_))
    }

    /// Check if the underlying cause is a missing file
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
