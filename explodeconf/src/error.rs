//! Error types for document and group operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors reported by the document engine.
///
/// Lookup misses are not errors; see [`crate::data::Document::get`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The source text is not a well-formed document.
    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The in-memory tree could not be written in the target format.
    #[error("failed to serialize document: {0}")]
    Serialize(String),

    /// An existing node on the path cannot be descended into.
    #[error("path conflict at `{path}`: {reason}")]
    PathConflict { path: String, reason: String },

    /// The path does not resolve to an existing node.
    #[error("path `{0}` not found")]
    PathNotFound(String),

    /// The path has no segments where at least one is required.
    #[error("invalid path `{0}`")]
    InvalidPath(String),

    /// No entry with this name exists under `Groups`.
    #[error("group `{0}` does not exist")]
    GroupNotFound(String),

    /// A node exists but has the wrong shape for the operation.
    #[error("type mismatch at `{path}`: expected {expected}, found {actual}")]
    TypeMismatch {
        path: String,
        expected: String,
        actual: String,
    },

    /// A group with this name already exists.
    #[error("group `{0}` already exists")]
    DuplicateName(String),

    /// A group name was rejected before any change was made.
    #[error("invalid group name: {0}")]
    InvalidName(String),

    /// The operation needs an open document.
    #[error("no configuration file loaded")]
    NotLoaded,
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn type_mismatch(
        path: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        ConfigError::TypeMismatch {
            path: path.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}
