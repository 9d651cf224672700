//! Error types for the fio-curate library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for fio-curate operations.
#[derive(Debug, Error)]
pub enum CurateError {
    /// A required file (dictionary, source, run store) does not exist.
    #[error("Not found: '{path}'")]
    NotFound { path: PathBuf },

    /// A run store has no suggestion with this ID.
    #[error("Suggestion '{0}' not found")]
    SuggestionNotFound(String),

    /// Input failed structural validation (e.g. dictionary header).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unknown encoding label or undecodable bytes.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Empty file or no data to read.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A record violating a repository uniqueness constraint.
    #[error("Duplicate record: {0}")]
    Duplicate(String),

    /// Error saving or loading a run store.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl CurateError {
    /// Wrap an IO error with the path it occurred on.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CurateError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for fio-curate operations.
pub type Result<T> = std::result::Result<T, CurateError>;
