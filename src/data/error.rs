//! Error types for data operations
//!
//! Provides unified error handling for loading and settings operations.
//! The parser and the pipeline stages never produce these; they degrade to
//! empty or placeholder output instead.

use thiserror::Error;

/// Errors that can occur while loading a dataset or its settings
#[derive(Error, Debug)]
pub enum DataError {
    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error from serde_json
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Source text contained no header row
    #[error("Empty file")]
    EmptyFile,

    /// Header row had no usable column names
    #[error("No columns found")]
    NoColumns,

    /// A column the normalizer depends on is not in the header
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// Every record was rejected by the normalizer
    #[error("No usable rows ({rejected} records rejected)")]
    NoRows { rejected: usize },
}

/// Result type alias for data operations
pub type DataResult<T> = Result<T, DataError>;
