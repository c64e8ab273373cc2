//! Engine error types.
//!
//! These errors cover unrecoverable external-dependency failures only
//! (the code-metadata source). Clinical warnings and sequencing errors
//! inside an encode are values on the encode result, never Rust errors.

use thiserror::Error;

/// Errors that can occur loading or serving code metadata.
#[derive(Error, Debug)]
pub enum EngineError {
    /// I/O error reading a metadata file.
    #[error("IO error reading metadata file: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Metadata file not found.
    #[error("Metadata file not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Invalid header - column count mismatch.
    #[error("Invalid metadata header: expected {expected} columns, found {found}")]
    InvalidHeader {
        /// Expected column count.
        expected: usize,
        /// Found column count.
        found: usize,
    },

    /// Unexpected column name.
    #[error("Unexpected column '{found}' at position {position}, expected '{expected}'")]
    UnexpectedColumn {
        /// The column position.
        position: usize,
        /// Expected column name.
        expected: String,
        /// Found column name.
        found: String,
    },

    /// The metadata source failed to initialize.
    #[error("Code metadata source unavailable: {0}")]
    MetadataUnavailable(String),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
