//! Storage error types.

use anomaly_spi::AnomalyError;
use thiserror::Error;

/// Object storage and table codec errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No object at the requested location
    #[error("Object not found: {bucket}/{key}")]
    NotFound { bucket: String, key: String },

    /// A bucket or key segment cannot be used
    #[error("Invalid key segment '{segment}': {reason}")]
    InvalidKey { segment: String, reason: String },

    /// Backend I/O failure
    #[error("I/O error: {0}")]
    Io(String),

    /// Malformed delimited text
    #[error("CSV error: {0}")]
    Csv(String),

    /// Table does not satisfy the column contract
    #[error(transparent)]
    Contract(#[from] AnomalyError),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
