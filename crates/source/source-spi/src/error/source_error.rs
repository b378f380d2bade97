//! Source error types.

use thiserror::Error;

/// History source and catalog errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SourceError {
    /// Window end is not after its start
    #[error("Invalid time window: end {end} must be after start {start}")]
    InvalidWindow { start: i64, end: i64 },

    /// Remote request failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to interpret a response or dump
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Entry id does not carry an asset and a point
    #[error("Invalid entry id: {0}")]
    InvalidEntryId(String),

    /// Paging did not terminate
    #[error("Pagination for {entry_id} exceeded {limit} pages")]
    PageLimitExceeded { entry_id: String, limit: usize },
}

/// Result type for source operations.
pub type Result<T> = std::result::Result<T, SourceError>;
