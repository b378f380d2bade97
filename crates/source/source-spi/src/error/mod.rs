//! Error types for history sources.

mod source_error;

pub use source_error::{Result, SourceError};
