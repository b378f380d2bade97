//! Error types for object storage.

mod storage_error;

pub use storage_error::{Result, StorageError};
