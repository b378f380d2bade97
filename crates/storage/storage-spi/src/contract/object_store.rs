//! Object store trait definition.

use crate::error::Result;

/// Bucket/key blob storage.
///
/// Implementations must make `write` all-or-nothing: a failed write leaves
/// any previous object at `key` untouched.
pub trait ObjectStore: Send + Sync {
    /// Store name, for logs.
    fn name(&self) -> &str;

    /// Replace the object at `bucket/key` with `body`.
    fn write(&self, bucket: &str, key: &str, body: &[u8]) -> Result<()>;

    /// Read the object at `bucket/key`.
    fn read(&self, bucket: &str, key: &str) -> Result<Vec<u8>>;

    /// Whether an object exists at `bucket/key`.
    fn exists(&self, bucket: &str, key: &str) -> Result<bool>;
}
