//! Filesystem-backed object store.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use storage_spi::{validate_segment, ObjectStore, Result, StorageError};
use tempfile::NamedTempFile;
use tracing::debug;

/// Stores `bucket/key` at `<root>/<bucket>/<key>`.
///
/// Writes go to a temp file in the destination directory and are renamed
/// into place, so readers never observe a partially written object.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, bucket: &str, key: &str) -> Result<PathBuf> {
        let mut path = self.root.join(validate_segment(bucket)?);
        for segment in key.split('/') {
            path.push(validate_segment(segment)?);
        }
        Ok(path)
    }
}

impl ObjectStore for LocalObjectStore {
    fn name(&self) -> &str {
        "local"
    }

    fn write(&self, bucket: &str, key: &str, body: &[u8]) -> Result<()> {
        let path = self.path_for(bucket, key)?;
        let parent = path
            .parent()
            .ok_or_else(|| StorageError::Io(format!("no parent directory for {}", path.display())))?;
        fs::create_dir_all(parent)?;

        let mut tmp = NamedTempFile::new_in(parent)?;
        tmp.write_all(body)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| StorageError::Io(e.error.to_string()))?;

        debug!(bucket, key, bytes = body.len(), "object written");
        Ok(())
    }

    fn read(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let path = self.path_for(bucket, key)?;
        fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StorageError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            },
            _ => StorageError::from(e),
        })
    }

    fn exists(&self, bucket: &str, key: &str) -> Result<bool> {
        Ok(self.path_for(bucket, key)?.is_file())
    }
}
