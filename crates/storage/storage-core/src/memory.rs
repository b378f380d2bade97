//! In-process object store.

use std::collections::BTreeMap;
use std::sync::RwLock;

use storage_spi::{ObjectStore, Result, StorageError};

type Objects = BTreeMap<(String, String), Vec<u8>>;

/// Object store held in memory. Each instance is independent.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    objects: RwLock<Objects>,
}

fn poisoned() -> StorageError {
    StorageError::Io("memory store lock poisoned".to_string())
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys held in `bucket`, sorted.
    pub fn keys(&self, bucket: &str) -> Result<Vec<String>> {
        let objects = self.objects.read().map_err(|_| poisoned())?;
        Ok(objects
            .keys()
            .filter(|(b, _)| b == bucket)
            .map(|(_, k)| k.clone())
            .collect())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.objects.read().map_err(|_| poisoned())?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl ObjectStore for MemoryObjectStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn write(&self, bucket: &str, key: &str, body: &[u8]) -> Result<()> {
        let mut objects = self.objects.write().map_err(|_| poisoned())?;
        objects.insert((bucket.to_string(), key.to_string()), body.to_vec());
        Ok(())
    }

    fn read(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let objects = self.objects.read().map_err(|_| poisoned())?;
        objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| StorageError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })
    }

    fn exists(&self, bucket: &str, key: &str) -> Result<bool> {
        let objects = self.objects.read().map_err(|_| poisoned())?;
        Ok(objects.contains_key(&(bucket.to_string(), key.to_string())))
    }
}
