//! In-memory engine, ordered like the on-disk one.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use super::StoreAdapter;
use crate::error::StoreError;

/// Non-persistent [`StoreAdapter`] for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of raw keys currently held, expired or not.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl StoreAdapter for MemoryStore {
    fn raw_get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn raw_put(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.entries.write().insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn raw_delete(&self, key: &[u8]) -> Result<(), StoreError> {
        self.entries.write().remove(key);
        Ok(())
    }

    fn raw_exists(&self, key: &[u8]) -> Result<bool, StoreError> {
        Ok(self.entries.read().contains_key(key))
    }
}
