//! Store Adapter Trait
//!
//! The entire surface the cache layer needs from a key-value engine.

use std::sync::Arc;

use crate::error::StoreError;

// == Store Adapter ==
/// Point operations against a durable key-value engine.
///
/// Engine-specific "not found" signals are folded into `Ok(None)` so that
/// everything above this trait sees a single absent outcome.
pub trait StoreAdapter: Send + Sync {
    /// Returns the raw bytes stored under `key`, or `None` if absent.
    fn raw_get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn raw_put(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn raw_delete(&self, key: &[u8]) -> Result<(), StoreError>;

    /// Returns whether any value is stored under `key`.
    fn raw_exists(&self, key: &[u8]) -> Result<bool, StoreError> {
        Ok(self.raw_get(key)?.is_some())
    }

    /// Releases the engine. No operation is possible afterwards.
    fn close(self) -> Result<(), StoreError>
    where
        Self: Sized,
    {
        Ok(())
    }
}

impl<S: StoreAdapter + ?Sized> StoreAdapter for Arc<S> {
    fn raw_get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).raw_get(key)
    }

    fn raw_put(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        (**self).raw_put(key, value)
    }

    fn raw_delete(&self, key: &[u8]) -> Result<(), StoreError> {
        (**self).raw_delete(key)
    }

    fn raw_exists(&self, key: &[u8]) -> Result<bool, StoreError> {
        (**self).raw_exists(key)
    }
}
