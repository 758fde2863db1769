//! Key Locks
//!
//! Striped mutual exclusion for read-modify-write sequences on a single key.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use parking_lot::{Mutex, MutexGuard};

// == Key Locks ==
/// Fixed set of mutexes; a key always maps to the same stripe.
///
/// Two keys may share a stripe, which only costs some contention. Guards are
/// not reentrant: an operation must take at most one guard at a time.
#[derive(Debug)]
pub struct KeyLocks {
    stripes: Box<[Mutex<()>]>,
}

impl KeyLocks {
    /// Creates `stripes` locks (at least one).
    pub fn new(stripes: usize) -> Self {
        let stripes = (0..stripes.max(1)).map(|_| Mutex::new(())).collect();
        Self { stripes }
    }

    /// Blocks until the stripe owning `key` is free.
    pub fn lock(&self, key: &[u8]) -> MutexGuard<'_, ()> {
        self.stripes[self.stripe_of(key)].lock()
    }

    pub fn stripe_of(&self, key: &[u8]) -> usize {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        (hasher.finish() % self.stripes.len() as u64) as usize
    }
}

impl Default for KeyLocks {
    fn default() -> Self {
        Self::new(super::DEFAULT_LOCK_STRIPES)
    }
}
