//! TTL Cache Module
//!
//! Redis-like command surface over a [`StoreAdapter`]: expiring values with
//! lazy deletion, TTL queries, expiry updates and integer counters.
//!
//! Every operation touches exactly one key, reads the clock once, and never
//! holds an entry in memory between calls. Writes to a key are serialized
//! through [`KeyLocks`], so concurrent increments on a shared cache do not
//! lose updates.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::clock::{Clock, SystemClock};
use super::codec;
use super::stats::StatsRecorder;
use super::{CacheEntry, CacheStats, KeyLocks, DEFAULT_LOCK_STRIPES};
use crate::error::{display_key, CacheError, Result, StoreError};
use crate::store::StoreAdapter;

// == Ttl ==
/// Result of a TTL query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ttl {
    /// No live entry (never written, deleted, or expired)
    Absent,
    /// Live entry without expiry
    Persistent,
    /// Live entry expiring in this many whole seconds
    Remaining(u64),
}

impl Ttl {
    /// Redis-style integer reply: `-2` absent, `-1` no expiry, otherwise seconds left.
    pub fn code(self) -> i64 {
        match self {
            Ttl::Absent => -2,
            Ttl::Persistent => -1,
            Ttl::Remaining(secs) => i64::try_from(secs).unwrap_or(i64::MAX),
        }
    }
}

// == TTL Cache ==
/// Envelope-aware cache over a raw key-value store.
#[derive(Debug)]
pub struct TtlCache<S, C = SystemClock> {
    store: S,
    clock: C,
    locks: KeyLocks,
    stats: StatsRecorder,
}

impl<S: StoreAdapter> TtlCache<S, SystemClock> {
    // == Constructor ==
    /// Creates a cache using the wall clock.
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: StoreAdapter, C: Clock> TtlCache<S, C> {
    /// Creates a cache reading time from `clock`.
    pub fn with_clock(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            locks: KeyLocks::new(DEFAULT_LOCK_STRIPES),
            stats: StatsRecorder::default(),
        }
    }

    /// Replaces the key lock set with one of `stripes` locks.
    pub fn with_lock_stripes(mut self, stripes: usize) -> Self {
        self.locks = KeyLocks::new(stripes);
        self
    }

    // == Set ==
    /// Stores `value` with no expiry, replacing any previous entry.
    pub fn set(&self, key: impl AsRef<[u8]>, value: impl AsRef<[u8]>) -> Result<()> {
        self.set_with_ttl(key, value, 0)
    }

    /// Stores `value` expiring `ttl_seconds` from now.
    ///
    /// A TTL of zero or less stores the value without expiry.
    pub fn set_with_ttl(
        &self,
        key: impl AsRef<[u8]>,
        value: impl AsRef<[u8]>,
        ttl_seconds: i64,
    ) -> Result<()> {
        let key = key.as_ref();
        let now = self.clock.now();
        let entry = CacheEntry::with_ttl(value.as_ref().to_vec(), now, ttl_seconds);

        let _guard = self.locks.lock(key);
        self.write_entry(key, &entry)?;
        debug!(key = %display_key(key), expires_at = entry.expires_at, "set");
        Ok(())
    }

    /// [`set_with_ttl`](Self::set_with_ttl) taking a `Duration`, rounded up to
    /// whole seconds so a sub-second TTL still expires.
    pub fn set_with_ttl_duration(
        &self,
        key: impl AsRef<[u8]>,
        value: impl AsRef<[u8]>,
        ttl: Duration,
    ) -> Result<()> {
        self.set_with_ttl(key, value, duration_secs(ttl))
    }

    // == Get ==
    /// Returns the live payload for `key`, or `None` if absent or expired.
    ///
    /// An expired entry is deleted from the store as part of this call.
    pub fn get(&self, key: impl AsRef<[u8]>) -> Result<Option<Vec<u8>>> {
        let key = key.as_ref();
        let now = self.clock.now();

        let raw = match self.store.raw_get(key)? {
            Some(raw) if !raw.is_empty() => raw,
            _ => {
                self.stats.record_miss();
                return Ok(None);
            }
        };

        let entry = self.decode(key, &raw)?;
        if entry.is_expired(now) {
            self.evict_expired(key, now)?;
            self.stats.record_miss();
            return Ok(None);
        }

        self.stats.record_hit();
        Ok(Some(entry.data))
    }

    /// [`get`](Self::get) decoded as UTF-8 text.
    pub fn get_string(&self, key: impl AsRef<[u8]>) -> Result<Option<String>> {
        let key = key.as_ref();
        match self.get(key)? {
            Some(data) => String::from_utf8(data)
                .map(Some)
                .map_err(|source| CacheError::Utf8 {
                    key: display_key(key),
                    source,
                }),
            None => Ok(None),
        }
    }

    // == TTL ==
    /// Reports the remaining lifetime of `key` without modifying it.
    pub fn ttl(&self, key: impl AsRef<[u8]>) -> Result<Ttl> {
        let key = key.as_ref();
        let now = self.clock.now();

        let Some(entry) = self.read_entry(key)? else {
            return Ok(Ttl::Absent);
        };

        if entry.is_expired(now) {
            return Ok(Ttl::Absent);
        }
        Ok(match entry.ttl_remaining(now) {
            Some(secs) => Ttl::Remaining(secs),
            None => Ttl::Persistent,
        })
    }

    // == Expire ==
    /// Sets the expiry of an existing key to `ttl_seconds` from now.
    ///
    /// The previous expiry is overwritten, not extended. A TTL of zero or
    /// less removes the expiry. Returns `false` without writing when the key
    /// is absent or already expired.
    pub fn expire(&self, key: impl AsRef<[u8]>, ttl_seconds: i64) -> Result<bool> {
        let key = key.as_ref();
        let now = self.clock.now();
        self.update_expiry(key, now, |entry| entry.set_ttl(now, ttl_seconds))
    }

    /// [`expire`](Self::expire) taking a `Duration`, rounded up to whole seconds.
    pub fn expire_duration(&self, key: impl AsRef<[u8]>, ttl: Duration) -> Result<bool> {
        self.expire(key, duration_secs(ttl))
    }

    /// Sets the expiry of an existing key to the absolute instant `at`.
    ///
    /// An instant in the past leaves the key expired; the next `get` removes it.
    pub fn expire_at(&self, key: impl AsRef<[u8]>, at: DateTime<Utc>) -> Result<bool> {
        let key = key.as_ref();
        let now = self.clock.now();
        let expires_at = at.timestamp().max(0);
        self.update_expiry(key, now, |entry| entry.expires_at = expires_at)
    }

    /// Removes the expiry of an existing key.
    pub fn persist(&self, key: impl AsRef<[u8]>) -> Result<bool> {
        self.expire(key, 0)
    }

    // == Counters ==
    /// Adds `delta` to the integer stored at `key` and returns the new value.
    ///
    /// An absent or expired key starts from 0 with no expiry. The existing
    /// expiry and creation time are preserved. Arithmetic wraps on overflow.
    pub fn increment_by(&self, key: impl AsRef<[u8]>, delta: i64) -> Result<i64> {
        let key = key.as_ref();
        let now = self.clock.now();

        let _guard = self.locks.lock(key);
        let (current, mut entry) = match self.read_entry(key)? {
            Some(entry) if !entry.is_expired(now) => (self.parse_counter(key, &entry.data)?, entry),
            _ => (0, CacheEntry::new(Vec::new(), now)),
        };

        let value = current.wrapping_add(delta);
        entry.data = value.to_string().into_bytes();
        self.write_entry(key, &entry)?;

        debug!(key = %display_key(key), delta, value, "increment");
        Ok(value)
    }

    /// Subtracts `delta`; same as `increment_by(key, -delta)`.
    pub fn decrement_by(&self, key: impl AsRef<[u8]>, delta: i64) -> Result<i64> {
        self.increment_by(key, delta.wrapping_neg())
    }

    /// Adds 1 to the counter at `key`.
    pub fn incr(&self, key: impl AsRef<[u8]>) -> Result<i64> {
        self.increment_by(key, 1)
    }

    /// Subtracts 1 from the counter at `key`.
    pub fn decr(&self, key: impl AsRef<[u8]>) -> Result<i64> {
        self.decrement_by(key, 1)
    }

    // == Delete / Exists ==
    /// Removes `key` whether or not it has expired.
    pub fn delete(&self, key: impl AsRef<[u8]>) -> Result<()> {
        let key = key.as_ref();
        let _guard = self.locks.lock(key);
        self.store.raw_delete(key)?;
        Ok(())
    }

    /// Returns true if `key` holds a live entry. Does not remove expired entries.
    pub fn exists(&self, key: impl AsRef<[u8]>) -> Result<bool> {
        let key = key.as_ref();
        let now = self.clock.now();
        Ok(self
            .read_entry(key)?
            .is_some_and(|entry| !entry.is_expired(now)))
    }

    // == Raw Access ==
    /// Bytes stored under `key`, without envelope interpretation.
    pub fn raw_get(&self, key: impl AsRef<[u8]>) -> Result<Option<Vec<u8>>> {
        Ok(self.store.raw_get(key.as_ref())?)
    }

    /// Stores `value` verbatim. The key is not readable through `get` afterwards.
    pub fn raw_put(&self, key: impl AsRef<[u8]>, value: impl AsRef<[u8]>) -> Result<()> {
        let key = key.as_ref();
        let _guard = self.locks.lock(key);
        Ok(self.store.raw_put(key, value.as_ref())?)
    }

    /// Removes `key` without decoding it.
    pub fn raw_delete(&self, key: impl AsRef<[u8]>) -> Result<()> {
        self.delete(key)
    }

    /// Returns true if any bytes are stored under `key`, expired or not.
    pub fn raw_exists(&self, key: impl AsRef<[u8]>) -> Result<bool> {
        Ok(self.store.raw_exists(key.as_ref())?)
    }

    // == Accessors ==
    /// Returns current operation counters.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    // == Close ==
    /// Closes the underlying store.
    pub fn close(self) -> std::result::Result<(), StoreError> {
        self.store.close()
    }

    // == Internals ==
    fn read_entry(&self, key: &[u8]) -> Result<Option<CacheEntry>> {
        match self.store.raw_get(key)? {
            Some(raw) => self.decode(key, &raw).map(Some),
            None => Ok(None),
        }
    }

    fn write_entry(&self, key: &[u8], entry: &CacheEntry) -> Result<()> {
        let bytes = codec::encode(entry).map_err(CacheError::Encode)?;
        self.store.raw_put(key, &bytes)?;
        self.stats.record_write();
        Ok(())
    }

    fn decode(&self, key: &[u8], raw: &[u8]) -> Result<CacheEntry> {
        codec::decode(raw).map_err(|source| {
            warn!(key = %display_key(key), error = %source, "undecodable entry");
            CacheError::Decode {
                key: display_key(key),
                source,
            }
        })
    }

    fn parse_counter(&self, key: &[u8], data: &[u8]) -> Result<i64> {
        let text = String::from_utf8_lossy(data);
        text.parse::<i64>().map_err(|source| CacheError::Parse {
            key: display_key(key),
            value: text.into_owned(),
            source,
        })
    }

    /// Applies `update` to a live entry under the key lock and rewrites it.
    fn update_expiry(
        &self,
        key: &[u8],
        now: i64,
        update: impl FnOnce(&mut CacheEntry),
    ) -> Result<bool> {
        let _guard = self.locks.lock(key);
        let mut entry = match self.read_entry(key)? {
            Some(entry) if !entry.is_expired(now) => entry,
            _ => {
                debug!(key = %display_key(key), "expire on absent key ignored");
                return Ok(false);
            }
        };

        update(&mut entry);
        self.write_entry(key, &entry)?;
        debug!(key = %display_key(key), expires_at = entry.expires_at, "expiry updated");
        Ok(true)
    }

    /// Deletes `key` if it is still expired once the key lock is held, so a
    /// value written after the caller's read is not lost.
    fn evict_expired(&self, key: &[u8], now: i64) -> Result<()> {
        let _guard = self.locks.lock(key);
        let still_expired = match self.store.raw_get(key)? {
            Some(raw) if !raw.is_empty() => self.decode(key, &raw)?.is_expired(now),
            _ => false,
        };

        if still_expired {
            self.store.raw_delete(key)?;
            self.stats.record_expired();
            debug!(key = %display_key(key), "lazily deleted expired entry");
        }
        Ok(())
    }
}

fn duration_secs(ttl: Duration) -> i64 {
    let secs = ttl
        .as_secs()
        .saturating_add(u64::from(ttl.subsec_nanos() > 0));
    i64::try_from(secs).unwrap_or(i64::MAX)
}
