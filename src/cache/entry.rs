//! Cache Entry Module
//!
//! Defines the envelope stored under every key managed by the cache.

// == Cache Entry ==
/// A payload together with its creation and expiry metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Opaque payload
    pub data: Vec<u8>,
    /// Creation timestamp (Unix seconds), set once at first write
    pub created_at: i64,
    /// Expiration timestamp (Unix seconds), 0 = never expires
    pub expires_at: i64,
}

impl CacheEntry {
    // == Constructors ==
    /// Creates an entry that never expires.
    pub fn new(data: Vec<u8>, now: i64) -> Self {
        Self {
            data,
            created_at: now,
            expires_at: 0,
        }
    }

    /// Creates an entry expiring `ttl_seconds` after `now`.
    ///
    /// A non-positive TTL yields an entry that never expires.
    pub fn with_ttl(data: Vec<u8>, now: i64, ttl_seconds: i64) -> Self {
        Self {
            data,
            created_at: now,
            expires_at: expiry_from(now, ttl_seconds),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// An entry is expired once `now` reaches `expires_at`, so a key set with
    /// a TTL of one second is gone exactly one second later.
    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at > 0 && self.expires_at <= now
    }

    /// Returns true if an expiry instant is set.
    pub fn has_expiry(&self) -> bool {
        self.expires_at > 0
    }

    // == Time To Live ==
    /// Returns remaining whole seconds at `now`, or None if no expiry is set.
    ///
    /// Saturates at 0 once the entry has expired.
    pub fn ttl_remaining(&self, now: i64) -> Option<u64> {
        if !self.has_expiry() {
            return None;
        }
        Some(self.expires_at.saturating_sub(now).max(0) as u64)
    }

    /// Replaces the expiry with `now + ttl_seconds`, or clears it when the
    /// TTL is not positive. Data and creation time are untouched.
    pub fn set_ttl(&mut self, now: i64, ttl_seconds: i64) {
        self.expires_at = expiry_from(now, ttl_seconds);
    }
}

// == Utility Functions ==
/// Absolute expiry for a relative TTL; 0 ("never") when `ttl_seconds <= 0`.
pub fn expiry_from(now: i64, ttl_seconds: i64) -> i64 {
    if ttl_seconds > 0 {
        now.saturating_add(ttl_seconds)
    } else {
        0
    }
}
