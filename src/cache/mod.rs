//! Cache Module
//!
//! TTL envelopes, lazy expiration and counters layered over a [`StoreAdapter`].
//!
//! [`StoreAdapter`]: crate::store::StoreAdapter

mod clock;
pub mod codec;
mod entry;
mod locks;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{expiry_from, CacheEntry};
pub use locks::KeyLocks;
pub use stats::CacheStats;
pub use store::{Ttl, TtlCache};

// == Public Constants ==
/// Default number of lock stripes guarding read-modify-write sequences
pub const DEFAULT_LOCK_STRIPES: usize = 64;
