//! ttlkv - Redis-like expiring values and counters on an embedded store
//!
//! Wraps every value in a TTL envelope, expires entries lazily on read and
//! implements integer counters as locked read-modify-write cycles.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod store;

pub use cache::{CacheEntry, CacheStats, Ttl, TtlCache};
pub use config::Config;
pub use error::{CacheError, CodecError, Result, StoreError};
pub use store::{MemoryStore, RedbStore, StoreAdapter};
