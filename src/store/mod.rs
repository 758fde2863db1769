//! Store Module
//!
//! Raw byte-oriented access to the underlying key-value engine.

mod backend;
mod memory;
mod redb;

pub use self::backend::StoreAdapter;
pub use self::memory::MemoryStore;
pub use self::redb::RedbStore;
