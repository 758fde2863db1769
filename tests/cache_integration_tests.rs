//! Integration Tests for the TTL cache over the on-disk store
//!
//! Exercises full operation sequences against a real database file.

use std::sync::Arc;
use std::thread::{self, sleep};
use std::time::Duration;

use tempfile::TempDir;
use ttlkv::cache::{codec, ManualClock};
use ttlkv::{CacheError, RedbStore, StoreAdapter, Ttl, TtlCache};

// == Helper Functions ==

fn open_store() -> (RedbStore, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = RedbStore::open(dir.path().join("ttlkv.redb")).unwrap();
    (store, dir)
}

fn manual_cache(start: i64) -> (TtlCache<RedbStore, Arc<ManualClock>>, Arc<ManualClock>, TempDir) {
    let (store, dir) = open_store();
    let clock = Arc::new(ManualClock::new(start));
    (TtlCache::with_clock(store, clock.clone()), clock, dir)
}

// == Scenarios ==

#[test]
fn test_counter_keeps_expiry_window() {
    let (cache, clock, _dir) = manual_cache(1_000);

    cache.set("k", "5").unwrap();
    assert!(cache.expire("k", 30).unwrap());
    match cache.ttl("k").unwrap() {
        Ttl::Remaining(secs) => assert!(secs > 0 && secs <= 30),
        other => panic!("unexpected ttl {:?}", other),
    }

    clock.advance(5);
    assert_eq!(cache.increment_by("k", 1).unwrap(), 6);
    assert_eq!(cache.get("k").unwrap(), Some(b"6".to_vec()));
    assert_eq!(cache.ttl("k").unwrap(), Ttl::Remaining(25));
}

#[test]
fn test_expired_key_is_absent_not_persistent() {
    let (cache, clock, _dir) = manual_cache(1_000);

    cache.set_with_ttl("k", "v", 2).unwrap();
    clock.advance(3);

    assert_eq!(cache.get("k").unwrap(), None);
    assert_eq!(cache.ttl("k").unwrap(), Ttl::Absent);
    assert_eq!(cache.ttl("k").unwrap().code(), -2);
    assert!(!cache.raw_exists("k").unwrap());
}

#[test]
fn test_expiry_with_wall_clock() {
    let (store, _dir) = open_store();
    let cache = TtlCache::new(store);

    cache.set_with_ttl("short", "lived", 2).unwrap();
    assert!(matches!(cache.ttl("short").unwrap(), Ttl::Remaining(1..=2)));

    sleep(Duration::from_millis(3100));

    assert_eq!(cache.get_string("short").unwrap(), None);
    assert!(!cache.raw_exists("short").unwrap());
}

#[test]
fn test_counter_sequence() {
    let (cache, _clock, _dir) = manual_cache(1_000);

    assert_eq!(cache.incr("counter").unwrap(), 1);
    assert_eq!(cache.increment_by("counter", 5).unwrap(), 6);
    assert_eq!(cache.decr("counter").unwrap(), 5);
    assert_eq!(cache.decrement_by("counter", 3).unwrap(), 2);
}

#[test]
fn test_raw_and_envelope_views() {
    let (cache, _clock, _dir) = manual_cache(1_000);

    cache.raw_put("plain", "value1").unwrap();
    assert_eq!(cache.raw_get("plain").unwrap(), Some(b"value1".to_vec()));
    assert!(matches!(cache.get("plain"), Err(CacheError::Decode { .. })));

    cache.set("wrapped", "value2").unwrap();
    let raw = cache.raw_get("wrapped").unwrap().unwrap();
    let entry = codec::decode(&raw).unwrap();
    assert_eq!(entry.data, b"value2");
    assert_eq!(entry.created_at, 1_000);
    assert_eq!(entry.expires_at, 0);

    cache.raw_delete("plain").unwrap();
    assert!(!cache.raw_exists("plain").unwrap());
}

#[test]
fn test_entries_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ttlkv.redb");
    let clock = Arc::new(ManualClock::new(1_000));

    let cache = TtlCache::with_clock(RedbStore::open(&path).unwrap(), clock.clone());
    cache.set_with_ttl("session", "abc", 60).unwrap();
    cache.increment_by("visits", 3).unwrap();
    cache.close().unwrap();

    clock.advance(10);
    let cache = TtlCache::with_clock(RedbStore::open(&path).unwrap(), clock.clone());
    assert_eq!(cache.get_string("session").unwrap().as_deref(), Some("abc"));
    assert_eq!(cache.ttl("session").unwrap(), Ttl::Remaining(50));
    assert_eq!(cache.incr("visits").unwrap(), 4);
}

#[test]
fn test_concurrent_increments_on_shared_store() {
    let (store, _dir) = open_store();
    let cache = Arc::new(TtlCache::new(store));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let cache = cache.clone();
            thread::spawn(move || {
                for _ in 0..50 {
                    cache.incr("shared").unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cache.get_string("shared").unwrap().as_deref(), Some("200"));
}

#[test]
fn test_shared_store_handle() {
    let (store, _dir) = open_store();
    let store = Arc::new(store);
    let cache = TtlCache::new(store.clone());

    cache.set("k", "v").unwrap();
    assert!(store.raw_exists(b"k").unwrap());

    store.raw_delete(b"k").unwrap();
    assert_eq!(cache.get("k").unwrap(), None);
}
