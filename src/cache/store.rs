//! Cache Store Module
//!
//! Cache engine combining HashMap storage with LRU tracking and lazy TTL expiry.

use std::collections::HashMap;
use std::sync::Arc;

use crate::cache::{CacheEntry, CacheStats, Clock, LruTracker, SystemClock};

// == Cache Store ==
/// Bounded key-value store whose entries go stale after a fixed TTL.
///
/// Staleness is only evaluated on lookup; there is no background sweep.
#[derive(Debug)]
pub struct CacheStore<V> {
    entries: HashMap<String, CacheEntry<V>>,
    lru: LruTracker,
    stats: CacheStats,
    /// Size bound; the least recently used entry is evicted beyond it
    max_entries: usize,
    ttl_ms: u64,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a store on the system clock.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of entries the cache can hold
    /// * `ttl_secs` - Age in seconds after which an entry is stale
    pub fn new(max_entries: usize, ttl_secs: u64) -> Self {
        Self::with_clock(max_entries, ttl_secs, Arc::new(SystemClock))
    }

    /// Creates a store reading time from `clock`.
    pub fn with_clock(max_entries: usize, ttl_secs: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_entries,
            ttl_ms: ttl_secs.saturating_mul(1000),
            clock,
        }
    }

    // == Get ==
    /// Returns a live value for `key`.
    ///
    /// A stale entry is purged and reported as absent.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let now = self.clock.now_ms();

        let stale = match self.entries.get(key) {
            None => {
                self.stats.record_miss();
                return None;
            }
            Some(entry) => entry.is_stale(now, self.ttl_ms),
        };

        if stale {
            self.remove_entry(key);
            self.stats.record_expiration();
            return None;
        }

        self.stats.record_hit();
        self.lru.touch(key);
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Set ==
    /// Stores `value` under `key`, replacing any previous entry and resetting its age.
    ///
    /// If the store is full and `key` is new, the least recently used entry is evicted.
    pub fn set(&mut self, key: String, value: V) {
        if self.max_entries == 0 {
            return;
        }

        if !self.entries.contains_key(&key) {
            while self.entries.len() >= self.max_entries {
                match self.lru.evict_oldest() {
                    Some(oldest) => {
                        self.entries.remove(&oldest);
                        self.stats.record_eviction();
                    }
                    None => break,
                }
            }
        }

        let entry = CacheEntry::new(value, self.clock.now_ms());
        self.entries.insert(key.clone(), entry);
        self.lru.touch(&key);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Evict ==
    /// Drops `key` regardless of age. Returns whether an entry was present.
    pub fn evict(&mut self, key: &str) -> bool {
        self.remove_entry(key)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Number of stored entries, stale ones included until they are looked up.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn remove_entry(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.lru.remove(key);
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use std::time::Duration;

    fn store_with_clock(max_entries: usize, ttl: u64) -> (CacheStore<String>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(1_000_000));
        let store = CacheStore::with_clock(max_entries, ttl, clock.clone());
        (store, clock)
    }

    #[test]
    fn test_store_new() {
        let store: CacheStore<String> = CacheStore::new(100, 900);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_set_and_get() {
        let (mut store, _) = store_with_clock(100, 900);

        store.set("search:paris".to_string(), "payload".to_string());

        assert_eq!(store.get("search:paris").as_deref(), Some("payload"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let (mut store, _) = store_with_clock(100, 900);
        assert!(store.get("search:nowhere").is_none());
        assert_eq!(store.stats().misses, 1);
    }

    #[test]
    fn test_store_overwrite_resets_age() {
        let (mut store, clock) = store_with_clock(100, 900);

        store.set("k".to_string(), "v1".to_string());
        clock.advance(Duration::from_secs(800));
        store.set("k".to_string(), "v2".to_string());
        clock.advance(Duration::from_secs(800));

        assert_eq!(store.get("k").as_deref(), Some("v2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_entry_live_at_ttl_boundary() {
        let (mut store, clock) = store_with_clock(100, 900);

        store.set("k".to_string(), "v".to_string());
        clock.advance(Duration::from_secs(900));

        assert!(store.get("k").is_some());
    }

    #[test]
    fn test_stale_entry_is_purged_on_lookup() {
        let (mut store, clock) = store_with_clock(100, 900);

        store.set("k".to_string(), "v".to_string());
        clock.advance(Duration::from_millis(900_001));

        // Still stored until someone looks
        assert_eq!(store.len(), 1);
        assert!(store.get("k").is_none());
        assert!(store.is_empty());

        let stats = store.stats();
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 0);
    }

    #[test]
    fn test_evict() {
        let (mut store, _) = store_with_clock(100, 900);

        store.set("k".to_string(), "v".to_string());

        assert!(store.evict("k"));
        assert!(!store.evict("k"));
        assert!(store.get("k").is_none());
    }

    #[test]
    fn test_store_lru_eviction() {
        let (mut store, _) = store_with_clock(3, 900);

        store.set("key1".to_string(), "value1".to_string());
        store.set("key2".to_string(), "value2".to_string());
        store.set("key3".to_string(), "value3".to_string());
        store.set("key4".to_string(), "value4".to_string());

        assert_eq!(store.len(), 3);
        assert!(store.get("key1").is_none());
        assert!(store.get("key2").is_some());
        assert!(store.get("key4").is_some());
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_store_lru_touch_on_get() {
        let (mut store, _) = store_with_clock(3, 900);

        store.set("key1".to_string(), "value1".to_string());
        store.set("key2".to_string(), "value2".to_string());
        store.set("key3".to_string(), "value3".to_string());

        store.get("key1");
        store.set("key4".to_string(), "value4".to_string());

        assert!(store.get("key1").is_some());
        assert!(store.get("key2").is_none());
    }

    #[test]
    fn test_overwrite_at_capacity_does_not_evict() {
        let (mut store, _) = store_with_clock(2, 900);

        store.set("a".to_string(), "1".to_string());
        store.set("b".to_string(), "2".to_string());
        store.set("a".to_string(), "3".to_string());

        assert_eq!(store.len(), 2);
        assert_eq!(store.stats().evictions, 0);
    }

    #[test]
    fn test_zero_capacity_stores_nothing() {
        let (mut store, _) = store_with_clock(0, 900);

        store.set("a".to_string(), "1".to_string());

        assert!(store.is_empty());
        assert!(store.get("a").is_none());
    }

    #[test]
    fn test_store_stats() {
        let (mut store, _) = store_with_clock(100, 900);

        store.set("key1".to_string(), "value1".to_string());
        store.get("key1");
        store.get("nonexistent");

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }
}
