//! LRU Tracker Module
//!
//! Recency ordering for cache keys. Each touch stamps the key with a
//! monotonically increasing tick; the smallest tick is the least recently used.

use std::collections::{BTreeMap, HashMap};

// == LRU Tracker ==
#[derive(Debug, Default)]
pub struct LruTracker {
    /// key -> last tick
    ticks: HashMap<String, u64>,
    /// tick -> key, ordered oldest first
    order: BTreeMap<u64, String>,
    next_tick: u64,
}

impl LruTracker {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as most recently used, inserting it if new.
    pub fn touch(&mut self, key: &str) {
        let tick = self.next_tick;
        self.next_tick += 1;

        if let Some(previous) = self.ticks.insert(key.to_string(), tick) {
            self.order.remove(&previous);
        }
        self.order.insert(tick, key.to_string());
    }

    // == Remove ==
    /// Stops tracking a key. Unknown keys are ignored.
    pub fn remove(&mut self, key: &str) {
        if let Some(tick) = self.ticks.remove(key) {
            self.order.remove(&tick);
        }
    }

    // == Evict Oldest ==
    /// Removes and returns the least recently used key.
    pub fn evict_oldest(&mut self) -> Option<String> {
        let (_, key) = self.order.pop_first()?;
        self.ticks.remove(&key);
        Some(key)
    }

    // == Peek Oldest ==
    /// Least recently used key, without removing it.
    pub fn peek_oldest(&self) -> Option<&str> {
        self.order.values().next().map(String::as_str)
    }

    // == Size ==
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    // == Contains ==
    pub fn contains(&self, key: &str) -> bool {
        self.ticks.contains_key(key)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_new() {
        let lru = LruTracker::new();
        assert!(lru.is_empty());
        assert_eq!(lru.peek_oldest(), None);
    }

    #[test]
    fn test_insertion_order_is_eviction_order() {
        let mut lru = LruTracker::new();
        lru.touch("search:paris");
        lru.touch("search:rome");
        lru.touch("search:oslo");

        assert_eq!(lru.evict_oldest().as_deref(), Some("search:paris"));
        assert_eq!(lru.evict_oldest().as_deref(), Some("search:rome"));
        assert_eq!(lru.evict_oldest().as_deref(), Some("search:oslo"));
        assert_eq!(lru.evict_oldest(), None);
    }

    #[test]
    fn test_touch_refreshes_recency() {
        let mut lru = LruTracker::new();
        lru.touch("a");
        lru.touch("b");
        lru.touch("c");

        lru.touch("a");

        assert_eq!(lru.len(), 3);
        assert_eq!(lru.peek_oldest(), Some("b"));
    }

    #[test]
    fn test_repeated_touch_keeps_single_entry() {
        let mut lru = LruTracker::new();
        lru.touch("a");
        lru.touch("a");
        lru.touch("a");

        assert_eq!(lru.len(), 1);
        assert_eq!(lru.evict_oldest().as_deref(), Some("a"));
        assert!(lru.is_empty());
    }

    #[test]
    fn test_remove() {
        let mut lru = LruTracker::new();
        lru.touch("a");
        lru.touch("b");

        lru.remove("a");
        lru.remove("missing");

        assert!(!lru.contains("a"));
        assert!(lru.contains("b"));
        assert_eq!(lru.peek_oldest(), Some("b"));
    }
}
