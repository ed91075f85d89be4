//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

// == Cache Entry ==
/// A cached value and the moment it was stored.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Storage timestamp (Unix milliseconds)
    pub stored_at: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry stamped with `now_ms`.
    pub fn new(value: V, now_ms: u64) -> Self {
        Self {
            value,
            stored_at: now_ms,
        }
    }

    // == Age ==
    /// Milliseconds elapsed since the entry was stored.
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.stored_at)
    }

    // == Is Stale ==
    /// Checks whether the entry has outlived `ttl_ms`.
    ///
    /// Boundary condition: an entry exactly `ttl_ms` old is still live; it
    /// becomes stale once its age is strictly greater than the TTL.
    pub fn is_stale(&self, now_ms: u64, ttl_ms: u64) -> bool {
        self.age_ms(now_ms) > ttl_ms
    }
}
