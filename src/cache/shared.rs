//! Shared search cache
//!
//! The [`ResponseCache`] trait is what the search orchestrator depends on;
//! [`InMemoryCache`] is the process-wide implementation built at startup.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{CacheStats, CacheStore, Clock};
use crate::models::SearchResult;

/// Cache of assembled search results keyed by normalized query.
#[async_trait]
pub trait ResponseCache: Send + Sync {
    /// Live value for `key`, if any. Stale entries are purged and reported absent.
    async fn get(&self, key: &str) -> Option<SearchResult>;

    /// Stores `value`, replacing whatever was there.
    async fn set(&self, key: &str, value: SearchResult);

    /// Drops `key`. Returns whether an entry was present.
    async fn evict(&self, key: &str) -> bool;

    async fn stats(&self) -> CacheStats;
}

// == In-Memory Cache ==
/// Thread-safe wrapper around a [`CacheStore`] of search results.
///
/// Lookups take the write lock because they update recency and may purge.
#[derive(Debug)]
pub struct InMemoryCache {
    store: RwLock<CacheStore<SearchResult>>,
}

impl InMemoryCache {
    pub fn new(max_entries: usize, ttl_secs: u64) -> Self {
        Self {
            store: RwLock::new(CacheStore::new(max_entries, ttl_secs)),
        }
    }

    pub fn with_clock(max_entries: usize, ttl_secs: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: RwLock::new(CacheStore::with_clock(max_entries, ttl_secs, clock)),
        }
    }
}

#[async_trait]
impl ResponseCache for InMemoryCache {
    async fn get(&self, key: &str) -> Option<SearchResult> {
        self.store.write().await.get(key)
    }

    async fn set(&self, key: &str, value: SearchResult) {
        self.store.write().await.set(key.to_string(), value);
    }

    async fn evict(&self, key: &str) -> bool {
        self.store.write().await.evict(key)
    }

    async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::models::{CityLocation, LocalTimeInfo, WeatherInfo};
    use std::time::Duration;

    fn sample(name: &str) -> SearchResult {
        SearchResult {
            city: CityLocation {
                name: name.to_string(),
                lat: 48.85,
                lon: 2.35,
                country: Some("FR".to_string()),
            },
            weather: WeatherInfo::default(),
            local_time: LocalTimeInfo::unresolved(),
            attractions: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_round_trip_within_ttl() {
        let clock = Arc::new(ManualClock::new(0));
        let cache = InMemoryCache::with_clock(10, 900, clock.clone());

        cache.set("search:paris", sample("Paris")).await;
        clock.advance(Duration::from_secs(60));

        assert_eq!(cache.get("search:paris").await, Some(sample("Paris")));
        assert_eq!(cache.get("search:paris").await, Some(sample("Paris")));
        assert_eq!(cache.stats().await.hits, 2);
    }

    #[tokio::test]
    async fn test_expired_after_ttl() {
        let clock = Arc::new(ManualClock::new(0));
        let cache = InMemoryCache::with_clock(10, 900, clock.clone());

        cache.set("search:paris", sample("Paris")).await;
        clock.advance(Duration::from_secs(901));

        assert!(cache.get("search:paris").await.is_none());
        assert_eq!(cache.stats().await.total_entries, 0);
    }

    #[tokio::test]
    async fn test_evict_through_trait_object() {
        let cache: Arc<dyn ResponseCache> = Arc::new(InMemoryCache::new(10, 900));

        cache.set("search:rome", sample("Rome")).await;

        assert!(cache.evict("search:rome").await);
        assert!(cache.get("search:rome").await.is_none());
    }

    #[tokio::test]
    async fn test_concurrent_writers_last_one_wins() {
        let cache = Arc::new(InMemoryCache::new(10, 900));

        let mut handles = Vec::new();
        for i in 0..16 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move {
                cache.set("search:oslo", sample(&format!("Oslo {}", i))).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let stored = cache.get("search:oslo").await.unwrap();
        assert!(stored.city.name.starts_with("Oslo "));
        assert_eq!(cache.stats().await.total_entries, 1);
    }
}
