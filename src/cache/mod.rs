//! Cache Module
//!
//! In-memory response caching with lazy TTL expiration and LRU eviction.
//! Time is read through an injected [`Clock`] so expiry can be driven in tests.

mod clock;
mod entry;
mod lru;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use shared::{InMemoryCache, ResponseCache};
pub use stats::CacheStats;
pub use store::CacheStore;
