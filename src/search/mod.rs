//! Search Module
//!
//! The city search pipeline: cache lookup, geocoding, concurrent fan-out to
//! weather/time/attraction providers, assembly and caching.

mod key;
mod service;

pub use key::{cache_key, CACHE_KEY_PREFIX};
pub use service::{FailurePolicy, SearchService, SEARCH_ATTRACTION_LIMIT};
