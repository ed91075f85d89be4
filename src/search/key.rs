//! Cache key normalization for search queries.

pub const CACHE_KEY_PREFIX: &str = "search:";

/// Cache key for a query; insensitive to case and surrounding whitespace.
pub fn cache_key(query: &str) -> String {
    format!("{}{}", CACHE_KEY_PREFIX, query.trim().to_lowercase())
}
