//! Search orchestration
//!
//! One pass per request, no retries:
//! 1. Normalize the query and answer from the cache if a live entry exists
//! 2. Geocode; no match ends the search with 404
//! 3. Fetch weather, time and attractions concurrently
//! 4. Assemble, cache and return
//!
//! Every failure leaves this module as an [`ApiError`].

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cache::ResponseCache;
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{LocalTimeInfo, SearchResult, WeatherInfo};
use crate::providers::attractions::DEFAULT_RADIUS_M;
use crate::providers::{ProviderError, Providers};
use crate::search::cache_key;

/// Maximum number of attractions in a search result.
pub const SEARCH_ATTRACTION_LIMIT: usize = 8;

// == Failure Policy ==
/// Per-provider choice between failing the search and substituting a default.
///
/// `true` (fail open) means a provider failure is logged and replaced by the
/// provider's safe default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailurePolicy {
    pub weather: bool,
    pub time: bool,
    pub attractions: bool,
}

impl Default for FailurePolicy {
    fn default() -> Self {
        Self {
            weather: false,
            time: true,
            attractions: true,
        }
    }
}

impl From<&Config> for FailurePolicy {
    fn from(config: &Config) -> Self {
        Self {
            weather: config.weather_fail_open,
            time: config.time_fail_open,
            attractions: config.attractions_fail_open,
        }
    }
}

// == Search Service ==
pub struct SearchService {
    cache: Arc<dyn ResponseCache>,
    providers: Providers,
    policy: FailurePolicy,
}

impl SearchService {
    pub fn new(cache: Arc<dyn ResponseCache>, providers: Providers, policy: FailurePolicy) -> Self {
        Self {
            cache,
            providers,
            policy,
        }
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Runs a city search, serving from cache when possible.
    pub async fn search(&self, query: &str) -> Result<SearchResult> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ApiError::BadRequest(
                "Query parameter 'q' must not be empty".to_string(),
            ));
        }

        let key = cache_key(query);
        if let Some(cached) = self.cache.get(&key).await {
            debug!("Cache hit for {}", key);
            return Ok(cached);
        }

        let city = match self.providers.geocoder.resolve(query).await {
            Ok(Some(city)) => city,
            Ok(None) => return Err(ApiError::CityNotFound),
            Err(err @ ProviderError::NotConfigured(_)) => {
                return Err(ApiError::Configuration(err.to_string()))
            }
            Err(err) => return Err(ApiError::Gateway(err.to_string())),
        };

        let (lat, lon) = (city.lat, city.lon);
        let (weather, local_time, attractions) = tokio::join!(
            self.providers.weather.fetch(lat, lon),
            self.providers.time.fetch(lat, lon),
            self.providers
                .attractions
                .fetch(lat, lon, DEFAULT_RADIUS_M, SEARCH_ATTRACTION_LIMIT),
        );

        let weather = absorb("weather", weather, self.policy.weather, WeatherInfo::default)?;
        let local_time = absorb("time", local_time, self.policy.time, LocalTimeInfo::unresolved)?;
        let mut attractions = absorb("attractions", attractions, self.policy.attractions, Vec::new)?;
        attractions.truncate(SEARCH_ATTRACTION_LIMIT);

        let result = SearchResult {
            city,
            weather,
            local_time,
            attractions,
        };

        self.cache.set(&key, result.clone()).await;
        info!(
            "Search {:?} resolved to {} with {} attractions",
            query,
            result.city.name,
            result.attractions.len()
        );
        Ok(result)
    }
}

/// Applies a provider's failure policy to its result.
fn absorb<T>(
    provider: &str,
    result: std::result::Result<T, ProviderError>,
    fail_open: bool,
    fallback: impl FnOnce() -> T,
) -> Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(err) if fail_open => {
            warn!("{} provider failed, using default: {}", provider, err);
            Ok(fallback())
        }
        Err(err) => Err(ApiError::Internal(err.to_string())),
    }
}
