//! Upstream Providers
//!
//! Clients for the third-party APIs a search fans out to. Each provider sits
//! behind a trait so the search service can be wired with fakes.
//!
//! # Providers
//! - Geocoder: OpenWeather direct geocoding
//! - Weather: OpenWeather current conditions
//! - Time: TimezoneDB
//! - Attractions: Geoapify places

pub mod attractions;
pub mod geocoder;
pub mod time;
pub mod weather;

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::Config;

pub use attractions::{AttractionProvider, GeoapifyProvider};
pub use geocoder::{Geocoder, OpenWeatherGeocoder};
pub use time::{TimeProvider, TimezoneDbProvider};
pub use weather::{OpenWeatherProvider, WeatherProvider};

// == Provider Error ==
/// Failure talking to an upstream provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The provider's credential is missing
    #[error("{0} is not configured on the server.")]
    NotConfigured(&'static str),

    /// Network failure, timeout, or unreadable body
    #[error("{provider} request failed: {source}")]
    Request {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Upstream answered with a non-success status
    #[error("{provider} returned status {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    /// Upstream answered 2xx with something we cannot use
    #[error("{provider} sent an unexpected payload: {message}")]
    Payload {
        provider: &'static str,
        message: String,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl ProviderError {
    pub(crate) fn payload(provider: &'static str, message: impl Into<String>) -> Self {
        ProviderError::Payload {
            provider,
            message: message.into(),
        }
    }
}

// == Provider Set ==
/// The four providers a search depends on.
#[derive(Clone)]
pub struct Providers {
    pub geocoder: Arc<dyn Geocoder>,
    pub weather: Arc<dyn WeatherProvider>,
    pub time: Arc<dyn TimeProvider>,
    pub attractions: Arc<dyn AttractionProvider>,
}

impl Providers {
    /// Builds the real HTTP providers from configuration.
    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        let timeout = Duration::from_secs(config.upstream_timeout);
        let time_timeout = Duration::from_secs(config.time_timeout);

        Ok(Self {
            geocoder: Arc::new(OpenWeatherGeocoder::new(
                config.openweather_api_key.clone(),
                &config.upstream.openweather,
                timeout,
            )?),
            weather: Arc::new(OpenWeatherProvider::new(
                config.openweather_api_key.clone(),
                &config.upstream.openweather,
                timeout,
            )?),
            time: Arc::new(TimezoneDbProvider::new(
                config.timezonedb_api_key.clone(),
                &config.upstream.timezonedb,
                time_timeout,
            )?),
            attractions: Arc::new(GeoapifyProvider::new(
                config.places_api_key.clone(),
                &config.upstream.places,
                timeout,
            )?),
        })
    }
}

// == HTTP Helpers ==
pub(crate) fn build_client(timeout: Duration) -> Result<Client, ProviderError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("city_explorer/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(ProviderError::Client)
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// Issues a GET and decodes a JSON body, mapping every failure to [`ProviderError`].
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    provider: &'static str,
    url: &str,
    query: &[(&str, String)],
) -> Result<T, ProviderError> {
    let res = client
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|source| ProviderError::Request { provider, source })?;

    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|source| ProviderError::Request { provider, source })?;

    if !status.is_success() {
        return Err(ProviderError::Status {
            provider,
            status: status.as_u16(),
            body: truncate_body(&body),
        });
    }

    serde_json::from_str(&body).map_err(|e| ProviderError::payload(provider, e.to_string()))
}

fn truncate_body(body: &str) -> String {
    const MAX_CHARS: usize = 200;
    match body.char_indices().nth(MAX_CHARS) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
