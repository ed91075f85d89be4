//! Forward geocoding of free-text city names via OpenWeather.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{build_client, get_json, join_url, ProviderError};
use crate::models::CityLocation;

const PROVIDER: &str = "OpenWeather geocoding";

/// Resolves a city name to a location.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// `Ok(None)` when upstream answered but had no match.
    async fn resolve(&self, city: &str) -> Result<Option<CityLocation>, ProviderError>;
}

#[derive(Debug, Deserialize)]
struct GeoMatch {
    name: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    country: Option<String>,
}

/// OpenWeather `/geo/1.0/direct` client. Only the best match is used.
#[derive(Debug, Clone)]
pub struct OpenWeatherGeocoder {
    api_key: Option<String>,
    url: String,
    http: Client,
}

impl OpenWeatherGeocoder {
    pub fn new(
        api_key: Option<String>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            api_key,
            url: join_url(base_url, "/geo/1.0/direct"),
            http: build_client(timeout)?,
        })
    }
}

#[async_trait]
impl Geocoder for OpenWeatherGeocoder {
    async fn resolve(&self, city: &str) -> Result<Option<CityLocation>, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::NotConfigured("OPENWEATHER_API_KEY"))?;

        let matches: Vec<GeoMatch> = get_json(
            &self.http,
            PROVIDER,
            &self.url,
            &[
                ("q", city.to_string()),
                ("limit", "1".to_string()),
                ("appid", api_key.to_string()),
            ],
        )
        .await?;

        let Some(best) = matches.into_iter().next() else {
            debug!("No geocoding match for {:?}", city);
            return Ok(None);
        };

        let (Some(lat), Some(lon)) = (best.lat, best.lon) else {
            return Err(ProviderError::payload(PROVIDER, "match without coordinates"));
        };

        Ok(Some(CityLocation {
            name: best.name.unwrap_or_else(|| city.to_string()),
            lat,
            lon,
            country: best.country,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn geocoder(server: &MockServer, key: Option<&str>) -> OpenWeatherGeocoder {
        OpenWeatherGeocoder::new(
            key.map(str::to_string),
            &server.uri(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_resolve_first_match() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .and(query_param("q", "paris"))
            .and(query_param("limit", "1"))
            .and(query_param("appid", "KEY"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"name": "Paris", "lat": 48.8566, "lon": 2.3522, "country": "FR"},
                {"name": "Paris", "lat": 33.66, "lon": -95.55, "country": "US"}
            ])))
            .mount(&server)
            .await;

        let city = geocoder(&server, Some("KEY")).resolve("paris").await.unwrap().unwrap();

        assert_eq!(city.name, "Paris");
        assert_eq!(city.country.as_deref(), Some("FR"));
        assert!((city.lat - 48.8566).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_resolve_no_match_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let result = geocoder(&server, Some("KEY")).resolve("Nowhereistan").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_resolve_without_key_is_configuration_error() {
        let server = MockServer::start().await;

        let err = geocoder(&server, None).resolve("paris").await.unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured("OPENWEATHER_API_KEY")));
    }

    #[tokio::test]
    async fn test_resolve_upstream_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
            .mount(&server)
            .await;

        let err = geocoder(&server, Some("BAD")).resolve("paris").await.unwrap_err();
        assert!(matches!(err, ProviderError::Status { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_missing_name_falls_back_to_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"lat": 1.0, "lon": 2.0}
            ])))
            .mount(&server)
            .await;

        let city = geocoder(&server, Some("KEY")).resolve("Atlantis").await.unwrap().unwrap();
        assert_eq!(city.name, "Atlantis");
        assert!(city.country.is_none());
    }
}
