//! Current conditions via OpenWeather `/data/2.5/weather`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{build_client, get_json, join_url, ProviderError};
use crate::models::WeatherInfo;

const PROVIDER: &str = "OpenWeather";

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current conditions at a position. Unconfigured providers return an empty value.
    async fn fetch(&self, lat: f64, lon: f64) -> Result<WeatherInfo, ProviderError>;
}

#[derive(Debug, Default, Deserialize)]
struct OwCurrent {
    #[serde(default)]
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwCondition>,
    #[serde(default)]
    wind: OwWind,
}

#[derive(Debug, Default, Deserialize)]
struct OwMain {
    temp: Option<f64>,
    humidity: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OwCondition {
    description: Option<String>,
    icon: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct OwWind {
    speed: Option<f64>,
}

impl From<OwCurrent> for WeatherInfo {
    fn from(current: OwCurrent) -> Self {
        let condition = current.weather.into_iter().next();
        let (description, icon) = match condition {
            Some(c) => (c.description, c.icon),
            None => (None, None),
        };

        WeatherInfo {
            temp: current.main.temp,
            description,
            humidity: current.main.humidity,
            wind_speed: current.wind.speed,
            icon,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: Option<String>,
    url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(
        api_key: Option<String>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            api_key,
            url: join_url(base_url, "/data/2.5/weather"),
            http: build_client(timeout)?,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch(&self, lat: f64, lon: f64) -> Result<WeatherInfo, ProviderError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Ok(WeatherInfo::default());
        };

        let current: OwCurrent = get_json(
            &self.http,
            PROVIDER,
            &self.url,
            &[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("units", "metric".to_string()),
                ("appid", api_key.to_string()),
            ],
        )
        .await?;

        Ok(current.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer, key: Option<&str>) -> OpenWeatherProvider {
        OpenWeatherProvider::new(key.map(str::to_string), &server.uri(), Duration::from_secs(5))
            .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_maps_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "main": {"temp": 18.4, "humidity": 72, "pressure": 1012},
                "weather": [{"description": "light rain", "icon": "10d"}],
                "wind": {"speed": 3.6, "deg": 220}
            })))
            .mount(&server)
            .await;

        let weather = provider(&server, Some("KEY")).fetch(51.5, -0.12).await.unwrap();

        assert_eq!(weather.temp, Some(18.4));
        assert_eq!(weather.humidity, Some(72));
        assert_eq!(weather.description.as_deref(), Some("light rain"));
        assert_eq!(weather.icon.as_deref(), Some("10d"));
        assert_eq!(weather.wind_speed, Some(3.6));
    }

    #[tokio::test]
    async fn test_missing_sections_are_absent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "main": {"temp": 5.0}
            })))
            .mount(&server)
            .await;

        let weather = provider(&server, Some("KEY")).fetch(0.0, 0.0).await.unwrap();

        assert_eq!(weather.temp, Some(5.0));
        assert!(weather.description.is_none());
        assert!(weather.wind_speed.is_none());
    }

    #[tokio::test]
    async fn test_unconfigured_returns_empty() {
        let server = MockServer::start().await;

        let weather = provider(&server, None).fetch(0.0, 0.0).await.unwrap();
        assert!(weather.is_empty());
    }

    #[tokio::test]
    async fn test_upstream_error_propagates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = provider(&server, Some("KEY")).fetch(0.0, 0.0).await.unwrap_err();
        assert!(matches!(err, ProviderError::Status { status: 503, .. }));
    }
}
