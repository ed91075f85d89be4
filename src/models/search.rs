//! Search payload types
//!
//! The aggregated result of one city search. `SearchResult` is also the unit
//! stored in the response cache.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A geocoded city. Produced by the geocoder and fed to every other provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityLocation {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub country: Option<String>,
}

/// Current conditions. Every field may be missing; an unconfigured provider
/// yields an empty object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl WeatherInfo {
    /// True when no field was filled in.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Local time at the searched city.
///
/// Both fields `None` means the time provider could not resolve the position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalTimeInfo {
    pub timezone: Option<String>,
    /// RFC 3339 timestamp carrying the local UTC offset
    pub local_time: Option<String>,
}

impl LocalTimeInfo {
    /// Fallback used when no time provider is configured: the current UTC time.
    pub fn utc_now() -> Self {
        Self {
            timezone: Some("UTC".to_string()),
            local_time: Some(Utc::now().to_rfc3339()),
        }
    }

    /// The null pair reported when a configured provider fails.
    pub fn unresolved() -> Self {
        Self {
            timezone: None,
            local_time: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// A nearby point of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attraction {
    /// Upstream place id; the frontend reads it as `xid`
    #[serde(rename = "xid")]
    pub id: Option<String>,
    pub name: Option<String>,
    /// Distance from the city centre in metres
    pub distance: Option<f64>,
    /// Upstream category list, passed through untouched
    pub kinds: Option<serde_json::Value>,
    #[serde(default)]
    pub description: String,
    pub point: Option<GeoPoint>,
}

/// Everything returned for one city search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub city: CityLocation,
    pub weather: WeatherInfo,
    pub local_time: LocalTimeInfo,
    pub attractions: Vec<Attraction>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn test_empty_weather_serializes_as_empty_object() {
        let json = serde_json::to_string(&WeatherInfo::default()).unwrap();
        assert_eq!(json, "{}");
        assert!(WeatherInfo::default().is_empty());
    }

    #[test]
    fn test_partial_weather_omits_missing_fields() {
        let weather = WeatherInfo {
            temp: Some(21.5),
            description: Some("clear sky".to_string()),
            ..Default::default()
        };
        let json: serde_json::Value = serde_json::to_value(&weather).unwrap();
        assert_eq!(json["temp"], 21.5);
        assert!(json.get("humidity").is_none());
        assert!(!weather.is_empty());
    }

    #[test]
    fn test_utc_fallback_is_parseable() {
        let info = LocalTimeInfo::utc_now();
        assert_eq!(info.timezone.as_deref(), Some("UTC"));
        let parsed = DateTime::parse_from_rfc3339(info.local_time.as_deref().unwrap());
        assert!(parsed.is_ok());
    }

    #[test]
    fn test_attraction_id_uses_xid_on_the_wire() {
        let attraction = Attraction {
            id: Some("abc".to_string()),
            name: Some("Old Town".to_string()),
            distance: Some(120.0),
            kinds: None,
            description: String::new(),
            point: Some(GeoPoint { lat: 1.0, lon: 2.0 }),
        };
        let json = serde_json::to_value(&attraction).unwrap();
        assert_eq!(json["xid"], "abc");
        assert!(json.get("id").is_none());
        assert_eq!(json["point"]["lon"], 2.0);
    }

    #[test]
    fn test_attraction_description_defaults_to_empty() {
        let json = r#"{"xid": null, "name": "Bridge", "distance": null, "kinds": null, "point": null}"#;
        let attraction: Attraction = serde_json::from_str(json).unwrap();
        assert_eq!(attraction.description, "");
    }
}
