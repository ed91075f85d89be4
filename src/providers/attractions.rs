//! Nearby points of interest via Geoapify places.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{build_client, get_json, join_url, ProviderError};
use crate::models::{Attraction, GeoPoint};

const PROVIDER: &str = "Geoapify";
const CATEGORIES: &str = "tourism.sights,heritage,entertainment";

/// Search radius in metres around the city centre.
pub const DEFAULT_RADIUS_M: f64 = 10_000.0;

#[async_trait]
pub trait AttractionProvider: Send + Sync {
    /// Points of interest within `radius` metres, in upstream order, at most `limit`.
    async fn fetch(
        &self,
        lat: f64,
        lon: f64,
        radius: f64,
        limit: usize,
    ) -> Result<Vec<Attraction>, ProviderError>;
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: PlaceProperties,
    geometry: Option<Geometry>,
}

#[derive(Debug, Default, Deserialize)]
struct PlaceProperties {
    place_id: Option<String>,
    name: Option<String>,
    formatted: Option<String>,
    distance: Option<f64>,
    categories: Option<serde_json::Value>,
    address_line2: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(default)]
    coordinates: Vec<Option<f64>>,
}

impl From<Feature> for Attraction {
    fn from(feature: Feature) -> Self {
        let props = feature.properties;

        // GeoJSON order is [lon, lat]
        let point = feature.geometry.and_then(|g| match g.coordinates.as_slice() {
            [Some(lon), Some(lat)] => Some(GeoPoint { lat: *lat, lon: *lon }),
            _ => None,
        });

        Attraction {
            id: props.place_id,
            name: props.name.or(props.formatted),
            distance: props.distance,
            kinds: props.categories,
            description: props.address_line2.unwrap_or_default(),
            point,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeoapifyProvider {
    api_key: Option<String>,
    url: String,
    http: Client,
}

impl GeoapifyProvider {
    pub fn new(
        api_key: Option<String>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            api_key,
            url: join_url(base_url, "/v2/places"),
            http: build_client(timeout)?,
        })
    }
}

#[async_trait]
impl AttractionProvider for GeoapifyProvider {
    async fn fetch(
        &self,
        lat: f64,
        lon: f64,
        radius: f64,
        limit: usize,
    ) -> Result<Vec<Attraction>, ProviderError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Ok(Vec::new());
        };

        let places: FeatureCollection = get_json(
            &self.http,
            PROVIDER,
            &self.url,
            &[
                ("categories", CATEGORIES.to_string()),
                ("filter", format!("circle:{},{},{}", lon, lat, radius)),
                ("limit", limit.to_string()),
                ("apiKey", api_key.to_string()),
            ],
        )
        .await?;

        Ok(places
            .features
            .into_iter()
            .take(limit)
            .map(Attraction::from)
            .collect())
    }
}
