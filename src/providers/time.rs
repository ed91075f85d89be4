//! Local time lookup via TimezoneDB.
//!
//! TimezoneDB reports the local wall clock (`formatted`) and the UTC offset in
//! seconds (`gmtOffset`) separately; they are combined into one RFC 3339 timestamp.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{FixedOffset, NaiveDateTime, TimeZone};
use reqwest::Client;
use serde::Deserialize;

use super::{build_client, get_json, join_url, ProviderError};
use crate::models::LocalTimeInfo;

const PROVIDER: &str = "TimezoneDB";
const FORMATTED_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

#[async_trait]
pub trait TimeProvider: Send + Sync {
    /// Local time at a position. Unconfigured providers fall back to UTC now.
    async fn fetch(&self, lat: f64, lon: f64) -> Result<LocalTimeInfo, ProviderError>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TzDbResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    zone_name: Option<String>,
    #[serde(default)]
    gmt_offset: i32,
    formatted: Option<String>,
}

/// Combines a local wall-clock string with its UTC offset.
pub(crate) fn local_timestamp(formatted: &str, gmt_offset: i32) -> Option<String> {
    let naive = NaiveDateTime::parse_from_str(formatted, FORMATTED_LAYOUT).ok()?;
    let offset = FixedOffset::east_opt(gmt_offset)?;
    let local = offset.from_local_datetime(&naive).single()?;
    Some(local.to_rfc3339())
}

#[derive(Debug, Clone)]
pub struct TimezoneDbProvider {
    api_key: Option<String>,
    url: String,
    http: Client,
}

impl TimezoneDbProvider {
    pub fn new(
        api_key: Option<String>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            api_key,
            url: join_url(base_url, "/v2.1/get-time-zone"),
            http: build_client(timeout)?,
        })
    }
}

#[async_trait]
impl TimeProvider for TimezoneDbProvider {
    async fn fetch(&self, lat: f64, lon: f64) -> Result<LocalTimeInfo, ProviderError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Ok(LocalTimeInfo::utc_now());
        };

        let zone: TzDbResponse = get_json(
            &self.http,
            PROVIDER,
            &self.url,
            &[
                ("key", api_key.to_string()),
                ("format", "json".to_string()),
                ("by", "position".to_string()),
                ("lat", lat.to_string()),
                ("lng", lon.to_string()),
            ],
        )
        .await?;

        if zone.status != "OK" {
            return Err(ProviderError::payload(
                PROVIDER,
                format!(
                    "status {}: {}",
                    zone.status,
                    zone.message.unwrap_or_default()
                ),
            ));
        }

        let formatted = zone
            .formatted
            .ok_or_else(|| ProviderError::payload(PROVIDER, "missing formatted time"))?;
        let local_time = local_timestamp(&formatted, zone.gmt_offset).ok_or_else(|| {
            ProviderError::payload(PROVIDER, format!("malformed timestamp {:?}", formatted))
        })?;

        Ok(LocalTimeInfo {
            timezone: zone.zone_name,
            local_time: Some(local_time),
        })
    }
}
