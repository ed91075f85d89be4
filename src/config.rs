//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Default signing secret used when `SECRET_KEY` is not set.
pub const DEFAULT_SECRET_KEY: &str = "a_very_secret_key";

// == Upstream Endpoints ==
/// Base URLs of the third-party providers.
///
/// Overridable so tests can point the providers at a local mock server.
#[derive(Debug, Clone)]
pub struct UpstreamUrls {
    /// OpenWeather (geocoding and current weather)
    pub openweather: String,
    /// TimezoneDB
    pub timezonedb: String,
    /// Geoapify places
    pub places: String,
}

impl Default for UpstreamUrls {
    fn default() -> Self {
        Self {
            openweather: "https://api.openweathermap.org".to_string(),
            timezonedb: "http://api.timezonedb.com".to_string(),
            places: "https://api.geoapify.com".to_string(),
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
/// Upstream keys are optional; each provider degrades on its own when its key is absent.
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenWeather key, used by the geocoder and the weather provider
    pub openweather_api_key: Option<String>,
    /// TimezoneDB key
    pub timezonedb_api_key: Option<String>,
    /// Places (attractions) key
    pub places_api_key: Option<String>,
    /// HMAC secret for bearer tokens
    pub secret_key: String,
    /// SQLite database path
    pub database_url: String,
    /// HTTP server port
    pub server_port: u16,
    /// Search cache TTL in seconds
    pub cache_ttl: u64,
    /// Maximum number of cached search results
    pub cache_max_entries: usize,
    /// Bearer token lifetime in minutes
    pub token_ttl_minutes: i64,
    /// bcrypt work factor for new password hashes
    pub password_hash_cost: u32,
    /// Timeout in seconds for geocoding, weather and attraction calls
    pub upstream_timeout: u64,
    /// Timeout in seconds for the time provider
    pub time_timeout: u64,
    /// Replace weather failures with an empty result instead of failing the search
    pub weather_fail_open: bool,
    /// Replace time failures with a null pair
    pub time_fail_open: bool,
    /// Replace attraction failures with an empty list
    pub attractions_fail_open: bool,
    pub upstream: UpstreamUrls,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `OPENWEATHER_API_KEY`, `TIMEZONEDB_API_KEY`, `OPENTRIPMAP_API_KEY` - upstream keys
    /// - `SECRET_KEY` - token signing secret (default: insecure built-in value)
    /// - `DATABASE_URL` - SQLite file path (default: city_explorer.db)
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    /// - `CACHE_TTL` - search cache TTL in seconds (default: 900)
    /// - `CACHE_MAX_ENTRIES` - search cache bound (default: 1000)
    /// - `ACCESS_TOKEN_EXPIRE_MINUTES` - token lifetime (default: 43200)
    /// - `BCRYPT_COST` - password hash work factor (default: 12)
    /// - `UPSTREAM_TIMEOUT` / `TIME_TIMEOUT` - per-call timeouts (default: 10 / 8)
    /// - `WEATHER_FAIL_OPEN`, `TIME_FAIL_OPEN`, `ATTRACTIONS_FAIL_OPEN` - failure policies
    /// - `OPENWEATHER_BASE_URL`, `TIMEZONEDB_BASE_URL`, `PLACES_BASE_URL` - upstream overrides
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let upstream = UpstreamUrls {
            openweather: non_empty_var("OPENWEATHER_BASE_URL")
                .unwrap_or(defaults.upstream.openweather),
            timezonedb: non_empty_var("TIMEZONEDB_BASE_URL")
                .unwrap_or(defaults.upstream.timezonedb),
            places: non_empty_var("PLACES_BASE_URL").unwrap_or(defaults.upstream.places),
        };

        Self {
            openweather_api_key: non_empty_var("OPENWEATHER_API_KEY"),
            timezonedb_api_key: non_empty_var("TIMEZONEDB_API_KEY"),
            places_api_key: non_empty_var("OPENTRIPMAP_API_KEY"),
            secret_key: non_empty_var("SECRET_KEY").unwrap_or(defaults.secret_key),
            database_url: non_empty_var("DATABASE_URL").unwrap_or(defaults.database_url),
            server_port: parsed_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cache_ttl: parsed_var("CACHE_TTL").unwrap_or(defaults.cache_ttl),
            cache_max_entries: parsed_var("CACHE_MAX_ENTRIES")
                .unwrap_or(defaults.cache_max_entries),
            token_ttl_minutes: parsed_var("ACCESS_TOKEN_EXPIRE_MINUTES")
                .unwrap_or(defaults.token_ttl_minutes),
            password_hash_cost: parsed_var("BCRYPT_COST").unwrap_or(defaults.password_hash_cost),
            upstream_timeout: parsed_var("UPSTREAM_TIMEOUT").unwrap_or(defaults.upstream_timeout),
            time_timeout: parsed_var("TIME_TIMEOUT").unwrap_or(defaults.time_timeout),
            weather_fail_open: bool_var("WEATHER_FAIL_OPEN").unwrap_or(defaults.weather_fail_open),
            time_fail_open: bool_var("TIME_FAIL_OPEN").unwrap_or(defaults.time_fail_open),
            attractions_fail_open: bool_var("ATTRACTIONS_FAIL_OPEN")
                .unwrap_or(defaults.attractions_fail_open),
            upstream,
        }
    }

    /// True when the token secret is the built-in fallback.
    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openweather_api_key: None,
            timezonedb_api_key: None,
            places_api_key: None,
            secret_key: DEFAULT_SECRET_KEY.to_string(),
            database_url: "city_explorer.db".to_string(),
            server_port: 8000,
            cache_ttl: 900,
            cache_max_entries: 1000,
            token_ttl_minutes: 43200,
            password_hash_cost: crate::auth::DEFAULT_COST,
            upstream_timeout: 10,
            time_timeout: 8,
            weather_fail_open: false,
            time_fail_open: true,
            attractions_fail_open: true,
            upstream: UpstreamUrls::default(),
        }
    }
}

// == Env Helpers ==
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parsed_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn bool_var(name: &str) -> Option<bool> {
    parse_flag(&env::var(name).ok()?)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
