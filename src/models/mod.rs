//! Request and Response models for the API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies, plus the
//! aggregated search payload that the cache stores.

pub mod requests;
pub mod responses;
pub mod search;

// Re-export commonly used types
pub use requests::{FavoriteCreate, LoginForm, RegisterRequest, SearchQuery};
pub use responses::{HealthResponse, MessageResponse, StatsResponse, TokenResponse};
pub use search::{Attraction, CityLocation, GeoPoint, LocalTimeInfo, SearchResult, WeatherInfo};
