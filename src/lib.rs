//! City Explorer - city search API
//!
//! Aggregates geocoding, weather, local time and nearby attractions for a
//! city, caches the combined result, and manages user accounts with saved
//! favorite places.

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod providers;
pub mod search;
pub mod store;

pub use api::{create_router, AppState};
pub use config::Config;
pub use error::ApiError;
