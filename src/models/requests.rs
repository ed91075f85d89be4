//! Request DTOs for the API
//!
//! Defines the structure of incoming query strings, forms and JSON bodies.

use serde::Deserialize;

/// Query string of `GET /api/search`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    /// Free-text city name
    pub q: String,
}

/// Request body for `POST /auth/register`
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Some("A valid email is required".to_string());
        }
        if email.len() > 255 {
            return Some("Email exceeds maximum length of 255 characters".to_string());
        }
        if self.password.is_empty() {
            return Some("Password cannot be empty".to_string());
        }
        None
    }
}

/// Form body for `POST /auth/login` (OAuth2 password flow field names)
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    /// The account email
    pub username: String,
    pub password: String,
}

/// Request body for `POST /api/favorites`
#[derive(Debug, Clone, Deserialize)]
pub struct FavoriteCreate {
    pub place_id: String,
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
}

impl FavoriteCreate {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.place_id.trim().is_empty() {
            return Some("place_id cannot be empty".to_string());
        }
        if self.name.trim().is_empty() {
            return Some("name cannot be empty".to_string());
        }
        if self.place_id.len() > 255 || self.name.len() > 255 {
            return Some("place_id and name are limited to 255 characters".to_string());
        }
        None
    }
}
