//! Error types for the API server
//!
//! Provides unified error handling using thiserror. Every variant renders as
//! `{"detail": "<message>"}` with its own status code.

use axum::{
    extract::rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tokio::task::JoinError;
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

// == Api Error Enum ==
/// Unified error type for the API server.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Geocoder answered but had no match
    #[error("City not found")]
    CityNotFound,

    /// Requested resource does not exist
    #[error("{0}")]
    NotFound(String),

    /// A required credential is missing
    #[error("{0}")]
    Configuration(String),

    /// A required upstream provider failed
    #[error("Geocoding service error: {0}")]
    Gateway(String),

    /// Invalid request data
    #[error("{0}")]
    BadRequest(String),

    /// Missing or invalid credentials
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated but not allowed
    #[error("{0}")]
    Forbidden(String),

    /// Resource already exists
    #[error("{0}")]
    Conflict(String),

    /// Internal server error
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::CityNotFound | ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Configuration(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Gateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
        }
    }

    /// Client-visible message placed in the `detail` field.
    pub fn detail(&self) -> String {
        match self {
            ApiError::Configuration(msg) | ApiError::Internal(msg) => {
                format!("Server error: {}", msg)
            }
            other => other.to_string(),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "detail": self.detail()
        }));

        if status == StatusCode::UNAUTHORIZED {
            return (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response();
        }
        (status, body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<JoinError> for ApiError {
    fn from(err: JoinError) -> Self {
        ApiError::Internal(format!("background task failed: {}", err))
    }
}

// == Extractor Rejections ==
// Malformed requests keep the `{"detail": ...}` envelope and always answer 400.
impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

// == Result Type Alias ==
/// Convenience Result type for the API server.
pub type Result<T> = std::result::Result<T, ApiError>;
