//! API Routes
//!
//! Configures the Axum router with all endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::auth::{login_handler, register_handler};
use super::favorites::{
    create_favorite_handler, delete_favorite_handler, list_favorites_handler,
};
use super::handlers::{health_handler, search_handler, stats_handler};
use super::AppState;

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/search", get(search_handler))
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
        .route(
            "/api/favorites",
            post(create_favorite_handler).get(list_favorites_handler),
        )
        .route("/api/favorites/:id", delete(delete_favorite_handler))
        .route("/api/cache/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let config = Config {
            database_url: ":memory:".to_string(),
            ..Default::default()
        };
        create_router(AppState::from_config(&config).unwrap())
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stats_endpoint() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/cache/stats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_search_requires_query() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/api/search").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(json["detail"].as_str().unwrap().contains("missing field `q`"));
    }

    #[tokio::test]
    async fn test_favorites_require_token() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/favorites")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
