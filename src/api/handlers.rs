//! Search, health and cache statistics handlers.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use tracing::error;

use super::AppState;
use crate::error::Result;
use crate::models::{HealthResponse, SearchQuery, SearchResult, StatsResponse};

/// Handler for GET /api/search
///
/// Runs the aggregated city search. Failures are logged here and rendered by
/// [`crate::error::ApiError`].
pub async fn search_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<SearchResult>> {
    let Query(params) = query?;
    match state.search.search(&params.q).await {
        Ok(result) => Ok(Json(result)),
        Err(err) => {
            error!("Search for {:?} failed: {}", params.q, err);
            Err(err)
        }
    }
}

/// Handler for GET /api/cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.cache.stats().await.into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
