//! Favorites handlers. Every route requires a bearer token.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use tracing::info;

use super::{AppState, CurrentUser};
use crate::error::{ApiError, Result};
use crate::models::FavoriteCreate;
use crate::store::{Favorite, StoreError};

/// Handler for POST /api/favorites
pub async fn create_favorite_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    body: std::result::Result<Json<FavoriteCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<Favorite>)> {
    let Json(req) = body?;
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::BadRequest(error_msg));
    }

    let favorite = state
        .with_db(move |db| match db.create_favorite(user.id, &req) {
            Err(StoreError::Duplicate) => {
                Err(ApiError::Conflict("Favorite already exists".to_string()))
            }
            other => Ok(other?),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(favorite)))
}

/// Handler for GET /api/favorites
pub async fn list_favorites_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Favorite>>> {
    let favorites = state
        .with_db(move |db| Ok(db.list_favorites(user.id)?))
        .await?;
    Ok(Json(favorites))
}

/// Handler for DELETE /api/favorites/:id
///
/// Only the owner may delete a favorite.
pub async fn delete_favorite_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    path: std::result::Result<Path<i64>, PathRejection>,
) -> Result<StatusCode> {
    let Path(id) = path?;
    let user_id = user.id;

    state
        .with_db(move |db| {
            let favorite = db
                .find_favorite(id)?
                .ok_or_else(|| ApiError::NotFound("Favorite not found".to_string()))?;
            if favorite.user_id != user_id {
                return Err(ApiError::Forbidden("Not authorized".to_string()));
            }
            db.delete_favorite(id)?;
            Ok(())
        })
        .await?;
    info!("User {} deleted favorite {}", user.id, id);
    Ok(StatusCode::NO_CONTENT)
}
