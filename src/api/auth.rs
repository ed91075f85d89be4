//! Registration, login and the bearer-token extractor.

use axum::{
    async_trait,
    extract::{
        rejection::{FormRejection, JsonRejection},
        FromRequestParts, State,
    },
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    Form, Json,
};
use tracing::{debug, info};

use super::state::run_blocking;
use super::AppState;
use crate::auth::{hash_password, verify_password};
use crate::error::{ApiError, Result};
use crate::models::{LoginForm, MessageResponse, RegisterRequest, TokenResponse};
use crate::store::{StoreError, User};

const INVALID_CREDENTIALS: &str = "Could not validate credentials";

// == Current User Extractor ==
/// The authenticated caller, resolved from `Authorization: Bearer <token>`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let unauthorized = || ApiError::Unauthorized(INVALID_CREDENTIALS.to_string());

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .ok_or_else(unauthorized)?;

        let claims = state.tokens.verify(token).map_err(|e| {
            debug!("Rejected bearer token: {}", e);
            unauthorized()
        })?;

        let user = state
            .with_db(move |db| Ok(db.find_user_by_email(&claims.sub)?))
            .await?
            .ok_or_else(unauthorized)?;

        Ok(CurrentUser(user))
    }
}

/// Extracts the token from a `Bearer` authorization value.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Handler for POST /auth/register
pub async fn register_handler(
    State(state): State<AppState>,
    body: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let Json(req) = body?;
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::BadRequest(error_msg));
    }

    let email = req.email.trim().to_string();
    let cost = state.password_cost;
    let password_hash = run_blocking(move || {
        hash_password(&req.password, cost)
            .map_err(|e| ApiError::Internal(format!("failed to hash password: {}", e)))
    })
    .await?;

    let created = state
        .with_db(move |db| match db.create_user(&email, &password_hash) {
            Err(StoreError::Duplicate) => Ok(None),
            other => Ok(Some(other?)),
        })
        .await?;
    match created {
        Some(user) => {
            info!("Registered user {}", user.id);
            Ok((
                StatusCode::CREATED,
                Json(MessageResponse::new("User created successfully")),
            ))
        }
        None => Err(ApiError::BadRequest("Email already registered".to_string())),
    }
}

/// Handler for POST /auth/login
///
/// Takes an OAuth2 password-flow form (`username` is the email).
pub async fn login_handler(
    State(state): State<AppState>,
    body: std::result::Result<Form<LoginForm>, FormRejection>,
) -> Result<Json<TokenResponse>> {
    let Form(form) = body?;
    let rejected = || ApiError::Unauthorized("Incorrect email or password".to_string());

    let email = form.username.trim().to_string();
    let user = state
        .with_db(move |db| Ok(db.find_user_by_email(&email)?))
        .await?
        .ok_or_else(rejected)?;

    let stored = user.password_hash.clone();
    let matches = run_blocking(move || Ok(verify_password(&form.password, &stored))).await?;
    if !matches {
        return Err(rejected());
    }

    let token = state
        .tokens
        .issue(&user.email)
        .map_err(|e| ApiError::Internal(format!("failed to issue token: {}", e)))?;

    Ok(Json(TokenResponse::bearer(token)))
}
