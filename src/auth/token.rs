//! HS256 bearer tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenError {
    /// Lifetime does not fit a timestamp
    #[error("token lifetime of {0} minutes is out of range")]
    InvalidLifetime(i64),

    #[error("token error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Account email
    pub sub: String,
    /// Expiry, Unix seconds
    pub exp: i64,
}

/// Issues and validates tokens signed with the server secret.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
    ttl_minutes: i64,
}

impl TokenService {
    /// Fails when `ttl_minutes` cannot be added to the current time.
    pub fn new(secret: &str, ttl_minutes: i64) -> Result<Self, TokenError> {
        let ttl = Duration::try_minutes(ttl_minutes)
            .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some())
            .ok_or(TokenError::InvalidLifetime(ttl_minutes))?;

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            ttl,
            ttl_minutes,
        })
    }

    /// Signs a token for `subject` that expires after the configured lifetime.
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        let expires_at = Utc::now()
            .checked_add_signed(self.ttl)
            .ok_or(TokenError::InvalidLifetime(self.ttl_minutes))?;
        let claims = Claims {
            sub: subject.to_string(),
            exp: expires_at.timestamp(),
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    /// Checks signature and expiry and returns the claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)?;
        Ok(data.claims)
    }
}
