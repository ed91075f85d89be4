//! Authentication Module
//!
//! Password hashing and bearer token issuance/validation. The HTTP side
//! (extractor, handlers) lives in the api module.

mod password;
mod token;

pub use password::{hash_password, verify_password, BcryptError, DEFAULT_COST};
pub use token::{Claims, TokenError, TokenService};
