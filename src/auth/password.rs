//! bcrypt password hashes.
//!
//! Stored as the standard modular-crypt string (`$2b$<cost>$<salt+digest>`).

pub use bcrypt::{BcryptError, DEFAULT_COST};

/// Hashes `password` with a fresh random salt at the given work factor.
pub fn hash_password(password: &str, cost: u32) -> Result<String, BcryptError> {
    bcrypt::hash(password, cost)
}

/// Checks `password` against a stored hash. Malformed hashes never verify.
pub fn verify_password(password: &str, stored: &str) -> bool {
    bcrypt::verify(password, stored).unwrap_or(false)
}
