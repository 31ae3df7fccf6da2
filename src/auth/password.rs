//! Password hashing and strength policy.

use anyhow::{Context, Result};

/// Bcrypt cost factor for stored hashes.
const BCRYPT_COST: u32 = 12;

/// Minimum password length accepted by the policy.
const MIN_LENGTH: usize = 8;

/// Hash a password for storage.
pub fn hash(password: &str) -> Result<String> {
    bcrypt::hash(password, BCRYPT_COST).context("hashing password")
}

/// Verify a candidate password against a stored hash.
///
/// Bcrypt's comparison is constant-time with respect to the hash.
pub fn verify(password: &str, password_hash: &str) -> Result<bool> {
    bcrypt::verify(password, password_hash).context("verifying password")
}

/// Check a new password against the strength policy: minimum length plus at
/// least one uppercase, lowercase, digit, and symbol character.
pub fn meets_requirements(password: &str) -> bool {
    password.len() >= MIN_LENGTH
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| !c.is_ascii_alphanumeric())
}
