//! Token issuing and verification.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::{Rng, distr::Alphanumeric};

use super::claims::{Claims, TokenKind};
use super::error::AuthError;

/// Admin session token lifetime.
pub const ADMIN_SESSION_TTL: Duration = Duration::from_secs(60 * 60);
/// Driver session token lifetime.
pub const DRIVER_SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);
/// Password-reset token lifetime.
pub const RESET_TOKEN_TTL: Duration = Duration::from_secs(15 * 60);
/// Driver login OTP lifetime.
pub const OTP_TTL: Duration = Duration::from_secs(5 * 60);

/// Generate a random signing secret for processes started without one.
///
/// Tokens signed with a generated secret do not survive a restart.
pub fn generate_secret() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(48)
        .map(char::from)
        .collect()
}

/// Issues and verifies signed, expiring tokens.
///
/// The signing secret is process-wide immutable state, resolved once at
/// startup and never mutated afterwards.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    /// Create a token service from the signing secret.
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issue a signed token for `subject` with the given kind and lifetime.
    pub fn issue(
        &self,
        subject: &str,
        kind: Option<TokenKind>,
        ttl: Duration,
    ) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            kind,
            exp: now + ttl.as_secs() as i64,
            iat: now,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    /// Verify a token's signature, expiry, and kind.
    ///
    /// A token whose embedded kind differs from `required_kind` is rejected
    /// in either direction: a kindless verify refuses kinded tokens, and a
    /// kinded verify refuses plain session tokens.
    pub fn verify(
        &self,
        token: &str,
        required_kind: Option<TokenKind>,
    ) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.required_spec_claims.clear();

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            }
        })?;

        if data.claims.kind != required_kind {
            return Err(AuthError::WrongTokenKind);
        }

        Ok(data.claims)
    }
}
