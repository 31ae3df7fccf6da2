//! Token claims and kind markers.

use serde::{Deserialize, Serialize};

/// Restricted-purpose token kinds.
///
/// Ordinary session tokens carry no kind marker. A kinded token is only
/// accepted by the endpoint that demands that exact kind, so a reset token
/// can never double as a session credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    /// Password-reset token, valid only for `/auth/admin/reset`.
    #[serde(rename = "resetToken")]
    Reset,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Reset => write!(f, "resetToken"),
        }
    }
}

/// Signed token claims.
///
/// `sub` is the principal identity: the admin's email for admin tokens, the
/// driver's id for driver session tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (principal identity).
    pub sub: String,

    /// Token kind; absent for plain session tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TokenKind>,

    /// Expiration time (Unix timestamp).
    pub exp: i64,

    /// Issued at (Unix timestamp).
    pub iat: i64,
}
