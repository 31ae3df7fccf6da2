//! Bearer-token middleware guarding protected routes.

use axum::{
    extract::{FromRequestParts, State},
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};

use super::claims::Claims;
use super::error::AuthError;
use super::token::TokenService;

/// Extract a Bearer token from an Authorization header value.
fn bearer_token_from_header(header_value: &str) -> Result<&str, AuthError> {
    let mut parts = header_value.split_whitespace();
    let scheme = parts.next().ok_or(AuthError::InvalidAuthHeader)?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::InvalidAuthHeader);
    }

    let token = parts.next().ok_or(AuthError::InvalidAuthHeader)?;
    if token.is_empty() {
        return Err(AuthError::InvalidAuthHeader);
    }

    if parts.next().is_some() {
        return Err(AuthError::InvalidAuthHeader);
    }

    Ok(token)
}

/// Pull the raw bearer token out of a request's headers.
///
/// Used by the reset endpoint, which sits outside the session gate and
/// verifies its own reset-kind token.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AuthError::MissingAuthHeader)?;
    bearer_token_from_header(header)
}

/// Principal resolved from a validated session token.
#[derive(Debug, Clone)]
pub struct AuthPrincipal {
    /// Verified claims from the bearer token.
    pub claims: Claims,
}

impl AuthPrincipal {
    /// The principal identity: admin email or driver id.
    pub fn subject(&self) -> &str {
        &self.claims.sub
    }
}

impl<S> FromRequestParts<S> for AuthPrincipal
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthPrincipal>()
            .cloned()
            .ok_or(AuthError::MissingAuthHeader)
    }
}

/// Session-token middleware.
///
/// Verifies the bearer token with no required kind, so restricted tokens
/// (password reset) never pass the general gate. On success the resolved
/// principal is attached to request extensions; on failure the request is
/// short-circuited with 401 and never reaches the handler.
pub async fn auth_middleware(
    State(tokens): State<TokenService>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let token = bearer_token(req.headers())?;
    let claims = tokens.verify(token, None)?;

    req.extensions_mut().insert(AuthPrincipal { claims });

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bearer_header() {
        assert_eq!(bearer_token_from_header("Bearer abc").unwrap(), "abc");
        assert_eq!(bearer_token_from_header("bearer abc").unwrap(), "abc");
    }

    #[test]
    fn rejects_malformed_headers() {
        assert!(bearer_token_from_header("abc").is_err());
        assert!(bearer_token_from_header("Basic abc").is_err());
        assert!(bearer_token_from_header("Bearer").is_err());
        assert!(bearer_token_from_header("Bearer a b").is_err());
    }
}
