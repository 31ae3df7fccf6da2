//! API error taxonomy and response mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{debug, error};

use super::envelope::Envelope;
use crate::auth::AuthError;

/// Result alias for handlers and services.
pub type ApiResult<T> = Result<T, ApiError>;

/// API error type.
///
/// Expected business-rule violations carry precise 4xx codes and safe
/// messages; unexpected store or network failures collapse to a generic 500
/// with the detail logged server-side only.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing input.
    #[error("{0}")]
    Validation(String),

    /// Referenced entity absent.
    #[error("{0}")]
    NotFound(String),

    /// Duplicate assignment, phone, or similar uniqueness clash.
    #[error("{0}")]
    Conflict(String),

    /// Wrong email/password or OTP.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Stored OTP exists but has expired.
    #[error("OTP code has expired")]
    OtpExpired,

    /// New password fails the strength policy.
    #[error("newPassword does not meet security requirements")]
    WeakPassword,

    /// Token-layer failure surfaced through a handler.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Unexpected failure; detail is never sent to the client.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            // Conflicts surface as 400 on this API, not 409.
            Self::Validation(_) | Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidCredentials | Self::OtpExpired => StatusCode::UNAUTHORIZED,
            Self::WeakPassword => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Auth(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        Self::Internal(anyhow::Error::new(err).context("store operation failed"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            // Auth errors carry their own status/envelope mapping.
            Self::Auth(err) => err.into_response(),
            Self::Internal(err) => {
                error!(error = ?err, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(Envelope::failure("Internal Server Error")),
                )
                    .into_response()
            }
            other => {
                let status = other.status_code();
                debug!(status = %status, error = %other, "request failed");
                (status, Json(Envelope::failure(other.to_string()))).into_response()
            }
        }
    }
}
