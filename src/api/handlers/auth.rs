//! Authentication handlers: admin password flows and driver OTP flows.

use axum::{
    extract::State,
    http::HeaderMap,
    response::Response,
};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::api::envelope;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::auth::{AuthPrincipal, bearer_token};

/// Generic acknowledgement for enumeration-sensitive flows. The text must be
/// identical whether or not the account exists.
const FORGOT_ACK: &str = "If the user exists, a password reset email has been sent out";
const OTP_ACK: &str = "If the driver exists, an OTP has been sent out";

fn require(field: Option<String>) -> ApiResult<String> {
    match field {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ApiError::validation("Missing or malformed input")),
    }
}

#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /auth/admin/login
pub async fn admin_login(
    State(state): State<AppState>,
    Json(request): Json<AdminLoginRequest>,
) -> ApiResult<Response> {
    let email = require(request.email)?;
    let password = require(request.password)?;

    let token = state.admins.login(&email, &password).await?;

    Ok(envelope::ok("Login successful", json!({ "token": token })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: Option<String>,
    pub new_password: Option<String>,
}

/// POST /auth/admin/change (session required)
pub async fn admin_change_password(
    State(state): State<AppState>,
    principal: AuthPrincipal,
    Json(request): Json<ChangePasswordRequest>,
) -> ApiResult<Response> {
    let old_password = require(request.old_password)?;
    let new_password = require(request.new_password)?;

    state
        .admins
        .change_password(principal.subject(), &old_password, &new_password)
        .await?;

    Ok(envelope::ok("Password changed successfully", json!({})))
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: Option<String>,
}

/// POST /auth/admin/forgot
///
/// Responds 200 with the same message whether or not the email is known.
pub async fn admin_forgot_password(
    State(state): State<AppState>,
    Json(request): Json<ForgotPasswordRequest>,
) -> ApiResult<Response> {
    let email = require(request.email)?;

    state.admins.forgot_password(&email).await?;

    Ok(envelope::ok(FORGOT_ACK, json!({})))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub new_password: Option<String>,
}

/// POST /auth/admin/reset (reset-kind bearer token required)
///
/// Sits outside the session gate: the handler verifies its own token with
/// the reset kind, so session tokens are refused here.
pub async fn admin_reset_password(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ResetPasswordRequest>,
) -> ApiResult<Response> {
    let token = bearer_token(&headers)?.to_string();
    let new_password = require(request.new_password)?;

    state.admins.reset_password(&token, &new_password).await?;

    Ok(envelope::ok("Password reset successfully", json!({})))
}

#[derive(Debug, Deserialize)]
pub struct OtpRequest {
    pub phone: Option<String>,
}

/// POST /auth/driver/otp
///
/// Responds 200 with the same message whether or not the phone is known.
pub async fn driver_request_otp(
    State(state): State<AppState>,
    Json(request): Json<OtpRequest>,
) -> ApiResult<Response> {
    let phone = require(request.phone)?;

    state.drivers.request_otp(&phone).await?;

    Ok(envelope::ok(OTP_ACK, json!({})))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverLoginRequest {
    pub phone: Option<String>,
    pub otp_code: Option<String>,
}

/// POST /auth/driver/login
pub async fn driver_login(
    State(state): State<AppState>,
    Json(request): Json<DriverLoginRequest>,
) -> ApiResult<Response> {
    let phone = require(request.phone)?;
    let otp_code = require(request.otp_code)?;

    let token = state.drivers.login_with_otp(&phone, &otp_code).await?;

    Ok(envelope::ok("Login successful", json!({ "token": token })))
}
