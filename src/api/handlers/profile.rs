//! Admin profile handlers.

use axum::{Json, extract::State, response::Response};
use serde_json::json;

use crate::admin::AdminProfileUpdate;
use crate::api::envelope;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::auth::AuthPrincipal;

/// GET /admin/profile
pub async fn get(State(state): State<AppState>, principal: AuthPrincipal) -> ApiResult<Response> {
    let profile = state.admins.profile(principal.subject()).await?;

    Ok(envelope::ok(
        "Successfully fetched admin profile",
        json!({ "profile": profile }),
    ))
}

/// PUT /admin/profile
///
/// Session tokens carry the email as subject, so changing the email
/// invalidates the current session: the caller must log in again with the
/// new address before further gated requests.
pub async fn update(
    State(state): State<AppState>,
    principal: AuthPrincipal,
    Json(update): Json<AdminProfileUpdate>,
) -> ApiResult<Response> {
    state
        .admins
        .update_profile(principal.subject(), &update)
        .await?;

    Ok(envelope::ok("Admin profile updated successfully", json!({})))
}
