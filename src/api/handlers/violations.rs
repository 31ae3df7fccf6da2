//! Violation handlers.

use axum::{
    Json,
    extract::{Query, State},
    response::Response,
};
use serde_json::json;

use crate::api::envelope;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::violation::{RecordViolationRequest, ViolationQuery};

/// POST /violations
pub async fn record(
    State(state): State<AppState>,
    Json(request): Json<RecordViolationRequest>,
) -> ApiResult<Response> {
    if request.kind.trim().is_empty() || request.message.trim().is_empty() {
        return Err(ApiError::validation("Missing or malformed input"));
    }

    state.drivers.get(request.driver_id).await?;

    let id = state.violations.record(&request).await?;

    Ok(envelope::created(
        "Violation recorded",
        json!({ "violation": { "id": id } }),
    ))
}

/// GET /violations
pub async fn query(
    State(state): State<AppState>,
    Query(query): Query<ViolationQuery>,
) -> ApiResult<Response> {
    let violations = state.violations.query(&query).await?;

    Ok(envelope::ok(
        "Successfully fetched violations",
        json!({ "violations": violations }),
    ))
}
