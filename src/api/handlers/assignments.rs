//! Assignment handlers.

use axum::{
    Json,
    extract::{Path, State},
    response::Response,
};
use serde_json::json;

use crate::api::envelope;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::assignment::AssignmentItem;

/// POST /assignments/drivers/{driverId}
///
/// Body is the batch of routes to assign. Validation covers the whole batch
/// before any row is written.
pub async fn assign_routes(
    State(state): State<AppState>,
    Path(driver_id): Path<i64>,
    Json(items): Json<Vec<AssignmentItem>>,
) -> ApiResult<Response> {
    let ids = state.assignments.assign(driver_id, &items).await?;

    Ok(envelope::created(
        "Successfully created assignments",
        json!({ "assignmentIds": ids }),
    ))
}

/// GET /assignments/drivers/{driverId}
pub async fn list_for_driver(
    State(state): State<AppState>,
    Path(driver_id): Path<i64>,
) -> ApiResult<Response> {
    let assignments = state.assignments.list_for_driver(driver_id).await?;

    Ok(envelope::ok(
        "Successfully fetched driver assignments",
        json!({ "driverId": driver_id, "assignments": assignments }),
    ))
}

/// GET /assignments
pub async fn list_all(State(state): State<AppState>) -> ApiResult<Response> {
    let assignments = state.assignments.list_all().await?;

    Ok(envelope::ok(
        "Successfully fetched all assignments",
        json!({ "assignments": assignments }),
    ))
}

/// DELETE /assignments/drivers/{driverId}/routes/{routeId}
pub async fn unassign_route(
    State(state): State<AppState>,
    Path((driver_id, route_id)): Path<(i64, i64)>,
) -> ApiResult<Response> {
    state.assignments.unassign(driver_id, route_id).await?;

    Ok(envelope::ok("Route unassigned successfully", json!({})))
}
