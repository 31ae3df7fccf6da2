//! Tracking ping handlers.

use axum::{
    Json,
    extract::{Query, State},
    response::Response,
};
use serde_json::json;

use crate::api::envelope;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::tracking::{RecordPingRequest, TrackingQuery};

/// POST /tracking
pub async fn record(
    State(state): State<AppState>,
    Json(request): Json<RecordPingRequest>,
) -> ApiResult<Response> {
    // Referenced driver must exist; 404 beats a store-level FK failure.
    state.drivers.get(request.driver_id).await?;

    let id = state.tracking.record(&request).await?;

    Ok(envelope::created(
        "Tracking ping recorded",
        json!({ "ping": { "id": id } }),
    ))
}

/// GET /tracking
pub async fn query(
    State(state): State<AppState>,
    Query(query): Query<TrackingQuery>,
) -> ApiResult<Response> {
    let pings = state.tracking.query(&query).await?;

    Ok(envelope::ok(
        "Successfully fetched tracking data",
        json!({ "pings": pings }),
    ))
}
