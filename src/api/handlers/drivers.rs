//! Driver CRUD handlers.

use axum::{
    Json,
    extract::{Path, State},
    response::Response,
};
use serde_json::json;

use crate::api::envelope;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::driver::{CreateDriverRequest, DriverUpdate};

/// GET /drivers
pub async fn list(State(state): State<AppState>) -> ApiResult<Response> {
    let drivers = state.drivers.list().await?;

    Ok(envelope::ok(
        "Successfully fetched all drivers",
        json!({ "drivers": drivers }),
    ))
}

/// POST /drivers
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateDriverRequest>,
) -> ApiResult<Response> {
    let id = state.drivers.create(&request).await?;

    Ok(envelope::created(
        "Driver created successfully",
        json!({ "driver": { "id": id } }),
    ))
}

/// GET /drivers/{id}
pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Response> {
    let driver = state.drivers.get(id).await?;

    Ok(envelope::ok(
        "Successfully fetched driver",
        json!({ "driver": driver }),
    ))
}

/// PUT /drivers/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<DriverUpdate>,
) -> ApiResult<Response> {
    state.drivers.update(id, &update).await?;

    Ok(envelope::ok("Successfully updated driver", json!({})))
}

/// DELETE /drivers/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Response> {
    state.drivers.delete(id).await?;

    Ok(envelope::ok("Successfully deleted driver", json!({})))
}
