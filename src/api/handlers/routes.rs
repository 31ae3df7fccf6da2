//! Route CRUD handlers.

use axum::{
    Json,
    extract::{Path, State},
    response::Response,
};
use serde_json::json;

use crate::api::envelope;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::route::{CreateRouteRequest, Route, RouteUpdate};

/// GET /routes
pub async fn list(State(state): State<AppState>) -> ApiResult<Response> {
    let routes: Vec<Route> = state
        .routes
        .list()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(envelope::ok(
        "Successfully fetched all routes",
        json!({ "routes": routes }),
    ))
}

/// POST /routes
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateRouteRequest>,
) -> ApiResult<Response> {
    if request.name.trim().is_empty() || request.description.trim().is_empty() {
        return Err(ApiError::validation("Missing or malformed input"));
    }
    if !request.points.is_array() {
        return Err(ApiError::validation("points must be an ordered array"));
    }

    let id = state.routes.create(&request).await?;

    Ok(envelope::created(
        "Route saved",
        json!({ "route": { "id": id } }),
    ))
}

/// GET /routes/{id}
pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Response> {
    let route: Route = state
        .routes
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("No such route"))?
        .into();

    Ok(envelope::ok(
        "Successfully fetched route",
        json!({ "route": route }),
    ))
}

/// PUT /routes/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<RouteUpdate>,
) -> ApiResult<Response> {
    if update.is_empty() {
        return Err(ApiError::validation("No fields provided for update"));
    }
    if let Some(points) = &update.points {
        if !points.is_array() {
            return Err(ApiError::validation("points must be an ordered array"));
        }
    }

    if !state.routes.update(id, &update).await? {
        return Err(ApiError::not_found("No such route"));
    }

    Ok(envelope::ok("Route updated successfully", json!({})))
}

/// DELETE /routes/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Response> {
    if !state.routes.delete(id).await? {
        return Err(ApiError::not_found("No such route"));
    }

    Ok(envelope::ok("Route deleted successfully", json!({})))
}
