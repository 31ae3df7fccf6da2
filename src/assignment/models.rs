//! Assignment models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::route::Route;

/// One element of a batch assignment request.
///
/// Fields are optional on the wire so that missing input fails with a precise
/// envelope error instead of a bare deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentItem {
    pub route_id: Option<i64>,
    pub assigned_at: Option<String>,
}

/// A batch item that has passed input validation.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedItem {
    pub route_id: i64,
    pub assigned_at: DateTime<Utc>,
}

/// Assignment plus route detail, as returned for a single driver.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverAssignment {
    pub id: i64,
    pub assigned_at: DateTime<Utc>,
    pub route: Route,
}

/// Driver summary embedded in the full assignment listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverSummary {
    pub id: i64,
    pub name: String,
    pub phone: String,
}

/// Assignment plus driver and route detail, as returned for the fleet view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentDetail {
    pub id: i64,
    pub assigned_at: DateTime<Utc>,
    pub driver: DriverSummary,
    pub route: Route,
}

/// Flat join row behind [`DriverAssignment`].
#[derive(Debug, Clone, FromRow)]
pub struct DriverAssignmentRow {
    pub id: i64,
    pub assigned_at: DateTime<Utc>,
    pub route_id: i64,
    pub route_name: String,
    pub description: String,
    pub total_distance: f64,
    pub points: String,
    pub route_created_at: DateTime<Utc>,
}

/// Flat join row behind [`AssignmentDetail`].
#[derive(Debug, Clone, FromRow)]
pub struct AssignmentDetailRow {
    pub id: i64,
    pub assigned_at: DateTime<Utc>,
    pub driver_id: i64,
    pub driver_name: String,
    pub phone: String,
    pub route_id: i64,
    pub route_name: String,
    pub description: String,
    pub total_distance: f64,
    pub points: String,
    pub route_created_at: DateTime<Utc>,
}

fn decode_points(points: &str) -> serde_json::Value {
    serde_json::from_str(points).unwrap_or(serde_json::Value::Array(Vec::new()))
}

impl From<DriverAssignmentRow> for DriverAssignment {
    fn from(row: DriverAssignmentRow) -> Self {
        Self {
            id: row.id,
            assigned_at: row.assigned_at,
            route: Route {
                id: row.route_id,
                name: row.route_name,
                description: row.description,
                total_distance: row.total_distance,
                points: decode_points(&row.points),
                created_at: row.route_created_at,
            },
        }
    }
}

impl From<AssignmentDetailRow> for AssignmentDetail {
    fn from(row: AssignmentDetailRow) -> Self {
        Self {
            id: row.id,
            assigned_at: row.assigned_at,
            driver: DriverSummary {
                id: row.driver_id,
                name: row.driver_name,
                phone: row.phone,
            },
            route: Route {
                id: row.route_id,
                name: row.route_name,
                description: row.description,
                total_distance: row.total_distance,
                points: decode_points(&row.points),
                created_at: row.route_created_at,
            },
        }
    }
}
