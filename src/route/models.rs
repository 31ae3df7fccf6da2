//! Route models.
//!
//! Route geometry is opaque to the backend: `points` is stored as a JSON
//! column and decoded on the way out, never interpreted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// Route row as stored, with `points` still JSON-encoded.
#[derive(Debug, Clone, FromRow)]
pub struct RouteRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub total_distance: f64,
    pub points: String,
    pub created_at: DateTime<Utc>,
}

/// Route as exposed over the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub total_distance: f64,
    pub points: Value,
    pub created_at: DateTime<Utc>,
}

impl From<RouteRow> for Route {
    fn from(row: RouteRow) -> Self {
        // A row that fails to decode was corrupted out of band; surface an
        // empty sequence rather than failing the whole listing.
        let points = serde_json::from_str(&row.points).unwrap_or(Value::Array(Vec::new()));
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            total_distance: row.total_distance,
            points,
            created_at: row.created_at,
        }
    }
}

/// Route creation payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRouteRequest {
    pub name: String,
    pub description: String,
    pub total_distance: f64,
    pub points: Value,
}

/// Partial route update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub total_distance: Option<f64>,
    pub points: Option<Value>,
}

impl RouteUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.total_distance.is_none()
            && self.points.is_none()
    }
}
