//! Tracking models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One GPS ping from a driver device.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingPing {
    pub id: i64,
    pub driver_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub recorded_at: DateTime<Utc>,
}

/// Ping ingestion payload; `recorded_at` defaults to now.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPingRequest {
    pub driver_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub recorded_at: Option<DateTime<Utc>>,
}

/// Optional filters for the tracking query, compiled into one parameterized
/// statement rather than string-built SQL.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingQuery {
    pub driver_id: Option<i64>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}
