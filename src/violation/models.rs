//! Violation models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One logged policy violation.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub id: i64,
    pub driver_id: i64,
    pub kind: String,
    pub message: String,
    pub recorded_at: DateTime<Utc>,
}

/// Violation ingestion payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordViolationRequest {
    pub driver_id: i64,
    pub kind: String,
    pub message: String,
}

/// Optional filters for the violation query.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationQuery {
    pub driver_id: Option<i64>,
    pub kind: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}
