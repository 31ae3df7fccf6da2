//! Tracking store.

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::SqlitePool;

use super::models::{RecordPingRequest, TrackingPing, TrackingQuery};

/// Repository for GPS ping rows.
#[derive(Debug, Clone)]
pub struct TrackingRepository {
    pool: SqlitePool,
}

impl TrackingRepository {
    /// Create a new repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record one ping.
    pub async fn record(&self, request: &RecordPingRequest) -> Result<i64> {
        let recorded_at = request.recorded_at.unwrap_or_else(Utc::now);

        let result = sqlx::query(
            r#"
            INSERT INTO tracking_pings (driver_id, latitude, longitude, recorded_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(request.driver_id)
        .bind(request.latitude)
        .bind(request.longitude)
        .bind(recorded_at)
        .execute(&self.pool)
        .await
        .context("inserting tracking ping")?;

        Ok(result.last_insert_rowid())
    }

    /// Query pings with optional driver and time-window filters, newest first.
    pub async fn query(&self, query: &TrackingQuery) -> Result<Vec<TrackingPing>> {
        let pings = sqlx::query_as::<_, TrackingPing>(
            r#"
            SELECT id, driver_id, latitude, longitude, recorded_at
            FROM tracking_pings
            WHERE (?1 IS NULL OR driver_id = ?1)
              AND (?2 IS NULL OR recorded_at >= ?2)
              AND (?3 IS NULL OR recorded_at <= ?3)
            ORDER BY recorded_at DESC
            "#,
        )
        .bind(query.driver_id)
        .bind(query.from)
        .bind(query.to)
        .fetch_all(&self.pool)
        .await
        .context("querying tracking pings")?;

        Ok(pings)
    }
}
