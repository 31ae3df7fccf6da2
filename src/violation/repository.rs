//! Violation store.

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::SqlitePool;

use super::models::{RecordViolationRequest, Violation, ViolationQuery};

/// Repository for violation rows.
#[derive(Debug, Clone)]
pub struct ViolationRepository {
    pool: SqlitePool,
}

impl ViolationRepository {
    /// Create a new repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a violation against a driver.
    pub async fn record(&self, request: &RecordViolationRequest) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO violations (driver_id, kind, message, recorded_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(request.driver_id)
        .bind(&request.kind)
        .bind(&request.message)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .context("inserting violation")?;

        Ok(result.last_insert_rowid())
    }

    /// Query violations with optional filters, newest first.
    pub async fn query(&self, query: &ViolationQuery) -> Result<Vec<Violation>> {
        let violations = sqlx::query_as::<_, Violation>(
            r#"
            SELECT id, driver_id, kind, message, recorded_at
            FROM violations
            WHERE (?1 IS NULL OR driver_id = ?1)
              AND (?2 IS NULL OR kind = ?2)
              AND (?3 IS NULL OR recorded_at >= ?3)
              AND (?4 IS NULL OR recorded_at <= ?4)
            ORDER BY recorded_at DESC
            "#,
        )
        .bind(query.driver_id)
        .bind(query.kind.as_deref())
        .bind(query.from)
        .bind(query.to)
        .fetch_all(&self.pool)
        .await
        .context("querying violations")?;

        Ok(violations)
    }
}
