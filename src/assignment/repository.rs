//! Assignment store.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::models::{AssignmentDetailRow, DriverAssignmentRow};

/// Repository for driver-route assignment rows.
#[derive(Debug, Clone)]
pub struct AssignmentRepository {
    pool: SqlitePool,
}

impl AssignmentRepository {
    /// Create a new repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Check whether a (driver, route) pair is already assigned.
    pub async fn exists(&self, driver_id: i64, route_id: i64) -> Result<bool> {
        let row: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM assignments WHERE driver_id = ? AND route_id = ?")
                .bind(driver_id)
                .bind(route_id)
                .fetch_optional(&self.pool)
                .await
                .context("checking assignment existence")?;

        Ok(row.is_some())
    }

    /// Insert one assignment row.
    ///
    /// Returns `sqlx::Error` so the caller can distinguish a unique-pair
    /// violation, which the schema enforces as the race back-stop.
    pub async fn insert(
        &self,
        driver_id: i64,
        route_id: i64,
        assigned_at: DateTime<Utc>,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO assignments (driver_id, route_id, assigned_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(driver_id)
        .bind(route_id)
        .bind(assigned_at)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Assignments for one driver with route detail, oldest first.
    pub async fn list_for_driver(&self, driver_id: i64) -> Result<Vec<DriverAssignmentRow>> {
        let rows = sqlx::query_as::<_, DriverAssignmentRow>(
            r#"
            SELECT
                a.id, a.assigned_at,
                r.id AS route_id, r.name AS route_name, r.description,
                r.total_distance, r.points, r.created_at AS route_created_at
            FROM assignments a
            JOIN routes r ON r.id = a.route_id
            WHERE a.driver_id = ?
            ORDER BY a.assigned_at ASC
            "#,
        )
        .bind(driver_id)
        .fetch_all(&self.pool)
        .await
        .context("listing assignments for driver")?;

        Ok(rows)
    }

    /// All assignments with driver and route detail, newest first.
    pub async fn list_all(&self) -> Result<Vec<AssignmentDetailRow>> {
        let rows = sqlx::query_as::<_, AssignmentDetailRow>(
            r#"
            SELECT
                a.id, a.assigned_at,
                d.id AS driver_id, d.name AS driver_name, d.phone,
                r.id AS route_id, r.name AS route_name, r.description,
                r.total_distance, r.points, r.created_at AS route_created_at
            FROM assignments a
            JOIN drivers d ON d.id = a.driver_id
            JOIN routes r ON r.id = a.route_id
            ORDER BY a.assigned_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("listing all assignments")?;

        Ok(rows)
    }

    /// Remove the assignment for a (driver, route) pair.
    pub async fn delete(&self, driver_id: i64, route_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM assignments WHERE driver_id = ? AND route_id = ?")
            .bind(driver_id)
            .bind(route_id)
            .execute(&self.pool)
            .await
            .context("deleting assignment")?;

        Ok(result.rows_affected() > 0)
    }
}
