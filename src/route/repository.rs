//! Route store.

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::SqlitePool;

use super::models::{CreateRouteRequest, RouteRow, RouteUpdate};

const ROUTE_COLUMNS: &str = "id, name, description, total_distance, points, created_at";

/// Repository for route records.
#[derive(Debug, Clone)]
pub struct RouteRepository {
    pool: SqlitePool,
}

impl RouteRepository {
    /// Create a new repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all routes, newest first.
    pub async fn list(&self) -> Result<Vec<RouteRow>> {
        let routes = sqlx::query_as::<_, RouteRow>(&format!(
            "SELECT {ROUTE_COLUMNS} FROM routes ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .context("listing routes")?;

        Ok(routes)
    }

    /// Insert a new route.
    pub async fn create(&self, request: &CreateRouteRequest) -> Result<i64> {
        let points = serde_json::to_string(&request.points).context("encoding route points")?;

        let result = sqlx::query(
            r#"
            INSERT INTO routes (name, description, total_distance, points, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&request.name)
        .bind(&request.description)
        .bind(request.total_distance)
        .bind(points)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .context("inserting route")?;

        Ok(result.last_insert_rowid())
    }

    /// Get a route by id.
    pub async fn get(&self, id: i64) -> Result<Option<RouteRow>> {
        let route = sqlx::query_as::<_, RouteRow>(&format!(
            "SELECT {ROUTE_COLUMNS} FROM routes WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("fetching route")?;

        Ok(route)
    }

    /// Check that a route exists.
    pub async fn exists(&self, id: i64) -> Result<bool> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM routes WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("checking route existence")?;

        Ok(row.is_some())
    }

    /// Apply a partial update with a single parameterized statement.
    pub async fn update(&self, id: i64, update: &RouteUpdate) -> Result<bool> {
        let points = update
            .points
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .context("encoding route points")?;

        let result = sqlx::query(
            r#"
            UPDATE routes
            SET name = COALESCE(?, name),
                description = COALESCE(?, description),
                total_distance = COALESCE(?, total_distance),
                points = COALESCE(?, points)
            WHERE id = ?
            "#,
        )
        .bind(update.name.as_deref())
        .bind(update.description.as_deref())
        .bind(update.total_distance)
        .bind(points)
        .bind(id)
        .execute(&self.pool)
        .await
        .context("updating route")?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a route.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM routes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("deleting route")?;

        Ok(result.rows_affected() > 0)
    }
}
