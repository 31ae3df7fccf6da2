//! Driver store: records, liveness flag, and login OTPs.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::models::{CreateDriverRequest, Driver, DriverOtp, DriverUpdate};

const DRIVER_COLUMNS: &str = "id, name, phone, email, is_active, created_at";

/// Repository for driver records and OTP codes.
#[derive(Debug, Clone)]
pub struct DriverRepository {
    pool: SqlitePool,
}

impl DriverRepository {
    /// Create a new repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all drivers, newest first.
    pub async fn list(&self) -> Result<Vec<Driver>> {
        let drivers = sqlx::query_as::<_, Driver>(&format!(
            "SELECT {DRIVER_COLUMNS} FROM drivers ORDER BY id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .context("listing drivers")?;

        Ok(drivers)
    }

    /// Insert a new driver. Returns `sqlx::Error` so phone-uniqueness
    /// violations stay distinguishable at the call site.
    pub async fn create(&self, request: &CreateDriverRequest) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO drivers (name, phone, email, is_active, created_at)
            VALUES (?, ?, ?, 1, ?)
            "#,
        )
        .bind(&request.name)
        .bind(&request.phone)
        .bind(request.email.as_deref())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Get a driver by id.
    pub async fn get(&self, id: i64) -> Result<Option<Driver>> {
        let driver = sqlx::query_as::<_, Driver>(&format!(
            "SELECT {DRIVER_COLUMNS} FROM drivers WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("fetching driver")?;

        Ok(driver)
    }

    /// Get a driver by phone.
    pub async fn get_by_phone(&self, phone: &str) -> Result<Option<Driver>> {
        let driver = sqlx::query_as::<_, Driver>(&format!(
            "SELECT {DRIVER_COLUMNS} FROM drivers WHERE phone = ?"
        ))
        .bind(phone)
        .fetch_optional(&self.pool)
        .await
        .context("fetching driver by phone")?;

        Ok(driver)
    }

    /// Apply a partial update with a single parameterized statement.
    pub async fn update(&self, id: i64, update: &DriverUpdate) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE drivers
            SET name = COALESCE(?, name),
                phone = COALESCE(?, phone),
                email = COALESCE(?, email),
                is_active = COALESCE(?, is_active)
            WHERE id = ?
            "#,
        )
        .bind(update.name.as_deref())
        .bind(update.phone.as_deref())
        .bind(update.email.as_deref())
        .bind(update.is_active)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a driver.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM drivers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("deleting driver")?;

        Ok(result.rows_affected() > 0)
    }

    /// Upsert the single live OTP for a driver.
    pub async fn upsert_otp(
        &self,
        driver_id: i64,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO driver_otps (driver_id, code, expires_at)
            VALUES (?, ?, ?)
            ON CONFLICT(driver_id) DO UPDATE SET code = excluded.code, expires_at = excluded.expires_at
            "#,
        )
        .bind(driver_id)
        .bind(code)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .context("upserting driver OTP")?;

        Ok(())
    }

    /// Fetch the stored OTP matching this driver and code.
    ///
    /// A missing row covers both "no code requested" and "wrong code" so the
    /// caller cannot distinguish the two.
    pub async fn get_otp(&self, driver_id: i64, code: &str) -> Result<Option<DriverOtp>> {
        let otp = sqlx::query_as::<_, DriverOtp>(
            r#"
            SELECT driver_id, code, expires_at
            FROM driver_otps
            WHERE driver_id = ? AND code = ?
            "#,
        )
        .bind(driver_id)
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .context("fetching driver OTP")?;

        Ok(otp)
    }

    /// Delete a driver's OTP after use or expiry detection.
    pub async fn delete_otp(&self, driver_id: i64) -> Result<()> {
        sqlx::query("DELETE FROM driver_otps WHERE driver_id = ?")
            .bind(driver_id)
            .execute(&self.pool)
            .await
            .context("deleting driver OTP")?;

        Ok(())
    }
}
