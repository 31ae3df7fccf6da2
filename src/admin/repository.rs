//! Admin credential store.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::models::{Admin, AdminProfileUpdate, PasswordResetToken};

/// Repository for admin accounts and password-reset tokens.
#[derive(Debug, Clone)]
pub struct AdminRepository {
    pool: SqlitePool,
}

impl AdminRepository {
    /// Create a new repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get an admin by email.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<Admin>> {
        let admin = sqlx::query_as::<_, Admin>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM admins
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .context("fetching admin by email")?;

        Ok(admin)
    }

    /// Insert a new admin account (seeding and tests).
    pub async fn create(&self, name: &str, email: &str, password_hash: &str) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO admins (name, email, password_hash, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .context("inserting admin")?;

        Ok(result.last_insert_rowid())
    }

    /// Replace the stored password hash for an admin.
    pub async fn update_password_hash(&self, email: &str, password_hash: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE admins SET password_hash = ? WHERE email = ?")
            .bind(password_hash)
            .bind(email)
            .execute(&self.pool)
            .await
            .context("updating admin password hash")?;

        Ok(result.rows_affected() > 0)
    }

    /// Apply a partial profile update with a single parameterized statement.
    /// Returns `sqlx::Error` so email-uniqueness violations stay
    /// distinguishable at the call site.
    pub async fn update_profile(
        &self,
        email: &str,
        update: &AdminProfileUpdate,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE admins
            SET name = COALESCE(?, name),
                email = COALESCE(?, email)
            WHERE email = ?
            "#,
        )
        .bind(update.name.as_deref())
        .bind(update.email.as_deref())
        .bind(email)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Upsert the single active reset token for an admin.
    pub async fn upsert_reset_token(
        &self,
        admin_id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO password_reset_tokens (admin_id, token, expires_at)
            VALUES (?, ?, ?)
            ON CONFLICT(admin_id) DO UPDATE SET token = excluded.token, expires_at = excluded.expires_at
            "#,
        )
        .bind(admin_id)
        .bind(token)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .context("upserting reset token")?;

        Ok(())
    }

    /// Fetch the active reset token for an admin, if any.
    pub async fn get_reset_token(&self, admin_id: i64) -> Result<Option<PasswordResetToken>> {
        let token = sqlx::query_as::<_, PasswordResetToken>(
            r#"
            SELECT admin_id, token, expires_at
            FROM password_reset_tokens
            WHERE admin_id = ?
            "#,
        )
        .bind(admin_id)
        .fetch_optional(&self.pool)
        .await
        .context("fetching reset token")?;

        Ok(token)
    }

    /// Delete the reset token after use or expiry.
    pub async fn delete_reset_token(&self, admin_id: i64) -> Result<()> {
        sqlx::query("DELETE FROM password_reset_tokens WHERE admin_id = ?")
            .bind(admin_id)
            .execute(&self.pool)
            .await
            .context("deleting reset token")?;

        Ok(())
    }
}
