//! Admin account models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Admin account row. The hash never leaves the service layer.
#[derive(Debug, Clone, FromRow)]
pub struct Admin {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Admin profile exposed over the API (no hash).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<Admin> for AdminProfile {
    fn from(admin: Admin) -> Self {
        Self {
            id: admin.id,
            name: admin.name,
            email: admin.email,
        }
    }
}

/// One active password-reset token per admin.
#[derive(Debug, Clone, FromRow)]
pub struct PasswordResetToken {
    pub admin_id: i64,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Partial profile update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl AdminProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}
