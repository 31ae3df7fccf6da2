//! Admin authentication flows.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{info, instrument, warn};

use super::models::{AdminProfile, AdminProfileUpdate};
use super::repository::AdminRepository;
use crate::api::error::{ApiError, ApiResult};
use crate::auth::{ADMIN_SESSION_TTL, RESET_TOKEN_TTL, TokenKind, TokenService, password};
use crate::db::is_unique_violation;
use crate::mailer::{Mailer, password_reset_mail};

/// Service for admin login, password management, and profile access.
#[derive(Clone)]
pub struct AdminService {
    repo: AdminRepository,
    tokens: TokenService,
    mailer: Arc<dyn Mailer>,
    reset_link_base: String,
}

impl AdminService {
    /// Create a new admin service.
    pub fn new(
        repo: AdminRepository,
        tokens: TokenService,
        mailer: Arc<dyn Mailer>,
        reset_link_base: String,
    ) -> Self {
        Self {
            repo,
            tokens,
            mailer,
            reset_link_base,
        }
    }

    /// Password login; issues a 1-hour session token.
    ///
    /// Absent account and wrong password are indistinguishable to the caller.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<String> {
        let admin = self
            .repo
            .get_by_email(email)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;

        if !password::verify(password, &admin.password_hash)? {
            return Err(ApiError::InvalidCredentials);
        }

        info!(admin_id = admin.id, "admin login");
        Ok(self.tokens.issue(&admin.email, None, ADMIN_SESSION_TTL)?)
    }

    /// Change the password of the authenticated admin.
    #[instrument(skip(self, old_password, new_password))]
    pub async fn change_password(
        &self,
        email: &str,
        old_password: &str,
        new_password: &str,
    ) -> ApiResult<()> {
        let admin = self
            .repo
            .get_by_email(email)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;

        // The caller proves the old password before the new one is judged.
        if !password::verify(old_password, &admin.password_hash)? {
            return Err(ApiError::InvalidCredentials);
        }

        if !password::meets_requirements(new_password) {
            return Err(ApiError::WeakPassword);
        }

        let hash = password::hash(new_password)?;
        self.repo.update_password_hash(email, &hash).await?;

        info!(admin_id = admin.id, "admin password changed");
        Ok(())
    }

    /// Issue and mail a reset token if the email matches a known admin.
    ///
    /// Always succeeds from the caller's perspective; the response must not
    /// reveal whether the account exists.
    #[instrument(skip(self))]
    pub async fn forgot_password(&self, email: &str) -> ApiResult<()> {
        let Some(admin) = self.repo.get_by_email(email).await? else {
            return Ok(());
        };

        let token = self
            .tokens
            .issue(&admin.email, Some(TokenKind::Reset), RESET_TOKEN_TTL)?;

        let expires_at = Utc::now() + Duration::seconds(RESET_TOKEN_TTL.as_secs() as i64);
        self.repo
            .upsert_reset_token(admin.id, &token, expires_at)
            .await?;

        let link = format!("{}/{}", self.reset_link_base.trim_end_matches('/'), token);
        let mail = password_reset_mail(&admin.email, &admin.name, &link);
        if let Err(err) = self.mailer.send(&mail) {
            // Delivery failure must not change the response either.
            warn!(admin_id = admin.id, error = ?err, "reset mail delivery failed");
        }

        Ok(())
    }

    /// Consume a reset-kind token and set a new password.
    ///
    /// The token must verify with the reset kind, match the single stored
    /// token for that admin, and be unexpired; it is deleted on use.
    #[instrument(skip(self, token, new_password))]
    pub async fn reset_password(&self, token: &str, new_password: &str) -> ApiResult<()> {
        let claims = self.tokens.verify(token, Some(TokenKind::Reset))?;

        if !password::meets_requirements(new_password) {
            return Err(ApiError::WeakPassword);
        }

        let admin = self
            .repo
            .get_by_email(&claims.sub)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;

        // Single use: the token must still be the one on record.
        let stored = self
            .repo
            .get_reset_token(admin.id)
            .await?
            .filter(|row| row.token == token)
            .ok_or(ApiError::InvalidCredentials)?;

        if stored.expires_at < Utc::now() {
            self.repo.delete_reset_token(admin.id).await?;
            return Err(ApiError::InvalidCredentials);
        }

        let hash = password::hash(new_password)?;
        self.repo.update_password_hash(&admin.email, &hash).await?;
        self.repo.delete_reset_token(admin.id).await?;

        info!(admin_id = admin.id, "admin password reset");
        Ok(())
    }

    /// Profile of the authenticated admin.
    pub async fn profile(&self, email: &str) -> ApiResult<AdminProfile> {
        let admin = self
            .repo
            .get_by_email(email)
            .await?
            .ok_or_else(|| ApiError::not_found("Admin profile not found"))?;

        Ok(admin.into())
    }

    /// Partial update of the authenticated admin's profile.
    pub async fn update_profile(&self, email: &str, update: &AdminProfileUpdate) -> ApiResult<()> {
        if update.is_empty() {
            return Err(ApiError::validation("No fields provided for update"));
        }

        match self.repo.update_profile(email, update).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(ApiError::not_found("Admin profile not found")),
            Err(err) if is_unique_violation(&err) => {
                Err(ApiError::conflict("Email already in use"))
            }
            Err(err) => Err(err.into()),
        }
    }
}
