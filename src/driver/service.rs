//! Driver management and OTP login flows.

use std::sync::Arc;

use chrono::{Duration, Utc};
use rand::Rng;
use tracing::{info, instrument, warn};

use super::models::{CreateDriverRequest, Driver, DriverUpdate};
use super::repository::DriverRepository;
use crate::api::error::{ApiError, ApiResult};
use crate::auth::{DRIVER_SESSION_TTL, OTP_TTL, TokenService};
use crate::db::is_unique_violation;
use crate::mailer::{Mailer, login_otp_mail};

/// Service for driver records and OTP authentication.
#[derive(Clone)]
pub struct DriverService {
    repo: DriverRepository,
    tokens: TokenService,
    mailer: Arc<dyn Mailer>,
}

impl DriverService {
    /// Create a new driver service.
    pub fn new(repo: DriverRepository, tokens: TokenService, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            repo,
            tokens,
            mailer,
        }
    }

    /// List all drivers, newest first.
    pub async fn list(&self) -> ApiResult<Vec<Driver>> {
        Ok(self.repo.list().await?)
    }

    /// Register a new driver.
    #[instrument(skip(self, request), fields(phone = %request.phone))]
    pub async fn create(&self, request: &CreateDriverRequest) -> ApiResult<i64> {
        if request.name.trim().is_empty() || request.phone.trim().is_empty() {
            return Err(ApiError::validation("Missing or malformed input"));
        }

        match self.repo.create(request).await {
            Ok(id) => {
                info!(driver_id = id, "driver created");
                Ok(id)
            }
            Err(err) if is_unique_violation(&err) => {
                Err(ApiError::conflict("Phone number already registered"))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Get a driver by id.
    pub async fn get(&self, id: i64) -> ApiResult<Driver> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| ApiError::not_found("No such driver"))
    }

    /// Apply a partial update, including the liveness flag.
    pub async fn update(&self, id: i64, update: &DriverUpdate) -> ApiResult<()> {
        if update.is_empty() {
            return Err(ApiError::validation("No fields provided for update"));
        }

        match self.repo.update(id, update).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(ApiError::not_found("No such driver")),
            Err(err) if is_unique_violation(&err) => {
                Err(ApiError::conflict("Phone number already registered"))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Delete a driver.
    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        if !self.repo.delete(id).await? {
            return Err(ApiError::not_found("No such driver"));
        }
        Ok(())
    }

    /// Generate and dispatch a login OTP if the phone matches a driver.
    ///
    /// Always succeeds from the caller's perspective; the response must not
    /// reveal whether the driver exists.
    #[instrument(skip(self))]
    pub async fn request_otp(&self, phone: &str) -> ApiResult<()> {
        let Some(driver) = self.repo.get_by_phone(phone).await? else {
            return Ok(());
        };

        let code = format!("{:06}", rand::rng().random_range(0..1_000_000u32));
        let expires_at = Utc::now() + Duration::seconds(OTP_TTL.as_secs() as i64);
        self.repo.upsert_otp(driver.id, &code, expires_at).await?;

        match driver.email.as_deref() {
            Some(email) => {
                let mail = login_otp_mail(email, &driver.name, &code);
                if let Err(err) = self.mailer.send(&mail) {
                    warn!(driver_id = driver.id, error = ?err, "OTP mail delivery failed");
                }
            }
            None => warn!(driver_id = driver.id, "driver has no contact address for OTP"),
        }

        Ok(())
    }

    /// Verify an OTP and issue a 24-hour driver session token.
    ///
    /// The code is single use: it is deleted on success and on expiry
    /// detection alike.
    #[instrument(skip(self, code))]
    pub async fn login_with_otp(&self, phone: &str, code: &str) -> ApiResult<String> {
        let driver = self
            .repo
            .get_by_phone(phone)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;

        // Wrong code and no code on record fail identically.
        let otp = self
            .repo
            .get_otp(driver.id, code)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;

        if otp.expires_at < Utc::now() {
            self.repo.delete_otp(driver.id).await?;
            return Err(ApiError::OtpExpired);
        }

        self.repo.delete_otp(driver.id).await?;

        info!(driver_id = driver.id, "driver login");
        Ok(self
            .tokens
            .issue(&driver.id.to_string(), None, DRIVER_SESSION_TTL)?)
    }
}
