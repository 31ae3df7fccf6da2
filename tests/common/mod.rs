//! Test utilities and common setup.
#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tower::ServiceExt;

use routed_admin::admin::AdminRepository;
use routed_admin::api::{AppState, create_router};
use routed_admin::auth::{ADMIN_SESSION_TTL, TokenService};
use routed_admin::db::Database;
use routed_admin::driver::{CreateDriverRequest, DriverRepository, DriverUpdate};
use routed_admin::mailer::LogMailer;
use routed_admin::route::{CreateRouteRequest, RouteRepository};

const TEST_SECRET: &str = "test-secret-for-integration-tests-min-32";

/// Application under test with direct store access for seeding.
pub struct TestApp {
    pub router: Router,
    pub db: Database,
    pub tokens: TokenService,
}

/// Create a test application over an in-memory database.
pub async fn test_app() -> TestApp {
    let db = Database::in_memory().await.unwrap();
    let tokens = TokenService::new(TEST_SECRET);
    let state = AppState::new(
        &db,
        tokens.clone(),
        Arc::new(LogMailer),
        "https://routed.test/reset".to_string(),
    );

    TestApp {
        router: create_router(state),
        db,
        tokens,
    }
}

impl TestApp {
    /// Seed an admin account; low bcrypt cost keeps tests fast.
    pub async fn seed_admin(&self, name: &str, email: &str, password: &str) -> i64 {
        let hash = bcrypt::hash(password, 4).unwrap();
        AdminRepository::new(self.db.pool().clone())
            .create(name, email, &hash)
            .await
            .unwrap()
    }

    /// Seed a driver, optionally inactive.
    pub async fn seed_driver(&self, name: &str, phone: &str, active: bool) -> i64 {
        let repo = DriverRepository::new(self.db.pool().clone());
        let id = repo
            .create(&CreateDriverRequest {
                name: name.to_string(),
                phone: phone.to_string(),
                email: Some(format!("{phone}@drivers.test")),
            })
            .await
            .unwrap();

        if !active {
            repo.update(
                id,
                &DriverUpdate {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        }

        id
    }

    /// Seed a route.
    pub async fn seed_route(&self, name: &str) -> i64 {
        RouteRepository::new(self.db.pool().clone())
            .create(&CreateRouteRequest {
                name: name.to_string(),
                description: "test route".to_string(),
                total_distance: 12.5,
                points: serde_json::json!([[24.86, 67.0], [24.87, 67.1]]),
            })
            .await
            .unwrap()
    }

    /// Issue an admin session token directly.
    pub fn admin_token(&self, email: &str) -> String {
        self.tokens.issue(email, None, ADMIN_SESSION_TTL).unwrap()
    }

    /// Read the stored OTP code for a driver, if any.
    pub async fn stored_otp(&self, driver_id: i64) -> Option<String> {
        sqlx::query_as::<_, (String,)>("SELECT code FROM driver_otps WHERE driver_id = ?")
            .bind(driver_id)
            .fetch_optional(self.db.pool())
            .await
            .unwrap()
            .map(|(code,)| code)
    }

    /// Overwrite a driver's OTP expiry (to simulate an expired code).
    pub async fn expire_otp(&self, driver_id: i64, expires_at: DateTime<Utc>) {
        sqlx::query("UPDATE driver_otps SET expires_at = ? WHERE driver_id = ?")
            .bind(expires_at)
            .bind(driver_id)
            .execute(self.db.pool())
            .await
            .unwrap();
    }

    /// Read the stored reset token for an admin, if any.
    pub async fn stored_reset_token(&self, admin_id: i64) -> Option<String> {
        sqlx::query_as::<_, (String,)>(
            "SELECT token FROM password_reset_tokens WHERE admin_id = ?",
        )
        .bind(admin_id)
        .fetch_optional(self.db.pool())
        .await
        .unwrap()
        .map(|(token,)| token)
    }

    /// Count assignment rows for a (driver, route) pair.
    pub async fn assignment_count(&self, driver_id: i64, route_id: i64) -> i64 {
        sqlx::query_as::<_, (i64,)>(
            "SELECT COUNT(*) FROM assignments WHERE driver_id = ? AND route_id = ?",
        )
        .bind(driver_id)
        .bind(route_id)
        .fetch_one(self.db.pool())
        .await
        .unwrap()
        .0
    }

    /// Send a request and return (status, envelope body).
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().uri(uri).method(method);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(
        &self,
        uri: &str,
        token: Option<&str>,
        body: Value,
    ) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, token, None).await
    }
}
