//! Authentication flows: admin password login, change/forgot/reset, and
//! driver OTP login.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;

use routed_admin::auth::{RESET_TOKEN_TTL, TokenKind, TokenService};

use common::test_app;

#[tokio::test]
async fn admin_login_returns_session_token() {
    let app = test_app().await;
    app.seed_admin("Ops", "ops@routed.test", "Sup3r$ecret").await;

    let (status, body) = app
        .post(
            "/auth/admin/login",
            None,
            json!({ "email": "ops@routed.test", "password": "Sup3r$ecret" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Login successful");

    let token = body["data"]["token"].as_str().unwrap();
    let claims = app.tokens.verify(token, None).unwrap();
    assert_eq!(claims.sub, "ops@routed.test");
}

#[tokio::test]
async fn admin_login_rejects_wrong_password() {
    let app = test_app().await;
    app.seed_admin("Ops", "ops@routed.test", "Sup3r$ecret").await;

    let (status, body) = app
        .post(
            "/auth/admin/login",
            None,
            json!({ "email": "ops@routed.test", "password": "nope" }),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid credentials");
    assert!(body["data"]["token"].is_null());
}

#[tokio::test]
async fn admin_login_unknown_email_matches_wrong_password_response() {
    let app = test_app().await;
    app.seed_admin("Ops", "ops@routed.test", "Sup3r$ecret").await;

    let (wrong_status, wrong_body) = app
        .post(
            "/auth/admin/login",
            None,
            json!({ "email": "ops@routed.test", "password": "nope" }),
        )
        .await;
    let (unknown_status, unknown_body) = app
        .post(
            "/auth/admin/login",
            None,
            json!({ "email": "ghost@routed.test", "password": "nope" }),
        )
        .await;

    assert_eq!(wrong_status, unknown_status);
    assert_eq!(wrong_body, unknown_body);
}

#[tokio::test]
async fn admin_login_missing_fields_is_validation_error() {
    let app = test_app().await;

    let (status, body) = app
        .post("/auth/admin/login", None, json!({ "email": "ops@routed.test" }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn change_password_requires_correct_old_password() {
    let app = test_app().await;
    app.seed_admin("Ops", "ops@routed.test", "Sup3r$ecret").await;
    let token = app.admin_token("ops@routed.test");

    let (status, _) = app
        .post(
            "/auth/admin/change",
            Some(&token),
            json!({ "oldPassword": "wrong", "newPassword": "N3w$tronger" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .post(
            "/auth/admin/change",
            Some(&token),
            json!({ "oldPassword": "Sup3r$ecret", "newPassword": "N3w$tronger" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Password changed successfully");

    // Old credentials stop working, new ones take over.
    let (status, _) = app
        .post(
            "/auth/admin/login",
            None,
            json!({ "email": "ops@routed.test", "password": "Sup3r$ecret" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .post(
            "/auth/admin/login",
            None,
            json!({ "email": "ops@routed.test", "password": "N3w$tronger" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn change_password_enforces_policy() {
    let app = test_app().await;
    app.seed_admin("Ops", "ops@routed.test", "Sup3r$ecret").await;
    let token = app.admin_token("ops@routed.test");

    let (status, body) = app
        .post(
            "/auth/admin/change",
            Some(&token),
            json!({ "oldPassword": "Sup3r$ecret", "newPassword": "weak" }),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn change_password_verifies_old_before_judging_new() {
    let app = test_app().await;
    app.seed_admin("Ops", "ops@routed.test", "Sup3r$ecret").await;
    let token = app.admin_token("ops@routed.test");

    // Wrong old password wins over a weak new one.
    let (status, body) = app
        .post(
            "/auth/admin/change",
            Some(&token),
            json!({ "oldPassword": "wrong", "newPassword": "weak" }),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn change_password_requires_session() {
    let app = test_app().await;

    let (status, body) = app
        .post(
            "/auth/admin/change",
            None,
            json!({ "oldPassword": "a", "newPassword": "b" }),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn forgot_password_responds_identically_for_unknown_email() {
    let app = test_app().await;
    app.seed_admin("Ops", "ops@routed.test", "Sup3r$ecret").await;

    let (known_status, known_body) = app
        .post("/auth/admin/forgot", None, json!({ "email": "ops@routed.test" }))
        .await;
    let (unknown_status, unknown_body) = app
        .post("/auth/admin/forgot", None, json!({ "email": "ghost@routed.test" }))
        .await;

    assert_eq!(known_status, StatusCode::OK);
    assert_eq!(known_status, unknown_status);
    assert_eq!(known_body, unknown_body);
    assert_eq!(
        known_body["message"],
        "If the user exists, a password reset email has been sent out"
    );
}

#[tokio::test]
async fn reset_password_full_flow() {
    let app = test_app().await;
    let admin_id = app.seed_admin("Ops", "ops@routed.test", "Sup3r$ecret").await;

    app.post("/auth/admin/forgot", None, json!({ "email": "ops@routed.test" }))
        .await;
    let reset_token = app.stored_reset_token(admin_id).await.unwrap();

    let (status, body) = app
        .post(
            "/auth/admin/reset",
            Some(&reset_token),
            json!({ "newPassword": "N3w$tronger" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Password reset successfully");

    let (status, _) = app
        .post(
            "/auth/admin/login",
            None,
            json!({ "email": "ops@routed.test", "password": "N3w$tronger" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn reset_token_is_single_use() {
    let app = test_app().await;
    let admin_id = app.seed_admin("Ops", "ops@routed.test", "Sup3r$ecret").await;

    app.post("/auth/admin/forgot", None, json!({ "email": "ops@routed.test" }))
        .await;
    let reset_token = app.stored_reset_token(admin_id).await.unwrap();

    let (status, _) = app
        .post(
            "/auth/admin/reset",
            Some(&reset_token),
            json!({ "newPassword": "N3w$tronger" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(app.stored_reset_token(admin_id).await.is_none());

    let (status, body) = app
        .post(
            "/auth/admin/reset",
            Some(&reset_token),
            json!({ "newPassword": "An0ther$tronger" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn reset_rejects_session_token() {
    let app = test_app().await;
    app.seed_admin("Ops", "ops@routed.test", "Sup3r$ecret").await;
    let session = app.admin_token("ops@routed.test");

    let (status, body) = app
        .post(
            "/auth/admin/reset",
            Some(&session),
            json!({ "newPassword": "N3w$tronger" }),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn reset_token_cannot_open_protected_routes() {
    let app = test_app().await;
    let admin_id = app.seed_admin("Ops", "ops@routed.test", "Sup3r$ecret").await;

    app.post("/auth/admin/forgot", None, json!({ "email": "ops@routed.test" }))
        .await;
    let reset_token = app.stored_reset_token(admin_id).await.unwrap();

    let (status, _) = app.get("/drivers", Some(&reset_token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn reset_rejects_token_not_backed_by_stored_row() {
    let app = test_app().await;
    app.seed_admin("Ops", "ops@routed.test", "Sup3r$ecret").await;

    // Correctly signed and kinded, but never persisted via the forgot flow.
    let forged = app
        .tokens
        .issue("ops@routed.test", Some(TokenKind::Reset), RESET_TOKEN_TTL)
        .unwrap();

    let (status, _) = app
        .post(
            "/auth/admin/reset",
            Some(&forged),
            json!({ "newPassword": "N3w$tronger" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn gate_rejects_forged_and_malformed_tokens() {
    let app = test_app().await;
    app.seed_admin("Ops", "ops@routed.test", "Sup3r$ecret").await;

    let (status, _) = app.get("/drivers", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.get("/drivers", Some("not-a-token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let other_signer = TokenService::new("some-other-secret-entirely!!!!!!!");
    let forged = other_signer
        .issue("ops@routed.test", None, RESET_TOKEN_TTL)
        .unwrap();
    let (status, _) = app.get("/drivers", Some(&forged)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn driver_otp_request_is_enumeration_resistant() {
    let app = test_app().await;
    let driver_id = app.seed_driver("Aslam", "+923001234567", true).await;

    let (known_status, known_body) = app
        .post("/auth/driver/otp", None, json!({ "phone": "+923001234567" }))
        .await;
    let (unknown_status, unknown_body) = app
        .post("/auth/driver/otp", None, json!({ "phone": "+920000000000" }))
        .await;

    assert_eq!(known_status, StatusCode::OK);
    assert_eq!(known_status, unknown_status);
    assert_eq!(known_body, unknown_body);
    assert_eq!(
        known_body["message"],
        "If the driver exists, an OTP has been sent out"
    );

    // A code was actually stored for the real driver.
    let code = app.stored_otp(driver_id).await.unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn driver_login_with_valid_otp_issues_token() {
    let app = test_app().await;
    let driver_id = app.seed_driver("Aslam", "+923001234567", true).await;

    app.post("/auth/driver/otp", None, json!({ "phone": "+923001234567" }))
        .await;
    let code = app.stored_otp(driver_id).await.unwrap();

    let (status, body) = app
        .post(
            "/auth/driver/login",
            None,
            json!({ "phone": "+923001234567", "otpCode": code }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let token = body["data"]["token"].as_str().unwrap();
    let claims = app.tokens.verify(token, None).unwrap();
    assert_eq!(claims.sub, driver_id.to_string());

    // Driver session tokens open the protected surface too.
    let (status, _) = app.get("/drivers", Some(token)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn driver_otp_is_single_use() {
    let app = test_app().await;
    let driver_id = app.seed_driver("Aslam", "+923001234567", true).await;

    app.post("/auth/driver/otp", None, json!({ "phone": "+923001234567" }))
        .await;
    let code = app.stored_otp(driver_id).await.unwrap();

    let (status, _) = app
        .post(
            "/auth/driver/login",
            None,
            json!({ "phone": "+923001234567", "otpCode": code.clone() }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(app.stored_otp(driver_id).await.is_none());

    let (status, _) = app
        .post(
            "/auth/driver/login",
            None,
            json!({ "phone": "+923001234567", "otpCode": code }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn driver_login_rejects_wrong_or_expired_otp() {
    let app = test_app().await;
    let driver_id = app.seed_driver("Aslam", "+923001234567", true).await;

    app.post("/auth/driver/otp", None, json!({ "phone": "+923001234567" }))
        .await;
    let code = app.stored_otp(driver_id).await.unwrap();

    let (status, body) = app
        .post(
            "/auth/driver/login",
            None,
            json!({ "phone": "+923001234567", "otpCode": "000000" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");

    // Push the stored code past its lifetime.
    app.expire_otp(driver_id, Utc::now() - Duration::minutes(1)).await;

    let (status, _) = app
        .post(
            "/auth/driver/login",
            None,
            json!({ "phone": "+923001234567", "otpCode": code.clone() }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Expired codes are purged on sight.
    assert!(app.stored_otp(driver_id).await.is_none());
}

#[tokio::test]
async fn new_otp_request_replaces_previous_code() {
    let app = test_app().await;
    let driver_id = app.seed_driver("Aslam", "+923001234567", true).await;

    app.post("/auth/driver/otp", None, json!({ "phone": "+923001234567" }))
        .await;

    // Force a distinguishable stored code, then request again.
    sqlx::query("UPDATE driver_otps SET code = '999999' WHERE driver_id = ?")
        .bind(driver_id)
        .execute(app.db.pool())
        .await
        .unwrap();
    app.post("/auth/driver/otp", None, json!({ "phone": "+923001234567" }))
        .await;

    let replaced = app.stored_otp(driver_id).await.unwrap();
    assert_ne!(replaced, "999999");
}
