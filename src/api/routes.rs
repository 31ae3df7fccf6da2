//! API route definitions.

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::auth::auth_middleware;

use super::handlers;
use super::state::AppState;

/// Create the application router.
///
/// Auth endpoints and health stay outside the session gate; the reset
/// endpoint verifies its own reset-kind token in the handler. Everything
/// else requires a valid session token.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let public_routes = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/auth/admin/login", post(handlers::auth::admin_login))
        .route(
            "/auth/admin/forgot",
            post(handlers::auth::admin_forgot_password),
        )
        .route(
            "/auth/admin/reset",
            post(handlers::auth::admin_reset_password),
        )
        .route("/auth/driver/otp", post(handlers::auth::driver_request_otp))
        .route("/auth/driver/login", post(handlers::auth::driver_login));

    let protected_routes = Router::new()
        .route(
            "/auth/admin/change",
            post(handlers::auth::admin_change_password),
        )
        // Admin profile
        .route("/admin/profile", get(handlers::profile::get))
        .route("/admin/profile", put(handlers::profile::update))
        // Drivers
        .route("/drivers", get(handlers::drivers::list))
        .route("/drivers", post(handlers::drivers::create))
        .route("/drivers/{id}", get(handlers::drivers::get))
        .route("/drivers/{id}", put(handlers::drivers::update))
        .route("/drivers/{id}", delete(handlers::drivers::delete))
        // Routes
        .route("/routes", get(handlers::routes::list))
        .route("/routes", post(handlers::routes::create))
        .route("/routes/{id}", get(handlers::routes::get))
        .route("/routes/{id}", put(handlers::routes::update))
        .route("/routes/{id}", delete(handlers::routes::delete))
        // Assignments
        .route("/assignments", get(handlers::assignments::list_all))
        .route(
            "/assignments/drivers/{driver_id}",
            post(handlers::assignments::assign_routes),
        )
        .route(
            "/assignments/drivers/{driver_id}",
            get(handlers::assignments::list_for_driver),
        )
        .route(
            "/assignments/drivers/{driver_id}/routes/{route_id}",
            delete(handlers::assignments::unassign_route),
        )
        // Tracking
        .route("/tracking", get(handlers::tracking::query))
        .route("/tracking", post(handlers::tracking::record))
        // Violations
        .route("/violations", get(handlers::violations::query))
        .route("/violations", post(handlers::violations::record))
        .layer(middleware::from_fn_with_state(
            state.tokens.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
