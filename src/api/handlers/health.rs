//! Health check handler.

use axum::response::Response;
use serde_json::json;

use crate::api::envelope;

/// GET /health (ungated)
pub async fn health() -> Response {
    envelope::ok(
        "Service healthy",
        json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
        }),
    )
}
