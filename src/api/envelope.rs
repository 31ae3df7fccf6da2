//! Uniform response envelope.
//!
//! Every response, success or failure, carries `{ success, message, data }`
//! where `success` is true iff the HTTP status is 2xx. Clients branch on the
//! `success` field rather than only on the status code.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// Response envelope body.
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub success: bool,
    pub message: String,
    pub data: Value,
}

impl Envelope {
    /// Successful envelope with a data payload.
    pub fn success(message: impl Into<String>, data: Value) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }

    /// Failure envelope; data is always an empty object.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: json!({}),
        }
    }
}

/// 200 response with the uniform envelope.
pub fn ok(message: impl Into<String>, data: Value) -> Response {
    (StatusCode::OK, Json(Envelope::success(message, data))).into_response()
}

/// 201 response with the uniform envelope.
pub fn created(message: impl Into<String>, data: Value) -> Response {
    (StatusCode::CREATED, Json(Envelope::success(message, data))).into_response()
}
