//! Error types and error handling for the application
//!
//! This module defines the application error type and its conversion to
//! HTTP responses. The error taxonomy surfaced to callers is deliberately
//! flat: whatever goes wrong upstream, the wire response is the same
//! opaque body, and the cause is only visible in the server logs.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::upstream::UpstreamError;

/// Application-level error types
#[derive(Error, Debug)]
pub enum AppError {
    /// The completion-service call failed, for any reason (missing
    /// credential, network failure, non-2xx status, unusable payload)
    #[error("upstream completion call failed: {0}")]
    Upstream(#[from] UpstreamError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Upstream(err) => {
                // Full detail for the operator; the caller gets an opaque body
                tracing::error!(error = %err, "Completion API call failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "API failure" })),
                )
                    .into_response()
            }
        }
    }
}
