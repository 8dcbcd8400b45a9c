//! Application error type mapping to HTTP status codes.
//!
//! Validation problems are 400 and never logged as exceptional;
//! not-found is 404 (clients treat it as "stored identity is stale");
//! the access gate rejects with 401; a missing admin secret fails closed
//! with 503. Internal errors log their detail server-side and return a
//! generic message — internals are never exposed by default.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use frontdesk_types::error::ChatError;

#[derive(Debug)]
pub enum AppError {
    /// Missing or malformed request field.
    Validation(String),
    /// Unknown session id.
    NotFound(String),
    /// Missing or invalid admin cookie, or wrong password.
    Unauthorized(String),
    /// Admin secret absent from configuration; login fails closed.
    NotConfigured,
    /// Anything unexpected.
    Internal(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        match e {
            ChatError::SessionNotFound => AppError::NotFound("session not found".to_string()),
            ChatError::EmptyContent => AppError::Validation("content is required".to_string()),
            ChatError::Store(msg) => AppError::Internal(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::NotConfigured => (
                StatusCode::SERVICE_UNAVAILABLE,
                "admin access is not configured".to_string(),
            ),
            AppError::Internal(detail) => {
                tracing::error!(%detail, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
