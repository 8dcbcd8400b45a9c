//! Admin login/logout handlers.
//!
//! Endpoints:
//! - POST   /admin/auth - Password challenge, sets the admin cookie
//! - DELETE /admin/auth - Clears the admin cookie

use axum::Json;
use axum::http::header::SET_COOKIE;
use chrono::Utc;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::json;

use axum::extract::State;

use crate::http::error::AppError;
use crate::http::extractors::auth::{
    clear_cookie_header, issue_cookie_value, set_cookie_header, verify_password,
};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: String,
}

/// POST /admin/auth - Compare the password against the configured secret.
///
/// No configured secret fails closed with 503 rather than silently
/// succeeding. There is no per-admin identity: one shared secret, and
/// anyone holding it is fully privileged.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<([(axum::http::HeaderName, String); 1], Json<serde_json::Value>), AppError> {
    let Some(secret) = &state.config.admin.secret else {
        return Err(AppError::NotConfigured);
    };

    if !verify_password(secret.expose_secret(), &request.password) {
        return Err(AppError::Unauthorized("wrong password".to_string()));
    }

    let value = issue_cookie_value(secret.expose_secret(), Utc::now().timestamp());
    tracing::info!("admin authenticated");
    Ok((
        [(SET_COOKIE, set_cookie_header(&value))],
        Json(json!({ "success": true })),
    ))
}

/// DELETE /admin/auth - Return to the unauthenticated state.
///
/// Always clears the cookie and reports success: logging out an
/// already-expired session is harmless and idempotent.
pub async fn logout() -> ([(axum::http::HeaderName, String); 1], Json<serde_json::Value>) {
    (
        [(SET_COOKIE, clear_cookie_header())],
        Json(json!({ "success": true })),
    )
}
