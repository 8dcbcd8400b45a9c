//! Session HTTP handlers.
//!
//! Endpoints:
//! - POST   /chat/session                     - Start or resume a session
//! - GET    /chat/sessions                    - List all sessions (admin)
//! - DELETE /chat/sessions/{id}/messages      - Clear a session's history (admin)

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use frontdesk_types::chat::{ChatMessage, ChatSession, SessionOverview};

use crate::http::error::AppError;
use crate::http::extractors::auth::AdminSession;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionResponse {
    pub session_id: Uuid,
    pub email: String,
    pub messages: Vec<ChatMessage>,
}

/// Minimal shape check; full address validation is the mail layer's
/// problem, not ours.
fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && domain.len() > 2,
        None => false,
    }
}

/// POST /chat/session - Start a new session or resume the existing one
/// for this email.
pub async fn start_session(
    State(state): State<AppState>,
    Json(request): Json<StartSessionRequest>,
) -> Result<Json<StartSessionResponse>, AppError> {
    let email = request.email.trim();
    if email.is_empty() {
        return Err(AppError::Validation("email is required".to_string()));
    }
    if !looks_like_email(email) {
        return Err(AppError::Validation("invalid email".to_string()));
    }

    let (session, messages): (ChatSession, Vec<ChatMessage>) =
        state.chat_service.start_session(email).await?;

    Ok(Json(StartSessionResponse {
        session_id: session.id,
        email: session.email,
        messages,
    }))
}

#[derive(Debug, Serialize)]
pub struct SessionListResponse {
    pub sessions: Vec<SessionOverview>,
}

/// GET /chat/sessions - Every session, newest first, with message counts.
pub async fn list_sessions(
    State(state): State<AppState>,
    _auth: AdminSession,
) -> Result<Json<SessionListResponse>, AppError> {
    let sessions = state.chat_service.sessions_overview().await?;
    Ok(Json(SessionListResponse { sessions }))
}

/// DELETE /chat/sessions/{id}/messages - Clear one session's history.
pub async fn clear_history(
    State(state): State<AppState>,
    _auth: AdminSession,
    Path(session_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let session_id = parse_session_id(&session_id)?;
    state.chat_service.clear_history(&session_id).await?;
    Ok(Json(json!({ "ok": true })))
}

/// Parse a session id, rejecting malformed values as a validation error.
pub fn parse_session_id(s: &str) -> Result<Uuid, AppError> {
    if s.trim().is_empty() {
        return Err(AppError::Validation("sessionId is required".to_string()));
    }
    s.trim()
        .parse::<Uuid>()
        .map_err(|_| AppError::Validation(format!("invalid session id: {s}")))
}
