//! Message HTTP handlers.
//!
//! Endpoints:
//! - GET  /chat/messages?sessionId=  - List a session's messages
//! - POST /chat/messages             - Send a message

use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use frontdesk_types::chat::{ChatMessage, Sender};

use crate::http::error::AppError;
use crate::http::handlers::session::parse_session_id;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MessageListQuery {
    #[serde(rename = "sessionId", default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageListResponse {
    pub messages: Vec<ChatMessage>,
}

/// GET /chat/messages?sessionId= - Full history, oldest first.
pub async fn list_messages(
    State(state): State<AppState>,
    Query(query): Query<MessageListQuery>,
) -> Result<Json<MessageListResponse>, AppError> {
    let session_id = query
        .session_id
        .as_deref()
        .ok_or_else(|| AppError::Validation("sessionId is required".to_string()))?;
    let session_id = parse_session_id(session_id)?;

    let messages = state.chat_service.messages(&session_id).await?;
    Ok(Json(MessageListResponse { messages }))
}

/// Fields arrive as free strings and are validated here; the `sender` tag
/// in particular is checked against the closed enum before anything is
/// written.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// POST /chat/messages - Append a message to a session.
pub async fn send_message(
    State(state): State<AppState>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<ChatMessage>, AppError> {
    let session_id = request
        .session_id
        .as_deref()
        .ok_or_else(|| AppError::Validation("sessionId is required".to_string()))?;
    let session_id = parse_session_id(session_id)?;

    let sender = request
        .sender
        .as_deref()
        .ok_or_else(|| AppError::Validation("sender is required".to_string()))?
        .parse::<Sender>()
        .map_err(AppError::Validation)?;

    let content = request
        .content
        .as_deref()
        .ok_or_else(|| AppError::Validation("content is required".to_string()))?;

    let message = state
        .chat_service
        .post_message(&session_id, sender, content)
        .await?;
    Ok(Json(message))
}
