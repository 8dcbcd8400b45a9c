//! Typed HTTP client for the chat API, used by the terminal clients.
//!
//! Maps the failure statuses the protocol cares about onto variants the
//! views branch on: 404 means "the stored identity is stale", 401 means
//! "go back to the login step". Everything else surfaces as a generic
//! rejection the views render without raw payload dumps.

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use frontdesk_types::chat::{ChatMessage, Sender, SessionOverview};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("server rejected the request: {0}")]
    Rejected(String),

    #[error("service unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStart {
    pub session_id: Uuid,
    pub email: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct MessageList {
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct SessionList {
    sessions: Vec<SessionOverview>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: String,
}

/// Client for one Frontdesk server; holds the admin cookie once logged in.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    admin_cookie: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("failed to create reqwest client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            admin_cookie: None,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Start or resume the session for this email.
    pub async fn start_session(&self, email: &str) -> Result<SessionStart, ClientError> {
        let response = self
            .http
            .post(self.url("/chat/session"))
            .json(&json!({ "email": email }))
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    /// Fetch a session's full history. 404 surfaces as
    /// [`ClientError::NotFound`], which callers treat as a stale identity.
    pub async fn messages(&self, session_id: &Uuid) -> Result<Vec<ChatMessage>, ClientError> {
        let response = self
            .http
            .get(self.url("/chat/messages"))
            .query(&[("sessionId", session_id.to_string())])
            .send()
            .await?;
        let list: MessageList = check(response).await?.json().await?;
        Ok(list.messages)
    }

    /// Send a message; the returned object is merged into local state
    /// optimistically, without waiting for the next poll.
    pub async fn send_message(
        &self,
        session_id: &Uuid,
        sender: Sender,
        content: &str,
    ) -> Result<ChatMessage, ClientError> {
        let response = self
            .http
            .post(self.url("/chat/messages"))
            .json(&json!({
                "sessionId": session_id.to_string(),
                "sender": sender.to_string(),
                "content": content,
            }))
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    /// Password challenge; stores the admin cookie on success.
    pub async fn login(&mut self, password: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .post(self.url("/admin/auth"))
            .json(&json!({ "password": password }))
            .send()
            .await?;
        let response = check(response).await?;
        let cookie = response
            .headers()
            .get(reqwest::header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|raw| raw.split(';').next())
            .map(|pair| pair.to_string())
            .ok_or_else(|| ClientError::Rejected("login response carried no cookie".into()))?;
        self.admin_cookie = Some(cookie);
        Ok(())
    }

    /// Explicit logout; clears the local cookie regardless of outcome.
    pub async fn logout(&mut self) -> Result<(), ClientError> {
        let request = self.http.delete(self.url("/admin/auth"));
        let request = self.with_cookie(request);
        self.admin_cookie = None;
        let response = request.send().await?;
        check(response).await?;
        Ok(())
    }

    /// Admin listing of every session with message counts.
    pub async fn sessions(&self) -> Result<Vec<SessionOverview>, ClientError> {
        let request = self.http.get(self.url("/chat/sessions"));
        let response = self.with_cookie(request).send().await?;
        let list: SessionList = check(response).await?.json().await?;
        Ok(list.sessions)
    }

    /// Admin clearing of one session's history.
    pub async fn clear_history(&self, session_id: &Uuid) -> Result<(), ClientError> {
        let request = self
            .http
            .delete(self.url(&format!("/chat/sessions/{session_id}/messages")));
        let response = self.with_cookie(request).send().await?;
        check(response).await?;
        Ok(())
    }

    fn with_cookie(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.admin_cookie {
            Some(cookie) => request.header(reqwest::header::COOKIE, cookie),
            None => request,
        }
    }
}

/// Map failure statuses onto the protocol's error variants.
async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .json::<ErrorBody>()
        .await
        .map(|b| b.error)
        .unwrap_or_default();
    Err(match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
        StatusCode::NOT_FOUND => ClientError::NotFound,
        StatusCode::SERVICE_UNAVAILABLE => ClientError::Unavailable(message),
        _ => ClientError::Rejected(message),
    })
}
