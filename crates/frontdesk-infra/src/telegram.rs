//! Telegram notifier implementing the Notifier trait.
//!
//! Sends a short alert to each configured chat id when a new session or a
//! customer message arrives. Long bodies are truncated to a bounded
//! preview before transmission. Missing token or an empty recipient list
//! disables the notifier entirely at construction time.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use std::time::Duration;

use frontdesk_core::notify::Notifier;
use frontdesk_types::chat::{ChatMessage, ChatSession};
use frontdesk_types::config::NotifyConfig;
use frontdesk_types::error::AdapterError;

/// Maximum preview length (chars) for message bodies in alerts.
const PREVIEW_CHARS: usize = 160;

const DEFAULT_BASE_URL: &str = "https://api.telegram.org";

struct NotifierInner {
    client: reqwest::Client,
    base_url: String,
    bot_token: SecretString,
    chat_ids: Vec<i64>,
}

/// Best-effort outbound alerts via the Telegram Bot API.
pub struct TelegramNotifier {
    inner: Option<NotifierInner>,
}

impl TelegramNotifier {
    /// Build a notifier from optional credentials. `None`, or a config
    /// with no recipients, yields a disabled notifier.
    pub fn from_config(config: Option<NotifyConfig>) -> Self {
        let inner = config
            .filter(|c| !c.chat_ids.is_empty())
            .map(|c| NotifierInner {
                client: reqwest::Client::builder()
                    .timeout(Duration::from_secs(5))
                    .build()
                    .expect("failed to create reqwest client"),
                base_url: DEFAULT_BASE_URL.to_string(),
                bot_token: c.bot_token,
                chat_ids: c.chat_ids,
            });
        if inner.is_none() {
            tracing::info!("telegram notifier not configured, admin alerts disabled");
        }
        Self { inner }
    }

    /// A disabled notifier for tests and credential-less deployments.
    pub fn disabled() -> Self {
        Self { inner: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// Override the API host (for tests against a local stub).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        if let Some(inner) = &mut self.inner {
            inner.base_url = base_url.trim_end_matches('/').to_string();
        }
        self
    }

    /// Send one text to every configured recipient.
    ///
    /// All recipients are attempted even when one fails; the last failure
    /// is returned so the caller can log it.
    async fn broadcast(&self, text: &str) -> Result<(), AdapterError> {
        let Some(inner) = &self.inner else {
            return Ok(());
        };

        let url = format!(
            "{}/bot{}/sendMessage",
            inner.base_url,
            inner.bot_token.expose_secret()
        );

        let mut last_err = None;
        for chat_id in &inner.chat_ids {
            let result = inner
                .client
                .post(&url)
                .json(&json!({ "chat_id": chat_id, "text": text }))
                .send()
                .await;
            match result {
                Ok(response) if response.status().is_success() => {}
                Ok(response) => {
                    last_err = Some(AdapterError::Status(response.status().as_u16()));
                }
                Err(e) => {
                    last_err = Some(AdapterError::Request(e.to_string()));
                }
            }
        }

        match last_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Notifier for TelegramNotifier {
    async fn session_started(&self, session: &ChatSession) -> Result<(), AdapterError> {
        self.broadcast(&format!("New chat session from {}", session.email))
            .await
    }

    async fn customer_message(
        &self,
        session: &ChatSession,
        message: &ChatMessage,
    ) -> Result<(), AdapterError> {
        let preview = truncate_preview(&message.content, PREVIEW_CHARS);
        self.broadcast(&format!("{}: {}", session.email, preview))
            .await
    }
}

/// Truncate to at most `max` chars on a char boundary, appending an
/// ellipsis when anything was cut.
fn truncate_preview(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut preview: String = text.chars().take(max).collect();
    preview.push('…');
    preview
}
