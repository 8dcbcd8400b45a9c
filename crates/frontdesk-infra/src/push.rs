//! HTTP push relay implementing the Fanout trait.
//!
//! Publishes chat events to a hosted pub/sub relay that browser clients
//! subscribe to directly. New sessions broadcast on the admin-wide
//! channel, new messages on a channel scoped to their session id.
//!
//! Requests are authenticated with an HMAC-SHA256 signature over
//! `"{timestamp}.{body}"`, verified constant-time on the relay side.
//! Whether the relay is enabled at all is a constructor-time decision:
//! absent credentials yield a relay whose publishes return `Ok` without
//! touching the network.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use sha2::Sha256;
use std::time::Duration;

use frontdesk_core::fanout::Fanout;
use frontdesk_types::chat::{ChatMessage, ChatSession};
use frontdesk_types::config::PushConfig;
use frontdesk_types::error::AdapterError;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Channel every admin client subscribes to for new-session broadcasts.
pub const ADMIN_CHANNEL: &str = "admin-inbox";

/// Channel for one session's message stream.
pub fn session_channel(session_id: &Uuid) -> String {
    format!("session-{session_id}")
}

struct RelayInner {
    client: reqwest::Client,
    base_url: String,
    app_id: String,
    key: String,
    secret: SecretString,
}

/// Best-effort publisher to the push relay.
pub struct PushRelay {
    inner: Option<RelayInner>,
}

impl PushRelay {
    /// Build a relay from optional credentials. `None` yields a disabled
    /// relay; the system then runs polling-only.
    pub fn from_config(config: Option<PushConfig>) -> Self {
        let inner = config.map(|c| RelayInner {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(5))
                .build()
                .expect("failed to create reqwest client"),
            base_url: c.base_url.trim_end_matches('/').to_string(),
            app_id: c.app_id,
            key: c.key,
            secret: c.secret,
        });
        if inner.is_none() {
            tracing::info!("push relay not configured, realtime fanout disabled");
        }
        Self { inner }
    }

    /// A disabled relay for tests and credential-less deployments.
    pub fn disabled() -> Self {
        Self { inner: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    async fn publish(
        &self,
        channel: &str,
        event: &str,
        data: serde_json::Value,
    ) -> Result<(), AdapterError> {
        let Some(relay) = &self.inner else {
            return Ok(());
        };

        let body = json!({
            "name": event,
            "channel": channel,
            "data": data,
        })
        .to_string();

        let timestamp = chrono::Utc::now().timestamp();
        let signature = sign_request(relay.secret.expose_secret(), timestamp, &body);

        let url = format!("{}/apps/{}/events", relay.base_url, relay.app_id);
        let response = relay
            .client
            .post(&url)
            .header("content-type", "application/json")
            .header("x-relay-key", &relay.key)
            .header("x-relay-timestamp", timestamp.to_string())
            .header("x-relay-signature", signature)
            .body(body)
            .send()
            .await
            .map_err(|e| AdapterError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AdapterError::Status(response.status().as_u16()));
        }
        Ok(())
    }
}

impl Fanout for PushRelay {
    async fn session_created(&self, session: &ChatSession) -> Result<(), AdapterError> {
        self.publish(
            ADMIN_CHANNEL,
            "new-session",
            serde_json::to_value(session).map_err(|e| AdapterError::Request(e.to_string()))?,
        )
        .await
    }

    async fn message_posted(&self, message: &ChatMessage) -> Result<(), AdapterError> {
        self.publish(
            &session_channel(&message.session_id),
            "new-message",
            serde_json::to_value(message).map_err(|e| AdapterError::Request(e.to_string()))?,
        )
        .await
    }
}

/// HMAC-SHA256 over `"{timestamp}.{body}"`, lowercase hex.
fn sign_request(secret: &str, timestamp: i64, body: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(format!("{timestamp}.{body}").as_bytes());
    mac.finalize()
        .into_bytes()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}
