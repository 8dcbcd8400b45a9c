//! In-memory ChatStore implementation.
//!
//! One `RwLock` over the whole state keeps every mutation a single
//! non-overlapping logical step: create-or-get checks the email index and
//! inserts under the same write guard, and append verifies the session
//! under the guard it appends with. State is process-lifetime only — a
//! restart discards all sessions, which clients tolerate by revalidating
//! their stored identity (see frontdesk-core's continuity module).

use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use frontdesk_core::store::ChatStore;
use frontdesk_types::chat::{ChatMessage, ChatSession, Sender, SessionOverview, normalize_email};
use frontdesk_types::error::StoreError;

#[derive(Default)]
struct StoreInner {
    sessions: HashMap<Uuid, ChatSession>,
    /// Normalized email -> session id. Exactly one session per key.
    by_email: HashMap<String, Uuid>,
    /// Append-only per session; insertion order is creation-timestamp
    /// order because a single process issues both.
    messages: HashMap<Uuid, Vec<ChatMessage>>,
}

/// Process-local store backing a single-instance deployment (and tests).
///
/// Sessions created on one instance are invisible to another; that is an
/// accepted deployment constraint, not something this type works around.
#[derive(Default)]
pub struct MemoryChatStore {
    inner: RwLock<StoreInner>,
}

impl MemoryChatStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChatStore for MemoryChatStore {
    async fn create_or_get_session(&self, email: &str) -> Result<(ChatSession, bool), StoreError> {
        let mut inner = self.inner.write().await;
        let key = normalize_email(email);

        if let Some(id) = inner.by_email.get(&key) {
            let session = inner.sessions.get(id).cloned().ok_or_else(|| {
                StoreError::Backend(format!("email index points at missing session {id}"))
            })?;
            return Ok((session, false));
        }

        let session = ChatSession {
            id: Uuid::now_v7(),
            email: email.trim().to_string(),
            created_at: Utc::now(),
        };
        inner.by_email.insert(key, session.id);
        inner.sessions.insert(session.id, session.clone());
        inner.messages.insert(session.id, Vec::new());
        Ok((session, true))
    }

    async fn get_session(&self, session_id: &Uuid) -> Result<Option<ChatSession>, StoreError> {
        Ok(self.inner.read().await.sessions.get(session_id).cloned())
    }

    async fn list_sessions(&self) -> Result<Vec<SessionOverview>, StoreError> {
        let inner = self.inner.read().await;
        let mut overviews: Vec<SessionOverview> = inner
            .sessions
            .values()
            .map(|s| SessionOverview {
                id: s.id,
                email: s.email.clone(),
                created_at: s.created_at,
                message_count: inner.messages.get(&s.id).map_or(0, |m| m.len() as u64),
            })
            .collect();
        // Newest-created-first; id tiebreak keeps the order stable when
        // timestamps collide.
        overviews.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(overviews)
    }

    async fn get_messages(&self, session_id: &Uuid) -> Result<Vec<ChatMessage>, StoreError> {
        Ok(self
            .inner
            .read()
            .await
            .messages
            .get(session_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn add_message(
        &self,
        session_id: &Uuid,
        sender: Sender,
        content: &str,
    ) -> Result<ChatMessage, StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.sessions.contains_key(session_id) {
            return Err(StoreError::SessionNotFound);
        }

        let message = ChatMessage {
            id: Uuid::now_v7(),
            session_id: *session_id,
            sender,
            content: content.trim().to_string(),
            created_at: Utc::now(),
        };
        inner
            .messages
            .entry(*session_id)
            .or_default()
            .push(message.clone());
        Ok(message)
    }

    async fn clear_messages(&self, session_id: &Uuid) -> Result<(), StoreError> {
        // Unknown ids are a silent no-op; the API layer surfaces 404 by
        // checking existence itself.
        if let Some(list) = self.inner.write().await.messages.get_mut(session_id) {
            list.clear();
        }
        Ok(())
    }

    async fn message_count(&self, session_id: &Uuid) -> Result<u64, StoreError> {
        Ok(self
            .inner
            .read()
            .await
            .messages
            .get(session_id)
            .map_or(0, |m| m.len() as u64))
    }
}
