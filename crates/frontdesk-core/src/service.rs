//! Chat service orchestrating session lifecycle, message persistence and
//! the best-effort adapter calls.
//!
//! The store write always happens first and alone determines the
//! user-visible outcome. Adapter calls are subordinate: each one is
//! awaited and its error logged-and-dropped independently, so one
//! adapter's failure can never suppress the other's attempt, roll back
//! the write, or surface to the caller.

use frontdesk_types::chat::{ChatMessage, ChatSession, Sender, SessionOverview};
use frontdesk_types::error::ChatError;
use tracing::{info, warn};
use uuid::Uuid;

use crate::fanout::Fanout;
use crate::notify::Notifier;
use crate::store::ChatStore;

/// Orchestrates the live-chat write and read paths.
///
/// Generic over the store and both adapters so tests can inject doubles
/// and deployments can swap the backing store without touching this code.
pub struct ChatService<S: ChatStore, F: Fanout, N: Notifier> {
    store: S,
    fanout: F,
    notifier: N,
}

impl<S: ChatStore, F: Fanout, N: Notifier> ChatService<S, F, N> {
    pub fn new(store: S, fanout: F, notifier: N) -> Self {
        Self {
            store,
            fanout,
            notifier,
        }
    }

    /// Access the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Start or resume the session for this email and return it together
    /// with its message history.
    ///
    /// A repeat visitor with the same (case/whitespace-insensitive) email
    /// gets the same session back — same id, same `created_at` — along
    /// with whatever history it already holds. Adapters fire only for
    /// newly created sessions.
    pub async fn start_session(
        &self,
        email: &str,
    ) -> Result<(ChatSession, Vec<ChatMessage>), ChatError> {
        let (session, created) = self.store.create_or_get_session(email).await?;

        if created {
            info!(session_id = %session.id, "chat session created");
            if let Err(err) = self.fanout.session_created(&session).await {
                warn!(session_id = %session.id, %err, "push fanout failed for new session");
            }
            if let Err(err) = self.notifier.session_started(&session).await {
                warn!(session_id = %session.id, %err, "admin notification failed for new session");
            }
        }

        let messages = self.store.get_messages(&session.id).await?;
        Ok((session, messages))
    }

    /// Append a message to an existing session.
    ///
    /// Content is trimmed; empty-after-trim is rejected before the store
    /// is touched. The fanout fires for every message, the notifier only
    /// for customer messages, both after the append succeeded.
    pub async fn post_message(
        &self,
        session_id: &Uuid,
        sender: Sender,
        content: &str,
    ) -> Result<ChatMessage, ChatError> {
        if content.trim().is_empty() {
            return Err(ChatError::EmptyContent);
        }

        let session = self
            .store
            .get_session(session_id)
            .await?
            .ok_or(ChatError::SessionNotFound)?;

        let message = self.store.add_message(session_id, sender, content).await?;

        if let Err(err) = self.fanout.message_posted(&message).await {
            warn!(session_id = %session_id, %err, "push fanout failed for message");
        }
        if sender == Sender::Customer {
            if let Err(err) = self.notifier.customer_message(&session, &message).await {
                warn!(session_id = %session_id, %err, "admin notification failed for message");
            }
        }

        Ok(message)
    }

    /// Message history for a session, oldest first.
    ///
    /// Unlike the store, this distinguishes an unknown session (error)
    /// from an empty history (ok).
    pub async fn messages(&self, session_id: &Uuid) -> Result<Vec<ChatMessage>, ChatError> {
        if self.store.get_session(session_id).await?.is_none() {
            return Err(ChatError::SessionNotFound);
        }
        Ok(self.store.get_messages(session_id).await?)
    }

    /// Every session, newest first, with message counts. Admin-only at the
    /// HTTP layer; the service itself does no authorization.
    pub async fn sessions_overview(&self) -> Result<Vec<SessionOverview>, ChatError> {
        Ok(self.store.list_sessions().await?)
    }

    /// Drop a session's entire message history.
    ///
    /// Surfaces not-found for unknown ids (the store treats that case as
    /// a no-op); clearing an already-empty session succeeds.
    pub async fn clear_history(&self, session_id: &Uuid) -> Result<(), ChatError> {
        if self.store.get_session(session_id).await?.is_none() {
            return Err(ChatError::SessionNotFound);
        }
        self.store.clear_messages(session_id).await?;
        info!(session_id = %session_id, "chat history cleared");
        Ok(())
    }
}
