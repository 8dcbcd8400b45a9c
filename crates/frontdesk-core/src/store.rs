//! ChatStore trait definition.
//!
//! Single source of truth for sessions and their message sequences.
//! Implementations live in frontdesk-infra (e.g. `MemoryChatStore`).
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).

use frontdesk_types::chat::{ChatMessage, ChatSession, Sender, SessionOverview};
use frontdesk_types::error::StoreError;
use uuid::Uuid;

/// Repository trait for chat session and message state.
///
/// Mutations are serialized by the implementation; callers treat each
/// operation as one non-overlapping logical step.
pub trait ChatStore: Send + Sync {
    /// Return the session for this email, creating it if none exists.
    ///
    /// The email is normalized (trimmed, case-folded) for the uniqueness
    /// check only; a new session stores the trimmed original casing. The
    /// boolean is `true` when the session was newly created. An existing
    /// session is returned unchanged: same id, same `created_at`.
    fn create_or_get_session(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<(ChatSession, bool), StoreError>> + Send;

    /// Pure lookup by session id.
    fn get_session(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<ChatSession>, StoreError>> + Send;

    /// Every known session, newest-created-first, each with its derived
    /// message count.
    fn list_sessions(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<SessionOverview>, StoreError>> + Send;

    /// Messages for a session ordered by `created_at` ascending.
    ///
    /// Returns the empty sequence for unknown ids — callers distinguish
    /// "unknown session" from "no messages yet" via [`ChatStore::get_session`].
    fn get_messages(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, StoreError>> + Send;

    /// Append a message to an existing session.
    ///
    /// Verifies the session exists before appending and fails the whole
    /// operation with [`StoreError::SessionNotFound`] otherwise. Content is
    /// trimmed; the message gets a fresh id and the current timestamp.
    fn add_message(
        &self,
        session_id: &Uuid,
        sender: Sender,
        content: &str,
    ) -> impl std::future::Future<Output = Result<ChatMessage, StoreError>> + Send;

    /// Replace the session's message sequence with empty.
    ///
    /// Idempotent: clearing an already-empty session is a no-op success,
    /// and an unknown session id is also a silent no-op — the API layer
    /// surfaces not-found by checking existence itself first.
    fn clear_messages(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Number of messages currently held for a session (0 for unknown ids).
    fn message_count(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<u64, StoreError>> + Send;
}
