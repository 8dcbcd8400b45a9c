//! Fanout trait definition: best-effort push delivery of chat events.
//!
//! The relay is a latency optimization layered over the polling path —
//! correctness never depends on it. Implementations provide at most "at
//! most once, no guaranteed delivery, no guaranteed ordering".

use frontdesk_types::chat::{ChatMessage, ChatSession};
use frontdesk_types::error::AdapterError;

/// Best-effort push publisher.
///
/// Methods return `Result` so callers (and tests) can observe that an
/// attempt was made, but every caller deliberately logs-and-drops the
/// error: a publish failure never fails or slows the primary request.
/// A relay constructed without credentials returns `Ok` without any I/O.
pub trait Fanout: Send + Sync {
    /// Broadcast a new session to the admin-wide channel.
    fn session_created(
        &self,
        session: &ChatSession,
    ) -> impl std::future::Future<Output = Result<(), AdapterError>> + Send;

    /// Broadcast a new message on the channel scoped to its session.
    fn message_posted(
        &self,
        message: &ChatMessage,
    ) -> impl std::future::Future<Output = Result<(), AdapterError>> + Send;
}
