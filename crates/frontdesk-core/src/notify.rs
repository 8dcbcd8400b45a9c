//! Notifier trait definition: best-effort outbound admin alerts.

use frontdesk_types::chat::{ChatMessage, ChatSession};
use frontdesk_types::error::AdapterError;

/// Outbound alert to an external messaging bot when a new session or a
/// customer message arrives.
///
/// Called only after the session/message is durably recorded in the store;
/// the caller absorbs every error. A notifier constructed without a token
/// or recipients returns `Ok` without any I/O.
pub trait Notifier: Send + Sync {
    /// A visitor opened a new session.
    fn session_started(
        &self,
        session: &ChatSession,
    ) -> impl std::future::Future<Output = Result<(), AdapterError>> + Send;

    /// A customer (never admin) sent a message.
    fn customer_message(
        &self,
        session: &ChatSession,
        message: &ChatMessage,
    ) -> impl std::future::Future<Output = Result<(), AdapterError>> + Send;
}
