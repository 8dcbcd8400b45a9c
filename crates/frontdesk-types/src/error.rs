use thiserror::Error;

/// Errors from store implementations (used by the trait definition in
/// frontdesk-core).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session not found")]
    SessionNotFound,

    /// Backend failure in a persistent implementation. The in-memory store
    /// never produces this variant.
    #[error("storage error: {0}")]
    Backend(String),
}

/// Errors from chat service operations.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("session not found")]
    SessionNotFound,

    #[error("message content is empty")]
    EmptyContent,

    #[error("storage error: {0}")]
    Store(String),
}

impl From<StoreError> for ChatError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::SessionNotFound => ChatError::SessionNotFound,
            StoreError::Backend(msg) => ChatError::Store(msg),
        }
    }
}

/// Errors from the best-effort adapters (push fanout, admin notification).
///
/// These are always absorbed at the call site: the caller logs the failure
/// and the primary request proceeds. They exist as a type so tests can
/// assert that an attempt was made and what went wrong.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("unexpected status {0}")]
    Status(u16),
}
