//! Stored-identity continuity for the customer widget.
//!
//! The widget persists `{session_id, email}` so a reload resumes the same
//! conversation. The server keeps sessions in memory only, so the stored
//! identity can go stale after a restart; on load the client probes the
//! server and either resumes with the fetched history or discards the
//! identity and falls back to the email-entry step.

use frontdesk_types::chat::ChatMessage;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The visitor's persisted chat identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredIdentity {
    pub session_id: Uuid,
    pub email: String,
}

/// Result of probing the server for a stored session id.
#[derive(Debug)]
pub enum SessionProbe {
    /// The session exists; here is its current history.
    Found(Vec<ChatMessage>),
    /// The server does not know this session (e.g. it restarted).
    Unknown,
}

/// What the client should do with its stored identity.
#[derive(Debug)]
pub enum ResumeDecision {
    /// Keep the identity and seed the local list with the history.
    Resume {
        identity: StoredIdentity,
        messages: Vec<ChatMessage>,
    },
    /// Forget the identity and ask for an email again.
    Discard,
}

/// Reconcile a stored identity against the server's answer.
pub fn resume_or_discard(identity: StoredIdentity, probe: SessionProbe) -> ResumeDecision {
    match probe {
        SessionProbe::Found(messages) => ResumeDecision::Resume { identity, messages },
        SessionProbe::Unknown => ResumeDecision::Discard,
    }
}
