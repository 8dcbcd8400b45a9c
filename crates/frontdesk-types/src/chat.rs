//! Chat session and message types.
//!
//! These types are both the in-process model and the wire format: fields
//! serialize in camelCase and timestamps as milliseconds since the epoch,
//! matching what the browser widget and admin inbox exchange with the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Which side of the conversation authored a message.
///
/// A closed set: anything other than `customer` or `admin` is rejected at
/// the API boundary before a message is ever constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Customer,
    Admin,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::Customer => write!(f, "customer"),
            Sender::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for Sender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Sender::Customer),
            "admin" => Ok(Sender::Admin),
            other => Err(format!("invalid sender: '{other}'")),
        }
    }
}

/// A single customer's identified conversation, keyed by email.
///
/// At most one session exists per normalized (trimmed, lowercased) email;
/// a repeat visitor submitting the same address resumes the same session.
/// Sessions live for the lifetime of the process only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: Uuid,
    /// Visitor-supplied address, trimmed but stored in its original casing.
    pub email: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

/// A single message within a session.
///
/// Messages form an append-only sequence ordered by `created_at`; nothing
/// mutates or reorders a message after creation. The only deletion path is
/// the admin clearing an entire session's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: Uuid,
    pub session_id: Uuid,
    pub sender: Sender,
    pub content: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

/// One row of the admin session list: the session plus its derived
/// message count (a count, never the materialized messages).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOverview {
    pub id: Uuid,
    pub email: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    pub message_count: u64,
}

/// Normalize an email for uniqueness comparison: trim then case-fold.
///
/// The stored session keeps the original (trimmed) casing; only the lookup
/// key goes through this.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
