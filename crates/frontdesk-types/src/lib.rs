//! Shared domain types for Frontdesk.
//!
//! This crate holds the data model for the live-chat subsystem (sessions,
//! messages, sender tags), the configuration types read at process start,
//! and the error enums shared across crates. It has no I/O of its own.

pub mod chat;
pub mod config;
pub mod error;
