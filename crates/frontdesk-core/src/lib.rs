//! Business logic for the Frontdesk live-chat subsystem.
//!
//! This crate defines the trait seams (the [`store::ChatStore`] repository,
//! the best-effort [`fanout::Fanout`] and [`notify::Notifier`] adapters),
//! the [`service::ChatService`] orchestrator that ties them together, and
//! the pure client-side protocol logic shared by every view: id-keyed
//! message reconciliation, unread tracking, and stored-identity continuity.
//!
//! Concrete implementations (in-memory store, HTTP relay, Telegram bot)
//! live in frontdesk-infra; frontdesk-core never depends on them.

pub mod client;
pub mod fanout;
pub mod notify;
pub mod service;
pub mod store;
