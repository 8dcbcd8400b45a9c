//! Infrastructure implementations for Frontdesk.
//!
//! Concrete counterparts to the trait seams in frontdesk-core: the
//! in-memory [`memory::MemoryChatStore`], the HTTP [`push::PushRelay`],
//! the [`telegram::TelegramNotifier`], and the configuration loader.

pub mod config;
pub mod memory;
pub mod push;
pub mod telegram;
