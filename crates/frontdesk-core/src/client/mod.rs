//! Client-side protocol logic, shared by every view.
//!
//! The customer widget, the admin session list and the admin conversation
//! view all keep a local cache that must converge on the server's state
//! whether updates arrive by poll or by push. The pieces here are pure —
//! no timers, no I/O — so the same code backs all three views and is
//! trivially testable:
//!
//! - [`merge::merge_messages`] — id-keyed dedup merge + timestamp sort
//! - [`unread::ReadTracker`] — per-conversation last-read counters
//! - [`continuity::resume_or_discard`] — stored-identity revalidation

pub mod continuity;
pub mod merge;
pub mod unread;
