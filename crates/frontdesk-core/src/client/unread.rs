//! Per-conversation "last read" counters driving unread badges.
//!
//! Two independent trackers exist at runtime: the customer widget tracks
//! admin-authored messages, the admin views track total message counts per
//! session. Both use the same arithmetic: unread is derived, never stored,
//! never negative, and snaps to zero the moment the view becomes focused.

use std::collections::HashMap;
use uuid::Uuid;

/// Tracks how many relevant messages the viewer has already seen, per
/// conversation.
#[derive(Debug, Default)]
pub struct ReadTracker {
    last_read: HashMap<Uuid, u64>,
}

impl ReadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derived unread count: `max(0, total - last_read)`.
    pub fn unread(&self, session_id: &Uuid, total: u64) -> u64 {
        total.saturating_sub(self.last_read.get(session_id).copied().unwrap_or(0))
    }

    /// Record that the viewer has seen everything up to the current total.
    ///
    /// Called when the relevant view becomes actively open/focused. Sets
    /// the counter to the exact total, including downward after an admin
    /// cleared the history.
    pub fn mark_read(&mut self, session_id: &Uuid, total: u64) {
        self.last_read.insert(*session_id, total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unread_starts_at_total() {
        let tracker = ReadTracker::new();
        assert_eq!(tracker.unread(&Uuid::nil(), 3), 3);
        assert_eq!(tracker.unread(&Uuid::nil(), 0), 0);
    }

    #[test]
    fn mark_read_resets_to_current_total() {
        let id = Uuid::now_v7();
        let mut tracker = ReadTracker::new();
        tracker.mark_read(&id, 5);
        assert_eq!(tracker.unread(&id, 5), 0);
        assert_eq!(tracker.unread(&id, 8), 3);
    }

    #[test]
    fn unread_never_negative_after_clear() {
        let id = Uuid::now_v7();
        let mut tracker = ReadTracker::new();
        tracker.mark_read(&id, 10);
        // History was cleared server-side; total dropped below last_read.
        assert_eq!(tracker.unread(&id, 2), 0);
        tracker.mark_read(&id, 2);
        assert_eq!(tracker.unread(&id, 4), 2);
    }

    #[test]
    fn sessions_tracked_independently() {
        let a = Uuid::now_v7();
        let b = Uuid::now_v7();
        let mut tracker = ReadTracker::new();
        tracker.mark_read(&a, 4);
        assert_eq!(tracker.unread(&a, 6), 2);
        assert_eq!(tracker.unread(&b, 6), 6);
    }
}
