//! Id-keyed message reconciliation.
//!
//! Poll responses and push deliveries run concurrently without
//! coordination; this merge is the one point where they meet. It is
//! idempotent and order-independent: merging the same message any number
//! of times, from either path, in any interleaving, yields a list with
//! that message exactly once, in timestamp order.

use frontdesk_types::chat::ChatMessage;
use std::collections::HashMap;
use uuid::Uuid;

/// Merge freshly received messages into the local list.
///
/// Builds a map of the local messages by id, upserts each incoming
/// message by id (incoming wins), then returns the merged sequence sorted
/// by `created_at` ascending with the id as a stable tiebreaker.
pub fn merge_messages(local: &[ChatMessage], incoming: &[ChatMessage]) -> Vec<ChatMessage> {
    let mut by_id: HashMap<Uuid, ChatMessage> =
        local.iter().map(|m| (m.id, m.clone())).collect();
    for message in incoming {
        by_id.insert(message.id, message.clone());
    }

    let mut merged: Vec<ChatMessage> = by_id.into_values().collect();
    merged.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use frontdesk_types::chat::Sender;

    fn msg(millis: i64, content: &str) -> ChatMessage {
        ChatMessage {
            id: Uuid::now_v7(),
            session_id: Uuid::nil(),
            sender: Sender::Customer,
            content: content.to_string(),
            created_at: DateTime::<Utc>::from_timestamp_millis(millis).unwrap(),
        }
    }

    #[test]
    fn merge_sorts_by_timestamp() {
        let a = msg(300, "c");
        let b = msg(100, "a");
        let c = msg(200, "b");
        let merged = merge_messages(&[a, b], &[c]);
        let contents: Vec<&str> = merged.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["a", "b", "c"]);
    }

    #[test]
    fn merge_is_idempotent() {
        let a = msg(100, "a");
        let b = msg(200, "b");
        let once = merge_messages(&[a.clone()], &[b.clone()]);
        let many = merge_messages(
            &merge_messages(&once, &[b.clone(), a.clone()]),
            &[a.clone(), b.clone(), b.clone()],
        );
        assert_eq!(once.len(), 2);
        assert_eq!(many.len(), 2);
        let ids: Vec<Uuid> = many.iter().map(|m| m.id).collect();
        assert_eq!(ids, once.iter().map(|m| m.id).collect::<Vec<_>>());
    }

    #[test]
    fn push_then_poll_equals_poll_then_push() {
        let history: Vec<ChatMessage> = (0..5).map(|i| msg(i * 100, "old")).collect();
        let pushed = msg(250, "pushed");
        // Push arrives first, then the poll returns the full history
        // including the pushed message.
        let mut polled = history.clone();
        polled.push(pushed.clone());
        let push_first = merge_messages(&merge_messages(&history, &[pushed.clone()]), &polled);
        let poll_first = merge_messages(&merge_messages(&history, &polled), &[pushed]);
        assert_eq!(push_first.len(), 6);
        assert_eq!(
            push_first.iter().map(|m| m.id).collect::<Vec<_>>(),
            poll_first.iter().map(|m| m.id).collect::<Vec<_>>()
        );
    }

    #[test]
    fn incoming_version_wins_on_same_id() {
        let a = msg(100, "draft");
        let mut updated = a.clone();
        updated.content = "final".to_string();
        let merged = merge_messages(&[a], &[updated]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].content, "final");
    }

    #[test]
    fn merge_into_empty_local() {
        let a = msg(100, "a");
        let merged = merge_messages(&[], &[a.clone()]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].id, a.id);
    }
}
