use crate::models::{
    ConversationKey, IncomingMessage, MessageRecord, NotificationSummary, PreviewLine,
};
use std::collections::HashSet;
use tracing::debug;

/// The messages shown in one notification group, bucketed by conversation.
///
/// Buckets keep first-seen order; records inside a bucket keep arrival order,
/// so the last record is the newest. A bucket is never left empty.
///
/// Holds no lock: whoever owns the index must serialize access to it.
#[derive(Debug, Default, Clone)]
pub struct ConversationIndex {
    buckets: Vec<(ConversationKey, Vec<MessageRecord>)>,
}

impl ConversationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
    }

    // ===== Getters =====

    /// Number of conversations
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ConversationKey, &[MessageRecord])> {
        self.buckets.iter().map(|(key, records)| (key, records.as_slice()))
    }

    pub fn bucket(&self, key: &ConversationKey) -> Option<&[MessageRecord]> {
        self.buckets
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, records)| records.as_slice())
    }

    pub fn total_message_count(&self) -> usize {
        self.buckets.iter().map(|(_, records)| records.len()).sum()
    }

    /// One name per conversation, in display order
    pub fn conversation_names(&self) -> Vec<&str> {
        self.buckets.iter().map(|(key, _)| key.name()).collect()
    }

    /// One line per conversation: name, pluralized count suffix, newest content.
    ///
    /// `count_suffix` maps a message count to its localized suffix.
    pub fn preview_lines<F>(&self, count_suffix: F) -> Vec<PreviewLine>
    where
        F: Fn(usize) -> String,
    {
        self.buckets
            .iter()
            .filter_map(|(key, records)| {
                let latest = records.last()?;
                Some(PreviewLine::new(
                    key.name(),
                    &count_suffix(records.len()),
                    &latest.content,
                ))
            })
            .collect()
    }

    pub fn summary<F>(&self, count_suffix: F) -> NotificationSummary
    where
        F: Fn(usize) -> String,
    {
        NotificationSummary {
            total: self.total_message_count(),
            names: self
                .conversation_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
            lines: self.preview_lines(count_suffix),
        }
    }

    // ===== Mutations =====

    /// Add a message to its conversation, opening a new bucket at the end if needed.
    /// Repeated message ids are not deduplicated.
    pub fn append(&mut self, message: &IncomingMessage) {
        let key = message.conversation_key();
        let record = message.to_record();

        match self.buckets.iter_mut().find(|(k, _)| *k == key) {
            Some((_, records)) => records.push(record),
            None => {
                debug!(key = %key, "opening conversation bucket");
                self.buckets.push((key, vec![record]));
            }
        }
    }

    /// Drop every record whose id is in `message_ids`, then any bucket left empty.
    ///
    /// An id does not tell us which conversation it belongs to, so this walks
    /// every bucket. Unknown ids are ignored. Returns the number of records removed.
    pub fn remove_by_ids(&mut self, message_ids: &HashSet<u64>) -> usize {
        let mut removed = 0;
        for (_, records) in self.buckets.iter_mut() {
            let before = records.len();
            records.retain(|r| !message_ids.contains(&r.message_id));
            removed += before - records.len();
        }
        self.buckets.retain(|(_, records)| !records.is_empty());

        if removed > 0 {
            debug!(removed, remaining = self.total_message_count(), "removed read messages");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConversationKind, Recipient, Sender};

    fn stream_msg(name: &str, stream: &str, content: &str, id: u64) -> IncomingMessage {
        IncomingMessage::new(
            Sender::new(name, format!("{}@example.com", name.to_lowercase())),
            Recipient::Stream {
                stream: stream.to_string(),
                topic: None,
            },
            content,
            id,
        )
    }

    fn private_msg(name: &str, email: &str, content: &str, id: u64) -> IncomingMessage {
        IncomingMessage::new(Sender::new(name, email), Recipient::Private, content, id)
    }

    fn ids(ids: &[u64]) -> HashSet<u64> {
        ids.iter().copied().collect()
    }

    fn plural(n: usize) -> String {
        if n == 1 {
            String::new()
        } else {
            format!(" ({})", n)
        }
    }

    fn bucket_ids(index: &ConversationIndex, key: &ConversationKey) -> Vec<u64> {
        index
            .bucket(key)
            .unwrap_or(&[])
            .iter()
            .map(|r| r.message_id)
            .collect()
    }

    #[test]
    fn test_new_index_is_empty() {
        let index = ConversationIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.total_message_count(), 0);
        assert!(index.conversation_names().is_empty());
        assert!(index.preview_lines(plural).is_empty());
    }

    #[test]
    fn test_example_scenario() {
        let mut index = ConversationIndex::new();
        index.append(&stream_msg("Alice", "general", "hi", 1));
        index.append(&stream_msg("Alice", "general", "there", 2));
        index.append(&private_msg("Bob", "bob@x", "hey", 3));

        assert_eq!(index.len(), 2);
        assert_eq!(index.total_message_count(), 3);
        assert_eq!(index.conversation_names(), vec!["Alice", "Bob"]);
        let lines = index.preview_lines(plural);
        assert_eq!(lines[0].text, "Alice (2): there");
        assert_eq!(lines[0].highlight_len, 5);
        assert_eq!(lines[1].text, "Bob: hey");

        assert_eq!(index.remove_by_ids(&ids(&[2])), 1);
        assert_eq!(index.total_message_count(), 2);
        let alice = ConversationKey::new("Alice", "general", ConversationKind::Stream);
        assert_eq!(bucket_ids(&index, &alice), vec![1]);
        assert_eq!(index.preview_lines(plural)[0].text, "Alice: hi");

        assert_eq!(index.remove_by_ids(&ids(&[1, 3])), 2);
        assert!(index.is_empty());
        assert_eq!(index.total_message_count(), 0);
        assert!(index.conversation_names().is_empty());
    }

    #[test]
    fn test_grouping_keeps_arrival_order() {
        let mut index = ConversationIndex::new();
        index.append(&stream_msg("Alice", "general", "a", 10));
        index.append(&private_msg("Bob", "bob@x", "b", 11));
        index.append(&stream_msg("Alice", "general", "c", 12));
        index.append(&stream_msg("Alice", "general", "d", 13));

        let alice = ConversationKey::new("Alice", "general", ConversationKind::Stream);
        assert_eq!(bucket_ids(&index, &alice), vec![10, 12, 13]);
        // Bucket order follows first appearance, not latest activity
        assert_eq!(index.conversation_names(), vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_distinct_keys_get_distinct_buckets() {
        let mut index = ConversationIndex::new();
        index.append(&stream_msg("Alice", "general", "1", 1));
        index.append(&stream_msg("Alice", "random", "2", 2));
        index.append(&stream_msg("Carol", "general", "3", 3));
        index.append(&private_msg("Alice", "alice@example.com", "4", 4));
        index.append(&IncomingMessage::new(
            Sender::new("Alice", "alice@example.com"),
            Recipient::GroupPm {
                pm_users: "1,2".to_string(),
            },
            "5",
            5,
        ));

        assert_eq!(index.len(), 5);
        assert_eq!(index.conversation_names().len(), 5);
        assert_eq!(
            index.conversation_names(),
            vec!["Alice", "Alice", "Carol", "Alice", "Alice"]
        );
    }

    #[test]
    fn test_duplicate_ids_are_kept_and_removed_together() {
        let mut index = ConversationIndex::new();
        index.append(&private_msg("Bob", "bob@x", "hey", 3));
        index.append(&private_msg("Bob", "bob@x", "hey", 3));
        assert_eq!(index.total_message_count(), 2);

        assert_eq!(index.remove_by_ids(&ids(&[3])), 2);
        assert!(index.is_empty());
    }

    #[test]
    fn test_remove_unknown_ids_is_noop() {
        let mut index = ConversationIndex::new();
        index.append(&private_msg("Bob", "bob@x", "hey", 3));
        assert_eq!(index.remove_by_ids(&ids(&[99, 100])), 0);
        assert_eq!(index.remove_by_ids(&HashSet::new()), 0);
        assert_eq!(index.total_message_count(), 1);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_remove_preserves_survivor_order_and_other_buckets() {
        let mut index = ConversationIndex::new();
        for id in 1..=5 {
            index.append(&stream_msg("Alice", "general", &format!("m{}", id), id));
        }
        index.append(&private_msg("Bob", "bob@x", "hey", 6));

        let before = index.total_message_count();
        let removed = index.remove_by_ids(&ids(&[2, 4, 42]));
        assert_eq!(removed, 2);
        assert_eq!(index.total_message_count(), before - removed);

        let alice = ConversationKey::new("Alice", "general", ConversationKind::Stream);
        assert_eq!(bucket_ids(&index, &alice), vec![1, 3, 5]);
        let bob = ConversationKey::new("Bob", "bob@x", ConversationKind::Private);
        assert_eq!(bucket_ids(&index, &bob), vec![6]);
    }

    #[test]
    fn test_removing_middle_bucket_keeps_order_of_rest() {
        let mut index = ConversationIndex::new();
        index.append(&private_msg("A", "a@x", "1", 1));
        index.append(&private_msg("B", "b@x", "2", 2));
        index.append(&private_msg("C", "c@x", "3", 3));

        index.remove_by_ids(&ids(&[2]));
        assert_eq!(index.conversation_names(), vec!["A", "C"]);

        // A key that was emptied and comes back goes to the end
        index.append(&private_msg("B", "b@x", "4", 4));
        assert_eq!(index.conversation_names(), vec!["A", "C", "B"]);
    }

    #[test]
    fn test_preview_tracks_latest_after_removing_earlier() {
        let mut index = ConversationIndex::new();
        index.append(&stream_msg("Alice", "general", "first", 1));
        index.append(&stream_msg("Alice", "general", "second", 2));
        index.append(&stream_msg("Alice", "general", "third", 3));

        index.remove_by_ids(&ids(&[1]));
        let lines = index.preview_lines(plural);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Alice (2): third");

        index.remove_by_ids(&ids(&[3]));
        assert_eq!(index.preview_lines(plural)[0].text, "Alice: second");
    }

    #[test]
    fn test_preview_passes_bucket_count_to_suffix() {
        let mut index = ConversationIndex::new();
        index.append(&private_msg("Bob", "bob@x", "a", 1));
        index.append(&private_msg("Bob", "bob@x", "b", 2));
        index.append(&private_msg("Bob", "bob@x", "c", 3));

        let lines = index.preview_lines(|n| format!("<{}>", n));
        assert_eq!(lines[0].text, "Bob<3>: c");
        assert_eq!(lines[0].highlighted(), "Bob");
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut index = ConversationIndex::new();
        index.append(&stream_msg("Alice", "general", "hi", 1));
        index.append(&private_msg("Bob", "bob@x", "hey", 2));

        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.total_message_count(), 0);
        assert!(index.conversation_names().is_empty());

        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.total_message_count(), 0);
        assert!(index.conversation_names().is_empty());
    }

    #[test]
    fn test_summary_matches_views() {
        let mut index = ConversationIndex::new();
        index.append(&stream_msg("Alice", "general", "hi", 1));
        index.append(&private_msg("Bob", "bob@x", "hey", 2));

        let summary = index.summary(plural);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.names, vec!["Alice".to_string(), "Bob".to_string()]);
        assert_eq!(summary.lines, index.preview_lines(plural));
        assert!(!summary.is_empty());
    }

    #[test]
    fn test_count_invariant_across_operations() {
        let mut index = ConversationIndex::new();
        for id in 0..30u64 {
            let msg = match id % 3 {
                0 => stream_msg("Alice", "general", "s", id),
                1 => private_msg("Bob", "bob@x", "p", id),
                _ => stream_msg("Carol", &format!("s{}", id % 2), "s", id),
            };
            index.append(&msg);
            let sum: usize = index.iter().map(|(_, records)| records.len()).sum();
            assert_eq!(index.total_message_count(), sum);
        }

        let before = index.total_message_count();
        let removed = index.remove_by_ids(&(0..30).step_by(4).collect());
        assert_eq!(index.total_message_count(), before - removed);
        assert!(index.iter().all(|(_, records)| !records.is_empty()));
    }
}
