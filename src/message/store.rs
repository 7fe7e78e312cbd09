//! In-memory message store for QuickChat.

use tracing::debug;

use super::fingerprint::{generate_id, parse_sequence};
use super::types::{Message, MessageRecord, MessageState};

/// What to do with saved message IDs when hydrating a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReloadPolicy {
    /// Keep saved IDs.
    Preserve,
    /// Discard saved IDs and generate new ones.
    #[default]
    Regenerate,
}

/// Ordered, growable collection of messages.
///
/// Insertion order is preserved and every search returns results in that
/// order.
#[derive(Debug, Clone, Default)]
pub struct MessageStore {
    messages: Vec<Message>,
}

impl MessageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message, returning a reference to it in the store.
    pub fn add(&mut self, message: Message) -> &Message {
        debug!(
            id = message.id().unwrap_or(""),
            state = %message.state(),
            "message added to store"
        );
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    /// Find the first message with the given ID.
    pub fn find_by_id(&self, id: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.id() == Some(id))
    }

    /// Check whether any message carries the given ID.
    pub fn contains_id(&self, id: &str) -> bool {
        self.find_by_id(id).is_some()
    }

    /// All messages whose recipient contains `fragment`.
    pub fn find_by_recipient_substring(&self, fragment: &str) -> Vec<&Message> {
        self.messages
            .iter()
            .filter(|m| m.recipient().contains(fragment))
            .collect()
    }

    /// All messages in the given state.
    pub fn with_state(&self, state: MessageState) -> Vec<&Message> {
        self.messages.iter().filter(|m| m.state() == state).collect()
    }

    /// Remove the first message with the given hash.
    ///
    /// Returns whether a message was removed.
    pub fn delete_by_hash(&mut self, hash: &str) -> bool {
        match self.messages.iter().position(|m| m.hash() == hash) {
            Some(index) => {
                let removed = self.messages.remove(index);
                debug!(id = removed.id().unwrap_or(""), hash, "message deleted");
                true
            }
            None => false,
        }
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the store holds no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    /// Snapshot the store as persistence records, in insertion order.
    pub fn to_records(&self) -> Vec<MessageRecord> {
        self.messages.iter().map(Message::to_record).collect()
    }

    /// Hydrate a store from persistence records.
    ///
    /// The sequence number is read back from each saved hash, falling back to
    /// the record's 1-based position. Under [`ReloadPolicy::Regenerate`] every
    /// message gets a fresh ID and its hash is recomputed to match.
    pub fn from_records(records: Vec<MessageRecord>, policy: ReloadPolicy) -> Self {
        let mut store = Self::new();
        for (index, record) in records.into_iter().enumerate() {
            let position = u32::try_from(index + 1).unwrap_or(u32::MAX);
            let sequence = parse_sequence(&record.hash).unwrap_or(position);
            let id = match policy {
                ReloadPolicy::Preserve => None,
                ReloadPolicy::Regenerate => Some(store.unused_id()),
            };
            store
                .messages
                .push(Message::from_record(record, id, sequence));
        }
        store
    }

    /// Generate an ID not yet present in the store.
    ///
    /// Gives up after a few collisions and returns the last candidate.
    pub fn unused_id(&self) -> String {
        const MAX_ATTEMPTS: usize = 8;

        let mut candidate = generate_id();
        for _ in 1..MAX_ATTEMPTS {
            if !self.contains_id(&candidate) {
                break;
            }
            candidate = generate_id();
        }
        candidate
    }
}

impl<'a> IntoIterator for &'a MessageStore {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
