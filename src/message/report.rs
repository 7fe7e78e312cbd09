//! Summary statistics over a message store.

use super::store::MessageStore;
use super::types::{Message, MessageState};

/// Message counts per terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StateCounts {
    /// Sent messages.
    pub sent: usize,
    /// Stored messages.
    pub stored: usize,
    /// Disregarded messages, in the store or tallied outside it.
    pub disregarded: usize,
}

impl StateCounts {
    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.sent + self.stored + self.disregarded
    }
}

/// Read-only reporting over a [`MessageStore`].
pub struct ReportAggregator<'a> {
    store: &'a MessageStore,
}

impl<'a> ReportAggregator<'a> {
    /// Create a new aggregator over the given store.
    pub fn new(store: &'a MessageStore) -> Self {
        Self { store }
    }

    /// Count messages per state.
    ///
    /// Disregarded messages usually leave the store, so the caller passes
    /// its own tally which is added to any still present.
    pub fn counts_by_state(&self, disregarded_outside: usize) -> StateCounts {
        let mut counts = StateCounts {
            disregarded: disregarded_outside,
            ..StateCounts::default()
        };
        for message in self.store {
            match message.state() {
                MessageState::Sent => counts.sent += 1,
                MessageState::Stored => counts.stored += 1,
                MessageState::Disregarded => counts.disregarded += 1,
                MessageState::Draft => {}
            }
        }
        counts
    }

    /// The sent message with the longest content.
    ///
    /// Ties go to the earliest inserted message.
    pub fn longest_sent_message(&self) -> Option<&'a Message> {
        let mut longest: Option<&'a Message> = None;
        for message in self.store.iter().filter(|m| m.state() == MessageState::Sent) {
            let is_longer = longest.map_or(true, |best| {
                message.content_length() > best.content_length()
            });
            if is_longer {
                longest = Some(message);
            }
        }
        longest
    }

    /// Sent messages in insertion order.
    pub fn sent_messages(&self) -> Vec<&'a Message> {
        self.store.with_state(MessageState::Sent)
    }
}
