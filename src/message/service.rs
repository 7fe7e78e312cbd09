//! Message session for QuickChat.
//!
//! This module drives a message through its lifecycle: composing, sending,
//! storing, and disregarding. Nothing here talks to the user directly;
//! outcomes are returned to the caller and side notes are queued as
//! [`Notice`]s for the presentation layer to drain.

use thiserror::Error;
use tracing::{debug, info, warn};

use super::persistence::PersistencePort;
use super::report::{ReportAggregator, StateCounts};
use super::store::{MessageStore, ReloadPolicy};
use super::types::{ComposeRequest, Message, MessageState, SendError, TransitionError};
use super::validation::{check_send, valid_recipient};
use crate::Result;

/// Text returned for a successful send.
pub const SEND_SUCCESS: &str = "Message successfully sent.";

/// Text returned when a disregard is confirmed.
pub const DISREGARD_CONFIRMED: &str = "Press 0 to delete message.";

/// Text returned when a disregard is cancelled.
pub const KEPT_AS_DRAFT: &str = "Message kept as draft.";

/// Text returned after storing a message.
pub const STORE_SUCCESS: &str = "Message successfully stored.";

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Something completed.
    Info,
    /// Input looks suspicious but was accepted.
    Warning,
    /// An operation was refused.
    Error,
}

/// A note for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Text to show.
    pub text: String,
}

impl Notice {
    fn new(level: NoticeLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

/// A send that was refused, handing the message back to the caller.
#[derive(Error, Debug)]
#[error("{error}")]
pub struct RejectedMessage {
    /// Why the send was refused.
    pub error: SendError,
    /// The message, unchanged.
    pub message: Message,
}

/// Result of a disregard request.
#[derive(Debug)]
pub enum DisregardOutcome {
    /// The message was thrown away.
    Disregarded,
    /// The user changed their mind; the draft is handed back.
    KeptAsDraft(Message),
}

impl DisregardOutcome {
    /// Text shown to the user.
    pub fn text(&self) -> &'static str {
        match self {
            DisregardOutcome::Disregarded => DISREGARD_CONFIRMED,
            DisregardOutcome::KeptAsDraft(_) => KEPT_AS_DRAFT,
        }
    }
}

/// Session report: counts per state and the longest sent message.
#[derive(Debug, Clone)]
pub struct SessionReport {
    /// Counts per terminal state.
    pub counts: StateCounts,
    /// Longest sent message, if any.
    pub longest_sent: Option<Message>,
    /// Messages sent during this session.
    pub total_sent: u32,
}

/// One user's messaging session.
///
/// Owns the store exclusively for the duration of the session.
pub struct MessageSession {
    store: MessageStore,
    sender: String,
    sequence_base: u32,
    total_sent: u32,
    disregarded: usize,
    notices: Vec<Notice>,
}

impl MessageSession {
    /// Start a session with an empty store.
    pub fn new(sender: impl Into<String>) -> Self {
        Self::with_store(MessageStore::new(), sender)
    }

    /// Start a session over an existing store.
    ///
    /// The hash sequence continues after the sent messages already present.
    pub fn with_store(store: MessageStore, sender: impl Into<String>) -> Self {
        let sent_before = store.with_state(MessageState::Sent).len();
        Self {
            store,
            sender: sender.into(),
            sequence_base: u32::try_from(sent_before).unwrap_or(u32::MAX),
            total_sent: 0,
            disregarded: 0,
            notices: Vec::new(),
        }
    }

    /// Start a session from saved records.
    ///
    /// A load failure is logged and the session starts empty.
    pub fn open<P: PersistencePort + ?Sized>(
        port: &P,
        policy: ReloadPolicy,
        sender: impl Into<String>,
    ) -> Self {
        let store = match port.load() {
            Ok(records) => MessageStore::from_records(records, policy),
            Err(e) => {
                warn!("failed to load saved messages, starting empty: {e}");
                MessageStore::new()
            }
        };
        info!(count = store.len(), ?policy, "message session opened");
        Self::with_store(store, sender)
    }

    /// Save the store through the given port.
    pub fn save<P: PersistencePort + ?Sized>(&self, port: &P) -> Result<()> {
        port.save(&self.store.to_records())
    }

    /// Sequence number the next composed message will carry.
    ///
    /// Counts sent messages already in the store plus those sent this
    /// session.
    pub fn next_sequence(&self) -> u32 {
        self.sequence_base
            .saturating_add(self.total_sent)
            .saturating_add(1)
    }

    /// Build a draft from raw input.
    ///
    /// Content is clipped to the maximum length, a fresh ID unused in the
    /// store is generated, and the hash is computed with
    /// [`next_sequence`](Self::next_sequence).
    pub fn compose(&mut self, request: &ComposeRequest) -> Message {
        let mut message = Message::new(self.sender.clone());

        message.set_recipient(request.recipient.clone());
        if !request.recipient.trim().is_empty() && !valid_recipient(&request.recipient) {
            self.notify(
                NoticeLevel::Warning,
                format!(
                    "Recipient number may be invalid. Please verify: {}",
                    request.recipient
                ),
            );
        }

        if message.set_content(request.content.clone()) {
            self.notify(NoticeLevel::Warning, "Message truncated to 250 characters.");
        }

        let id = self.store.unused_id();
        debug!(id = %id, "message ID generated");
        message.assign_id(id);
        message.set_sequence(self.next_sequence());
        message
    }

    /// Compose and send in one step.
    ///
    /// Guards run against the raw input, so oversized content is rejected
    /// with the exact overflow instead of being clipped.
    pub fn send(&mut self, request: &ComposeRequest) -> std::result::Result<&Message, SendError> {
        if let Err(error) = check_send(&request.content, &request.recipient) {
            self.notify(NoticeLevel::Error, error.to_string());
            return Err(error);
        }
        let message = self.compose(request);
        self.send_message(message).map_err(|rejected| rejected.error)
    }

    /// Send a composed draft and add it to the store.
    pub fn send_message(
        &mut self,
        mut message: Message,
    ) -> std::result::Result<&Message, RejectedMessage> {
        if let Err(error) = message.mark_sent() {
            self.notify(NoticeLevel::Error, error.to_string());
            return Err(RejectedMessage { error, message });
        }

        self.total_sent += 1;
        info!(
            id = message.id().unwrap_or(""),
            hash = message.hash(),
            total_sent = self.total_sent,
            "message sent"
        );
        self.notify(NoticeLevel::Info, SEND_SUCCESS);
        Ok(self.store.add(message))
    }

    /// Validate and send, reporting only success.
    pub fn quick_send(&mut self, message: Message) -> bool {
        if let Err(error) = message.validate_for_send() {
            self.notify(NoticeLevel::Error, error.to_string());
            return false;
        }
        self.send_message(message).is_ok()
    }

    /// Store a draft for later. No validation is performed.
    pub fn store(&mut self, mut message: Message) -> std::result::Result<&Message, TransitionError> {
        message.mark_stored()?;
        info!(id = message.id().unwrap_or(""), "message stored");
        self.notify(NoticeLevel::Info, STORE_SUCCESS);
        Ok(self.store.add(message))
    }

    /// Disregard a draft.
    ///
    /// With `confirmed` false the draft is handed back untouched. Disregarded
    /// messages do not enter the store; they are only tallied.
    pub fn disregard(
        &mut self,
        mut message: Message,
        confirmed: bool,
    ) -> std::result::Result<DisregardOutcome, TransitionError> {
        if !confirmed {
            self.notify(NoticeLevel::Info, KEPT_AS_DRAFT);
            return Ok(DisregardOutcome::KeptAsDraft(message));
        }

        message.mark_disregarded()?;
        self.disregarded += 1;
        info!(id = message.id().unwrap_or(""), "message disregarded");
        self.notify(NoticeLevel::Warning, "Message disregarded.");
        Ok(DisregardOutcome::Disregarded)
    }

    /// Delete the first stored message with the given hash.
    pub fn delete_by_hash(&mut self, hash: &str) -> bool {
        let deleted = self.store.delete_by_hash(hash);
        if deleted {
            info!(hash, "message deleted");
        }
        deleted
    }

    /// Sent messages in insertion order.
    pub fn recent_sent(&self) -> Vec<&Message> {
        ReportAggregator::new(&self.store).sent_messages()
    }

    /// Counts, longest sent message, and session send total.
    pub fn report(&self) -> SessionReport {
        let aggregator = ReportAggregator::new(&self.store);
        SessionReport {
            counts: aggregator.counts_by_state(self.disregarded),
            longest_sent: aggregator.longest_sent_message().cloned(),
            total_sent: self.total_sent,
        }
    }

    /// Messages sent during this session.
    pub fn total_sent(&self) -> u32 {
        self.total_sent
    }

    /// Messages disregarded during this session.
    pub fn disregarded_count(&self) -> usize {
        self.disregarded
    }

    /// Read access to the store.
    pub fn store_ref(&self) -> &MessageStore {
        &self.store
    }

    /// Hand the store back, ending the session.
    pub fn into_store(self) -> MessageStore {
        self.store
    }

    /// Take all pending notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn notify(&mut self, level: NoticeLevel, text: impl Into<String>) {
        self.notices.push(Notice::new(level, text));
    }
}
