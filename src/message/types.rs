//! Message types for QuickChat.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::fingerprint::compute_hash;
use super::validation::{check_send, truncate_content, valid_id};

/// Maximum length for message content, in characters.
pub const MAX_CONTENT_LENGTH: usize = 250;

/// Maximum length for a message ID.
pub const MAX_ID_LENGTH: usize = 10;

/// Sender name used when none is given.
pub const DEFAULT_SENDER: &str = "You";

/// Characters of content shown in a listing line.
const LISTING_PREVIEW_LENGTH: usize = 50;

/// Characters of content shown in a short summary.
const SUMMARY_PREVIEW_LENGTH: usize = 30;

/// Lifecycle state of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageState {
    /// Being composed; the initial state.
    Draft,
    /// Passed validation and was sent.
    Sent,
    /// Kept for later sending, possibly still invalid.
    Stored,
    /// Thrown away by the user.
    Disregarded,
}

impl MessageState {
    /// Upper-case label used in listings.
    pub fn label(&self) -> &'static str {
        match self {
            MessageState::Draft => "DRAFT",
            MessageState::Sent => "SENT",
            MessageState::Stored => "STORED",
            MessageState::Disregarded => "DISREGARDED",
        }
    }
}

impl fmt::Display for MessageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MessageState::Draft => "draft",
            MessageState::Sent => "sent",
            MessageState::Stored => "stored",
            MessageState::Disregarded => "disregarded",
        };
        f.write_str(name)
    }
}

/// A lifecycle move that is not allowed from the current state.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cannot move a {from} message to {to}")]
pub struct TransitionError {
    /// State the message was in.
    pub from: MessageState,
    /// State that was requested.
    pub to: MessageState,
}

/// Reasons a message cannot be sent.
///
/// The display text of each variant is shown to the user verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SendError {
    /// Content is longer than the maximum.
    #[error("Message exceeds {MAX_CONTENT_LENGTH} characters by {excess}, please reduce size.")]
    TooLong {
        /// Number of characters over the limit.
        excess: usize,
    },

    /// Recipient is not a valid cell number.
    #[error("Cell phone number incorrectly formatted or does not contain international code. Please correct the number and try again.")]
    InvalidRecipient,

    /// Content is empty or whitespace.
    #[error("Message content cannot be empty.")]
    EmptyContent,

    /// Message ID is missing or too long.
    #[error("Invalid message ID.")]
    InvalidId,

    /// Message is not a draft.
    #[error(transparent)]
    Transition(#[from] TransitionError),
}

/// Raw user input for a new message.
#[derive(Debug, Clone)]
pub struct ComposeRequest {
    /// Recipient cell number as typed.
    pub recipient: String,
    /// Message content as typed, before any truncation.
    pub content: String,
}

impl ComposeRequest {
    /// Create a new compose request.
    pub fn new(recipient: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            content: content.into(),
        }
    }
}

/// A single message and its derived fingerprint.
///
/// The hash is recomputed every time the content, ID, or sequence number
/// changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    id: Option<String>,
    hash: String,
    sequence: u32,
    recipient: String,
    content: Option<String>,
    sender: String,
    state: MessageState,
    created_at: DateTime<Utc>,
}

impl Default for Message {
    fn default() -> Self {
        Self::new(DEFAULT_SENDER)
    }
}

impl Message {
    /// Create an empty draft from the given sender.
    pub fn new(sender: impl Into<String>) -> Self {
        Self {
            id: None,
            hash: String::new(),
            sequence: 0,
            recipient: String::new(),
            content: None,
            sender: sender.into(),
            state: MessageState::Draft,
            created_at: Utc::now(),
        }
    }

    /// Message ID, if one has been assigned.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Content hash. Empty until both ID and content are set.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Sequence number used for the current hash.
    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    /// Recipient cell number.
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// Message content. Empty if unset.
    pub fn content(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }

    /// Whether content has been assigned.
    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }

    /// Content length in characters.
    pub fn content_length(&self) -> usize {
        self.content().chars().count()
    }

    /// Sender name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Current lifecycle state.
    pub fn state(&self) -> MessageState {
        self.state
    }

    /// When the message was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Set the recipient. Not validated until the message is sent.
    pub fn set_recipient(&mut self, recipient: impl Into<String>) {
        self.recipient = recipient.into();
    }

    /// Set the sender.
    pub fn set_sender(&mut self, sender: impl Into<String>) {
        self.sender = sender.into();
    }

    /// Assign content, clipping it to [`MAX_CONTENT_LENGTH`] characters.
    ///
    /// Returns `true` if the content was truncated.
    pub fn set_content(&mut self, content: impl Into<String>) -> bool {
        let (content, truncated) = truncate_content(content.into());
        self.content = Some(content);
        self.refresh_hash();
        truncated
    }

    /// Set the sequence number and recompute the hash.
    pub fn set_sequence(&mut self, sequence: u32) {
        self.sequence = sequence;
        self.refresh_hash();
    }

    /// Assign the message ID.
    ///
    /// IDs are immutable: returns `false` and leaves the message untouched if
    /// an ID is already present.
    pub fn assign_id(&mut self, id: impl Into<String>) -> bool {
        if self.id.is_some() {
            return false;
        }
        self.id = Some(id.into());
        self.refresh_hash();
        true
    }

    fn refresh_hash(&mut self) {
        self.hash = compute_hash(self.id.as_deref(), self.sequence, self.content.as_deref());
    }

    /// Full pre-send validation, including the message ID.
    pub fn validate_for_send(&self) -> Result<(), SendError> {
        check_send(self.content(), &self.recipient)?;
        if !valid_id(self.id.as_deref()) {
            return Err(SendError::InvalidId);
        }
        Ok(())
    }

    fn ensure_draft(&self, to: MessageState) -> Result<(), TransitionError> {
        if self.state != MessageState::Draft {
            return Err(TransitionError {
                from: self.state,
                to,
            });
        }
        Ok(())
    }

    /// Move `draft -> sent`.
    ///
    /// Requires valid content, a valid recipient, and an assigned ID.
    pub fn mark_sent(&mut self) -> Result<(), SendError> {
        self.ensure_draft(MessageState::Sent)?;
        self.validate_for_send()?;
        self.state = MessageState::Sent;
        Ok(())
    }

    /// Move `draft -> stored`. No content or recipient checks are made.
    pub fn mark_stored(&mut self) -> Result<(), TransitionError> {
        self.ensure_draft(MessageState::Stored)?;
        self.state = MessageState::Stored;
        Ok(())
    }

    /// Move `draft -> disregarded`.
    pub fn mark_disregarded(&mut self) -> Result<(), TransitionError> {
        self.ensure_draft(MessageState::Disregarded)?;
        self.state = MessageState::Disregarded;
        Ok(())
    }

    /// One-line listing: ID, hash, recipient, content preview, and status.
    pub fn summary_line(&self) -> String {
        format!(
            "MessageID: {} | Hash: {} | Recipient: {} | Message: {} | Status: {}",
            self.id().unwrap_or(""),
            self.hash,
            self.recipient,
            preview(self.content(), LISTING_PREVIEW_LENGTH),
            self.state.label()
        )
    }

    /// Short summary of recipient and content.
    pub fn short_summary(&self) -> String {
        format!(
            "To: {} | Message: {}",
            self.recipient,
            preview(self.content(), SUMMARY_PREVIEW_LENGTH)
        )
    }

    /// Convert to the persisted record shape.
    pub fn to_record(&self) -> MessageRecord {
        MessageRecord {
            id: self.id.clone().unwrap_or_default(),
            hash: self.hash.clone(),
            recipient: self.recipient.clone(),
            content: self.content().to_string(),
            sent: self.state == MessageState::Sent,
            stored: self.state == MessageState::Stored,
            sender: self.sender.clone(),
            created_at: Some(self.created_at),
        }
    }

    /// Rebuild a message from a persisted record.
    ///
    /// `id` replaces the record's ID when given. The hash is recomputed from
    /// the content and `sequence`.
    pub(crate) fn from_record(record: MessageRecord, id: Option<String>, sequence: u32) -> Self {
        let state = if record.sent {
            MessageState::Sent
        } else if record.stored {
            MessageState::Stored
        } else {
            MessageState::Draft
        };
        let id = id.or_else(|| (!record.id.is_empty()).then_some(record.id));
        let (content, _) = truncate_content(record.content);

        let mut message = Self {
            id,
            hash: String::new(),
            sequence,
            recipient: record.recipient,
            content: Some(content),
            sender: record.sender,
            state,
            created_at: record.created_at.unwrap_or_else(Utc::now),
        };
        message.refresh_hash();
        message
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary_line())
    }
}

fn preview(content: &str, max_chars: usize) -> String {
    if content.chars().count() > max_chars {
        let head: String = content.chars().take(max_chars).collect();
        format!("{head}...")
    } else {
        content.to_string()
    }
}

/// Persisted shape of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Message ID.
    pub id: String,
    /// Content hash.
    pub hash: String,
    /// Recipient cell number.
    pub recipient: String,
    /// Message content.
    pub content: String,
    /// Whether the message was sent.
    pub sent: bool,
    /// Whether the message was stored for later.
    pub stored: bool,
    /// Sender name.
    #[serde(default = "default_record_sender")]
    pub sender: String,
    /// Creation time. Older files may lack it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_record_sender() -> String {
    DEFAULT_SENDER.to_string()
}
