//! Message module for QuickChat.
//!
//! This module provides the messaging core:
//! - Field validation (recipient, content, ID)
//! - Message ID and content hash generation
//! - Message lifecycle (draft, sent, stored, disregarded)
//! - An ordered, searchable message store with reporting
//! - A persistence port for saving and reloading the store

pub mod fingerprint;
mod persistence;
mod report;
mod service;
mod store;
mod types;
pub mod validation;

pub use persistence::{InMemoryPersistence, JsonFilePersistence, PersistencePort};
pub use report::{ReportAggregator, StateCounts};
pub use service::{
    DisregardOutcome, MessageSession, Notice, NoticeLevel, RejectedMessage, SessionReport,
    DISREGARD_CONFIRMED, KEPT_AS_DRAFT, SEND_SUCCESS, STORE_SUCCESS,
};
pub use store::{MessageStore, ReloadPolicy};
pub use types::{
    ComposeRequest, Message, MessageRecord, MessageState, SendError, TransitionError,
    DEFAULT_SENDER, MAX_CONTENT_LENGTH, MAX_ID_LENGTH,
};
