//! QuickChat - single-user message composer.
//!
//! Validates messages, derives their ID and content hash, tracks each one
//! through its lifecycle, and keeps a searchable store that can be saved to
//! and reloaded from disk.

pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod message;

pub use auth::{login_status_message, Login, PasswordError, RegistrationOutcome, ValidationError};
pub use config::Config;
pub use error::{QuickChatError, Result};
pub use message::{
    ComposeRequest, DisregardOutcome, JsonFilePersistence, Message, MessageRecord, MessageSession,
    MessageState, MessageStore, Notice, NoticeLevel, PersistencePort, ReloadPolicy,
    ReportAggregator, SendError, StateCounts,
};
