//! Error types for QuickChat.

use thiserror::Error;

use crate::auth::PasswordError;

/// Common error type for QuickChat.
#[derive(Error, Debug)]
pub enum QuickChatError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Record (de)serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Persistence layer failed to load or save the message store.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Authentication error.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<PasswordError> for QuickChatError {
    fn from(err: PasswordError) -> Self {
        QuickChatError::Auth(err.to_string())
    }
}

/// Result type alias for QuickChat operations.
pub type Result<T> = std::result::Result<T, QuickChatError>;
