//! Test helpers for E2E tests.
//!
//! Provides a temporary store file and shortcuts for building sessions.

#![allow(dead_code)]

use std::path::PathBuf;

use tempfile::TempDir;

use quickchat::{ComposeRequest, JsonFilePersistence, MessageSession};

/// Recipient used by the example flows.
pub const MIKE: &str = "+27718693002";

/// Second recipient, sharing no "718" substring with [`MIKE`].
pub const OTHER: &str = "+27123456789";

/// Example message content.
pub const DINNER: &str = "Hi Mike, can you join us for dinner tonight.";

/// A JSON store file inside a temporary directory.
pub struct TestStore {
    dir: TempDir,
}

impl TestStore {
    /// Create a new temporary store location.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    /// Path of the store file.
    pub fn path(&self) -> PathBuf {
        self.dir.path().join("data").join("messages.json")
    }

    /// Persistence adapter for the store file.
    pub fn port(&self) -> JsonFilePersistence {
        JsonFilePersistence::new(self.path())
    }
}

/// Send a message and return its hash.
pub fn send(session: &mut MessageSession, recipient: &str, content: &str) -> String {
    session
        .send(&ComposeRequest::new(recipient, content))
        .expect("send should succeed")
        .hash()
        .to_string()
}

/// Compose a draft and store it.
pub fn store(session: &mut MessageSession, recipient: &str, content: &str) {
    let draft = session.compose(&ComposeRequest::new(recipient, content));
    session.store(draft).expect("store should succeed");
}
