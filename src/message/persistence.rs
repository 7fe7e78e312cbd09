//! Persistence port for the message store.
//!
//! The session only sees [`PersistencePort`]; encoding lives in the
//! adapters. Loading happens at session start and saving at session end.

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::MessageRecord;
use crate::{QuickChatError, Result};

/// Load/save boundary for message records.
pub trait PersistencePort {
    /// Load all saved records in their saved order.
    ///
    /// A missing backing store yields an empty vector.
    fn load(&self) -> Result<Vec<MessageRecord>>;

    /// Replace the saved records.
    fn save(&self, records: &[MessageRecord]) -> Result<()>;
}

/// Records kept as a JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    /// Create a new adapter for the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PersistencePort for JsonFilePersistence {
    fn load(&self) -> Result<Vec<MessageRecord>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no saved messages");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let records: Vec<MessageRecord> = serde_json::from_str(&content).map_err(|e| {
            QuickChatError::Persistence(format!("{}: {e}", self.path.display()))
        })?;
        info!(path = %self.path.display(), count = records.len(), "loaded messages");
        Ok(records)
    }

    fn save(&self, records: &[MessageRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, json)?;
        info!(path = %self.path.display(), count = records.len(), "saved messages");
        Ok(())
    }
}

/// Records kept in memory.
#[derive(Debug, Default)]
pub struct InMemoryPersistence {
    records: RefCell<Vec<MessageRecord>>,
}

impl InMemoryPersistence {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an in-memory store pre-filled with records.
    pub fn with_records(records: Vec<MessageRecord>) -> Self {
        Self {
            records: RefCell::new(records),
        }
    }

    /// Copy of the currently saved records.
    pub fn records(&self) -> Vec<MessageRecord> {
        self.records.borrow().clone()
    }
}

impl PersistencePort for InMemoryPersistence {
    fn load(&self) -> Result<Vec<MessageRecord>> {
        Ok(self.records.borrow().clone())
    }

    fn save(&self, records: &[MessageRecord]) -> Result<()> {
        *self.records.borrow_mut() = records.to_vec();
        Ok(())
    }
}
