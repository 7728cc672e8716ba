//! Typed access to the three persisted journal slots.
//!
//! Each slot is read and written independently and always replaced whole.
//! Reads are forgiving: a missing or malformed slot yields the empty value
//! and a warning in the log, never an error that would stop the journal.

use tradejournal_core::JournalEntry;

use crate::error::StorageError;
use crate::narrative::CoachAnalysis;
use crate::platform::Storage;

/// JSON array of every journal entry
pub const ENTRIES_KEY: &str = "trade_journal_entries";
/// JSON object holding the last coach analysis
pub const ANALYSIS_KEY: &str = "trade_journal_analysis";
/// Present with value `"true"` once the goal celebration has been shown
pub const CELEBRATED_KEY: &str = "celebrated";

const CELEBRATED_VALUE: &str = "true";

/// Journal persistence over any [`Storage`] backend
pub struct JournalRepository<S: Storage> {
    storage: S,
}

impl<S: Storage> JournalRepository<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn load_entries(&self) -> Vec<JournalEntry> {
        match self.read_json::<Vec<JournalEntry>>(ENTRIES_KEY) {
            Some(entries) => {
                tracing::debug!(count = entries.len(), "Loaded journal entries");
                entries
            }
            None => Vec::new(),
        }
    }

    pub fn save_entries(&self, entries: &[JournalEntry]) -> Result<(), StorageError> {
        let json = serde_json::to_string(entries)
            .map_err(|e| StorageError::Serialize(format!("Failed to serialize entries: {}", e)))?;
        self.storage.save(ENTRIES_KEY, &json)
    }

    pub fn load_analysis(&self) -> Option<CoachAnalysis> {
        self.read_json(ANALYSIS_KEY)
    }

    pub fn save_analysis(&self, analysis: &CoachAnalysis) -> Result<(), StorageError> {
        let json = serde_json::to_string(analysis)
            .map_err(|e| StorageError::Serialize(format!("Failed to serialize analysis: {}", e)))?;
        self.storage.save(ANALYSIS_KEY, &json)
    }

    /// Only the exact value `"true"` counts as set
    pub fn load_celebrated(&self) -> bool {
        match self.storage.load(CELEBRATED_KEY) {
            Ok(Some(value)) => value.trim() == CELEBRATED_VALUE,
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read celebration flag");
                false
            }
        }
    }

    /// Setting writes `"true"`; clearing removes the slot
    pub fn save_celebrated(&self, celebrated: bool) -> Result<(), StorageError> {
        if celebrated {
            self.storage.save(CELEBRATED_KEY, CELEBRATED_VALUE)
        } else {
            self.storage.remove(CELEBRATED_KEY)
        }
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.storage.load(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read slot");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Ignoring malformed slot");
                None
            }
        }
    }
}
