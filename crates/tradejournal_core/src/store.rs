//! Append-only entry collection.
//!
//! Entries keep their insertion order. Nothing here sorts: every consumer
//! that cares about chronology re-sorts by date itself. There is no update or
//! remove; a correction is recorded as a new entry.

use crate::model::JournalEntry;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryStore {
    entries: Vec<JournalEntry>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store from persisted state
    pub fn from_entries(entries: Vec<JournalEntry>) -> Self {
        Self { entries }
    }

    /// Append an entry and return the full updated collection
    pub fn append(&mut self, entry: JournalEntry) -> &[JournalEntry] {
        self.entries.push(entry);
        &self.entries
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &JournalEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent `n` entries in insertion order
    pub fn last_n(&self, n: usize) -> &[JournalEntry] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }
}
