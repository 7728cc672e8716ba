//! Identifier types for journal entities

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque unique identifier of a journal entry.
///
/// Assigned once when the entry is created and never reused. The journal
/// treats it as an opaque string; the application fills it with a UUID.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
