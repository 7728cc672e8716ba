//! Storage abstraction for the persisted journal.
//!
//! The journal keeps three independent slots (entries, last analysis and
//! the celebration flag). Each is a string value under a string key, so the
//! trait stays ignorant of what the slots contain.

use crate::error::StorageError;

/// Keyed string persistence
pub trait Storage {
    /// Read a slot. A slot that was never written is `Ok(None)`.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the whole slot value
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the slot. Removing a missing slot is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).save(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
