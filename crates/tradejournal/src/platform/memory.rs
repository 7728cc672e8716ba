//! In-memory storage, shared between clones.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::StorageError;
use crate::platform::storage::Storage;

/// Slots held in a shared map.
///
/// Clones see the same slots, which lets a test keep a handle while the
/// session owns another. Writes can be switched off to exercise the
/// persistence failure paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Arc<Mutex<HashMap<String, String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-filled with the given slots
    pub fn with_slots<I, K, V>(slots: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let storage = Self::new();
        storage
            .lock()
            .extend(slots.into_iter().map(|(k, v)| (k.into(), v.into())));
        storage
    }

    /// Make every later `save` and `remove` fail
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Current value of a slot, bypassing the trait
    pub fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(StorageError::Io("storage is read-only".to_string()))
        } else {
            Ok(())
        }
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.get(key))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        self.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_slots() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();

        storage.save("a", "1").unwrap();
        assert_eq!(handle.load("a").unwrap(), Some("1".to_string()));

        handle.remove("a").unwrap();
        assert_eq!(storage.load("a").unwrap(), None);
    }

    #[test]
    fn test_fail_writes() {
        let storage = MemoryStorage::with_slots([("a", "1")]);
        storage.set_fail_writes(true);

        assert!(storage.save("a", "2").is_err());
        assert!(storage.remove("a").is_err());
        assert_eq!(storage.get("a"), Some("1".to_string()));
    }
}
