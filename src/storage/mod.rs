//! Persistent key/value storage for preferences
//!
//! A small string-to-string store in the spirit of browser local storage.
//! Two backends are provided:
//! - `file`: a JSON object on disk, shared by every run for the same user
//! - `MemoryStorage`: process-local, used by tests and `--no-persist`

mod file;

pub use file::FileStorage;

use crate::error::StorageResult;
use std::collections::HashMap;

/// String key/value storage
pub trait Storage {
    /// Read a value, `None` when the key was never written
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write a value, replacing any previous one
    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove a value if present
    fn remove_item(&mut self, key: &str) -> StorageResult<()>;
}

/// In-memory storage that forgets everything when dropped
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> StorageResult<()> {
        self.items.remove(key);
        Ok(())
    }
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> StorageResult<()> {
        (**self).remove_item(key)
    }
}
