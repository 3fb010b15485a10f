//! File-backed preference storage
//!
//! Keeps all items in a single pretty-printed JSON object. The file is
//! read on every access so that separate runs (and separate pages of one
//! run) observe each other's writes, like reloading a browser tab.

use super::Storage;
use crate::config::Config;
use crate::error::{StorageError, StorageResult};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Name of the preference file inside the data directory
pub const PREFERENCES_FILE: &str = "preferences.json";

/// JSON object storage on disk
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Storage at an explicit path
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Storage at the default per-user location
    pub fn default_location() -> StorageResult<Self> {
        Config::data_dir()
            .map(|dir| Self::new(dir.join(PREFERENCES_FILE)))
            .map_err(|_| StorageError::DirectoryError)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> StorageResult<BTreeMap<String, String>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|source| StorageError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> StorageResult<()> {
        let write_err = |source| StorageError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(write_err)?;
            }
        }

        let content = serde_json::to_string_pretty(items).map_err(|e| StorageError::Write {
            path: self.path.clone(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;

        std::fs::write(&self.path, content).map_err(write_err)
    }

    /// Items for a write: a corrupt file is replaced rather than blocking writes
    fn read_for_update(&self) -> StorageResult<BTreeMap<String, String>> {
        match self.read_all() {
            Err(StorageError::Parse { path, source }) => {
                log::warn!("Replacing corrupt preference file {}: {}", path.display(), source);
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let mut items = self.read_for_update()?;
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items)
    }

    fn remove_item(&mut self, key: &str) -> StorageResult<()> {
        let mut items = self.read_for_update()?;
        if items.remove(key).is_some() {
            self.write_all(&items)?;
        }
        Ok(())
    }
}
