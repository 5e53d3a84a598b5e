use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::StorageError;

/// A local key-value store of string slots, kept as one JSON object file.
///
/// A missing file reads as an empty store. Every write rewrites the whole
/// file.
#[derive(Debug, Clone)]
pub struct SlotStore {
    path: PathBuf,
}

impl SlotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the store file exists but cannot be read or is
    /// not a JSON object of strings.
    pub fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    /// Write a slot, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    pub fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut slots = self.read_all()?;
        slots.insert(key.to_string(), value.to_string());
        self.write_all(&slots)
    }

    /// Delete a slot. Removing a missing slot is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    pub fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut slots = self.read_all()?;
        if slots.remove(key).is_some() {
            self.write_all(&slots)?;
        }
        Ok(())
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|source| StorageError::CorruptStore {
            path: self.path.clone(),
            source,
        })
    }

    fn write_all(&self, slots: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(slots).map_err(StorageError::Encode)?;
        fs::write(&self.path, format!("{json}\n")).map_err(io_err)
    }
}
