//! Local storage file backend.
//!
//! The whole store is a single JSON object of string keys to string values,
//! the same shape as a browser origin's local storage:
//!
//! ```json
//! {
//!   "silverSaintsCart": "[{\"id\":\"halo-tee\",...}]",
//!   "silverSaintsEmail": "saint@example.com"
//! }
//! ```
//!
//! Keys other than the cart's are carried through untouched.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use silver_saints_core::{KeyValueStore, StorageError};
use tracing::debug;

/// [`KeyValueStore`] persisted to a JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, or is not a
    /// JSON object of strings. The file is never overwritten in that case.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let items = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        debug!(path = %path.display(), keys = items.len(), "opened storage file");
        Ok(Self { path, items })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the full map to disk via a sibling temp file and rename.
    fn flush(&self) -> Result<(), StorageError> {
        let raw = serde_json::to_string_pretty(&self.items)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Apply `change`, flush, and undo the change if the flush fails.
    fn apply(
        &mut self,
        key: &str,
        change: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), StorageError> {
        let previous = self.items.get(key).cloned();
        change(&mut self.items);

        if let Err(e) = self.flush() {
            match previous {
                Some(value) => self.items.insert(key.to_owned(), value),
                None => self.items.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.apply(key, |items| {
            items.insert(key.to_owned(), value);
        })
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        if !self.items.contains_key(key) {
            return Ok(());
        }
        self.apply(key, |items| {
            items.remove(key);
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path().join("storage.json")).unwrap();
        assert!(store.get_item("silverSaintsCart").unwrap().is_none());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        store
            .set_item("silverSaintsQueue", "142".to_string())
            .unwrap();
        store.set_item("silverSaintsCart", "[]".to_string()).unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get_item("silverSaintsQueue").unwrap().as_deref(),
            Some("142")
        );
        assert_eq!(
            reopened.get_item("silverSaintsCart").unwrap().as_deref(),
            Some("[]")
        );
        assert!(!dir.path().join("storage.json.tmp").exists());
    }

    #[test]
    fn test_remove_item() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        store.set_item("silverSaintsCart", "[]".to_string()).unwrap();
        store.remove_item("silverSaintsCart").unwrap();
        store.remove_item("silverSaintsCart").unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        assert!(reopened.get_item("silverSaintsCart").unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json").unwrap();

        let result = JsonFileStore::open(&path);
        assert!(matches!(result, Err(StorageError::Malformed(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), "not json");
    }

    #[test]
    fn test_failed_flush_keeps_memory_consistent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing-dir").join("storage.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        assert!(store.set_item("silverSaintsCart", "[]".to_string()).is_err());
        assert!(store.get_item("silverSaintsCart").unwrap().is_none());
    }
}
