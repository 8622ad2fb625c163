use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use snafu::ResultExt;

use super::KeyValueStore;
use super::error::{
    CreateDirectorySnafu, ParseFileSnafu, ReadFileSnafu, RenameTempFileSnafu,
    SerializeEntriesSnafu, StorageResult, WriteFileSnafu,
};

pub const STORAGE_FILE_NAME: &str = "storage.json";

/// Key-value store persisted as one JSON object on disk.
///
/// Entries are loaded once on open and the whole file is rewritten on every mutation
/// through a temporary file, so a crash mid-write never leaves a truncated store.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Opens the store at `path`, treating a missing file as empty.
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        let entries = Self::load_from_disk(&path)?;
        tracing::debug!(path = ?path, entry_count = entries.len(), "opened key-value store");

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Opens `storage.json` inside `directory`.
    pub fn open_in(directory: &Path) -> StorageResult<Self> {
        Self::open(directory.join(STORAGE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_from_disk(path: &Path) -> StorageResult<BTreeMap<String, String>> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = std::fs::read_to_string(path).context(ReadFileSnafu {
            stage: "read-storage-file",
            path: path.to_path_buf(),
        })?;

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).context(ParseFileSnafu {
            stage: "parse-storage-file",
            path: path.to_path_buf(),
        })
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> StorageResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).context(CreateDirectorySnafu {
                stage: "create-storage-directory",
                path: parent.to_path_buf(),
            })?;
        }

        let content = serde_json::to_string_pretty(entries).context(SerializeEntriesSnafu {
            stage: "serialize-storage-entries",
        })?;

        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, content).context(WriteFileSnafu {
            stage: "write-temporary-storage-file",
            path: temp_path.clone(),
        })?;

        std::fs::rename(&temp_path, &self.path).context(RenameTempFileSnafu {
            stage: "rename-temporary-storage-file",
            from: temp_path,
            to: self.path.clone(),
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = entries.clone();
        next.insert(key.to_string(), value.to_string());
        // Only publish the new map once it is on disk.
        self.persist(&next)?;
        *entries = next;
        tracing::info!(key, path = ?self.path, "stored key");
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if !entries.contains_key(key) {
            return Ok(());
        }

        let mut next = entries.clone();
        next.remove(key);
        self.persist(&next)?;
        *entries = next;
        tracing::info!(key, path = ?self.path, "removed key");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StorageError;

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(STORAGE_FILE_NAME);

        let store = JsonFileStore::open(&path).unwrap();
        store.set("currentUser", "alice").unwrap();
        store.set("knownUsers", "[\"alice\",\"bob\"]").unwrap();
        drop(store);

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("currentUser").unwrap().as_deref(),
            Some("alice")
        );
        assert_eq!(
            reopened.get("knownUsers").unwrap().as_deref(),
            Some("[\"alice\",\"bob\"]")
        );
    }

    #[test]
    fn remove_persists_and_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open_in(dir.path()).unwrap();
        store.set("currentUser", "alice").unwrap();
        store.set("knownUsers", "[\"alice\"]").unwrap();

        store.remove("currentUser").unwrap();

        let reopened = JsonFileStore::open_in(dir.path()).unwrap();
        assert_eq!(reopened.get("currentUser").unwrap(), None);
        assert!(reopened.get("knownUsers").unwrap().is_some());
        assert!(!dir.path().join("storage.json.tmp").exists());
    }

    #[test]
    fn removing_absent_key_does_not_touch_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open_in(dir.path()).unwrap();

        store.remove("currentUser").unwrap();
        assert!(!store.path().exists());

        store.set("knownUsers", "[]").unwrap();
        let written = std::fs::read_to_string(store.path()).unwrap();
        store.remove("currentUser").unwrap();
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), written);
    }

    #[test]
    fn missing_file_opens_empty_without_creating_it() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open_in(dir.path()).unwrap();

        assert_eq!(store.get("currentUser").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn malformed_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORAGE_FILE_NAME);
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let error = JsonFileStore::open(&path).unwrap_err();
        assert!(matches!(error, StorageError::ParseFile { .. }));
    }
}
