// src/storage/file.rs
use super::KeyValueStore;
use crate::core::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Key-value store persisted as a single JSON object on disk.
///
/// Every read goes to the file so separate processes sharing it observe each
/// other's writes. Writes are serialized within the process and land through
/// a temp file plus rename, so readers never see a half-written document.
/// Two processes writing at once still race; the last rename wins.
pub struct FileStore {
    file_path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn open<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let file_path = path.into();

        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(AppError::Io)?;
            }
        }

        Ok(Self {
            file_path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn get_file_path(&self) -> &Path {
        &self.file_path
    }

    fn load_entries(&self) -> Result<BTreeMap<String, String>> {
        if !self.file_path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = std::fs::read_to_string(&self.file_path).map_err(AppError::Io)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            AppError::Storage(format!(
                "Failed to parse {}: {}",
                self.file_path.display(),
                e
            ))
        })
    }

    fn save_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let content = serde_json::to_string_pretty(entries)
            .map_err(|e| AppError::Storage(format!("Failed to serialize store: {}", e)))?;

        let temp_path = self.file_path.with_extension("tmp");
        std::fs::write(&temp_path, content).map_err(AppError::Io)?;
        std::fs::rename(&temp_path, &self.file_path).map_err(AppError::Io)?;
        Ok(())
    }

    // Read-modify-write under the process-local lock
    fn update(&self, update_fn: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|poisoned| {
            log::error!("FileStore lock poisoned, recovering...");
            poisoned.into_inner()
        });

        let mut entries = match self.load_entries() {
            Ok(entries) => entries,
            Err(AppError::Storage(e)) => {
                log::warn!("Discarding unreadable store, rewriting it: {}", e);
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        update_fn(&mut entries);
        self.save_entries(&entries)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.update(|entries| {
            entries.remove(key);
        })
    }

    fn clear(&self) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|poisoned| {
            log::error!("FileStore lock poisoned, recovering...");
            poisoned.into_inner()
        });
        self.save_entries(&BTreeMap::new())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.load_entries()?.into_keys().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("nested/messages.json")).unwrap();
        assert_eq!(store.get("user_error").unwrap(), None);
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn writes_are_visible_to_a_second_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("messages.json");

        let first = FileStore::open(&path).unwrap();
        let second = FileStore::open(&path).unwrap();

        first
            .set("user_error", r#"{"EA006":"Invalid pincode"}"#)
            .unwrap();
        assert_eq!(
            second.get("user_error").unwrap().as_deref(),
            Some(r#"{"EA006":"Invalid pincode"}"#)
        );

        second.remove("user_error").unwrap();
        assert_eq!(first.get("user_error").unwrap(), None);
    }

    #[test]
    fn clear_keeps_file_valid() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("messages.json")).unwrap();
        store.set("access", "token").unwrap();
        store.set("user_validation", "[]").unwrap();
        store.clear().unwrap();

        let content = std::fs::read_to_string(store.get_file_path()).unwrap();
        assert_eq!(content.trim(), "{}");
        assert!(!store.get_file_path().with_extension("tmp").exists());
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("messages.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert!(matches!(store.get("user_error"), Err(AppError::Storage(_))));
    }

    #[test]
    fn corrupt_file_is_recovered_by_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("messages.json");
        std::fs::write(&path, "{truncated").unwrap();
        let store = FileStore::open(&path).unwrap();

        store.clear().unwrap();
        assert!(store.keys().unwrap().is_empty());

        std::fs::write(&path, "{truncated").unwrap();
        store.set("user_error", "{}").unwrap();
        assert_eq!(store.get("user_error").unwrap().as_deref(), Some("{}"));
    }
}
