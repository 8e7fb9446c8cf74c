use std::path::PathBuf;

use tracing::debug;

use super::{KeyValueStore, StorageError};

/// File-backed store: each key maps to `<data_dir>/<key>.json`.
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: PathBuf) -> std::io::Result<Self> {
        std::fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path).map_err(|source| StorageError::Read {
            key: key.to_string(),
            source,
        })?;

        Ok(Some(contents))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.entry_path(key);
        std::fs::write(&path, value).map_err(|source| StorageError::Write {
            key: key.to_string(),
            source,
        })?;
        debug!(key, bytes = value.len(), "Entry written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();
        assert!(store.get("studentsList").unwrap().is_none());
    }

    #[test]
    fn test_set_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();

        store.set("studentsList", "[]").unwrap();
        assert_eq!(store.get("studentsList").unwrap().as_deref(), Some("[]"));

        // Overwrite replaces the previous value
        store.set("studentsList", "[1]").unwrap();
        assert_eq!(store.get("studentsList").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_new_creates_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("rollcall").join("data");
        FileStore::new(nested.clone()).unwrap();
        assert!(nested.is_dir());
    }
}
