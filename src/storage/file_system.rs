use std::fs;
use std::path::PathBuf;

use super::{check_key, KeyValueStore};
use crate::error::StorageError;

#[derive(Clone, Debug)]
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Create a store under the default data directory ("./data")
    pub fn new() -> Self {
        Self {
            base_path: PathBuf::from("./data"),
        }
    }

    /// Create a store under a custom directory (for testing)
    pub fn new_with_base_dir(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Get the base directory path
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_path
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", key))
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        check_key(key)?;
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path)?;
        Ok(Some(contents))
    }

    /// Write the value to a temp file and rename it over the key file
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        check_key(key)?;
        fs::create_dir_all(&self.base_path)?;
        let path = self.key_path(key);
        let tmp_path = self.base_path.join(format!(".{}.json.tmp", key));
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &path)?;
        log::debug!("Persisted {} bytes to {:?}", value.len(), path);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        check_key(key)?;
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(&path)?;
            log::info!("Removed storage key '{}'", key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_key_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new_with_base_dir(temp_dir.path().to_path_buf());
        assert_eq!(store.get("aleo_contacts").unwrap(), None);
    }

    #[test]
    fn test_set_then_get_from_fresh_instance() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("nested");
        let store = FileStore::new_with_base_dir(base.clone());
        store.set("aleo_contacts", "[]").unwrap();

        let reopened = FileStore::new_with_base_dir(base);
        assert_eq!(reopened.get("aleo_contacts").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_remove() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new_with_base_dir(temp_dir.path().to_path_buf());
        store.set("k", "v").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
        // Removing an absent key is not an error
        store.remove("k").unwrap();
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new_with_base_dir(temp_dir.path().to_path_buf());
        assert!(matches!(
            store.set("../escape", "x"),
            Err(StorageError::InvalidKey(_))
        ));
    }
}
