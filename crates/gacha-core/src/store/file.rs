//! File-backed KeyValueStore.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::KeyValueStore;
use crate::error::{StoreError, StoreResult};

/// Stores each key as `<key>.json` inside a directory.
///
/// Writes go to a temporary file first and are renamed into place, so a crash
/// leaves either the old or the new value on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    base_dir: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `base_dir`, creating the directory if needed.
    pub fn open(base_dir: impl AsRef<Path>) -> StoreResult<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// The directory holding the value files.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn value_path(&self, key: &str) -> StoreResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.base_dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        let path = self.value_path(key)?;
        if !path.exists() {
            return Ok(None);
        }

        let text = fs::read_to_string(&path)?;
        let value = serde_json::from_str(&text).map_err(|source| StoreError::Json {
            key: key.to_string(),
            source,
        })?;

        tracing::debug!("Loaded '{}' from {}", key, path.display());

        Ok(Some(value))
    }

    fn set(&mut self, key: &str, value: Value) -> StoreResult<()> {
        let path = self.value_path(key)?;
        let temp_path = path.with_extension("json.tmp");

        let text = serde_json::to_string_pretty(&value).map_err(|source| StoreError::Json {
            key: key.to_string(),
            source,
        })?;

        fs::write(&temp_path, text)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved '{}' to {}", key, path.display());

        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        let path = self.value_path(key)?;
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("Removed '{}'", key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn values_persist_across_instances() {
        let dir = TempDir::new().unwrap();
        {
            let mut store = JsonFileStore::open(dir.path()).unwrap();
            store.set("draw_credits", json!(7)).unwrap();
        }
        let store = JsonFileStore::open(dir.path()).unwrap();
        assert_eq!(store.get("draw_credits").unwrap(), Some(json!(7)));
        assert!(dir.path().join("draw_credits.json").exists());
    }

    #[test]
    fn missing_key_is_none() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        assert_eq!(store.get("nothing").unwrap(), None);
    }

    #[test]
    fn remove_deletes_file() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();
        store.set("k", json!("v")).unwrap();
        store.remove("k").unwrap();
        assert!(!dir.path().join("k.json").exists());
        assert!(store.remove("k").is_ok());
    }

    #[test]
    fn rejects_path_like_keys() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();
        assert!(matches!(
            store.set("../escape", json!(1)),
            Err(StoreError::InvalidKey(_))
        ));
        assert!(matches!(store.get(""), Err(StoreError::InvalidKey(_))));
    }

    #[test]
    fn corrupt_file_reports_json_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bad.json"), "{not json").unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        assert!(matches!(store.get("bad"), Err(StoreError::Json { .. })));
    }
}
