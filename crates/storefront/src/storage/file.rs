//! File-backed key-value store.
//!
//! Each key is stored as a JSON file in the data directory:
//!
//! ```text
//! ~/.local/share/furniture-finder/
//! ├── furniture_finder_auth.json
//! ├── furniture_finder_cart_1.json
//! └── furniture_finder_favorites_1.json
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;

use super::{KeyValueStore, StorageError};

/// Directory of JSON files, one per key.
///
/// Writes go to a hidden temp file first and are renamed into place, so a
/// crash mid-write leaves the previous blob intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    base_path: Arc<PathBuf>,
}

impl FileStore {
    /// Opens a store rooted at `base_path`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::DirectoryCreation` if the directory cannot be created.
    pub fn open(base_path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let base_path = base_path.into();
        std::fs::create_dir_all(&base_path).map_err(|source| StorageError::DirectoryCreation {
            path: base_path.clone(),
            source,
        })?;

        tracing::debug!(path = %base_path.display(), "Opened file store");
        Ok(Self {
            base_path: Arc::new(base_path),
        })
    }

    /// Returns the data directory.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.base_path.join(format!("{key}.json")))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!(".{key}.json.tmp"))
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.entry_path(key)?;
        match fs::read_to_string(&path).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.entry_path(key)?;
        let temp_path = self.temp_path(key);

        fs::write(&temp_path, value).await?;
        fs::rename(&temp_path, &path).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.entry_path(key)?;
        match fs::remove_file(&path).await {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// Keys become file names, so only `[A-Za-z0-9_-]` is allowed.
fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn test_store() -> (FileStore, TempDir) {
        let temp = TempDir::new().unwrap();
        let store = FileStore::open(temp.path().join("data")).unwrap();
        (store, temp)
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let (store, _temp) = test_store();
        store.set("furniture_finder_auth", r#"{"id":"1"}"#).await.unwrap();

        let raw = store.get("furniture_finder_auth").await.unwrap();
        assert_eq!(raw.as_deref(), Some(r#"{"id":"1"}"#));
        assert!(store.base_path().join("furniture_finder_auth.json").exists());
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let (store, _temp) = test_store();
        assert!(store.get("furniture_finder_cart_9").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_overwrites_and_leaves_no_temp_file() {
        let (store, _temp) = test_store();
        store.set("k", "first").await.unwrap();
        store.set("k", "second").await.unwrap();

        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("second"));
        assert!(!store.base_path().join(".k.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_remove() {
        let (store, _temp) = test_store();
        store.set("k", "v").await.unwrap();
        store.remove("k").await.unwrap();
        assert!(store.get("k").await.unwrap().is_none());

        // Removing again is not an error
        store.remove("k").await.unwrap();
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let (store, _temp) = test_store();
        for key in ["", "../escape", "a/b", "dot.key"] {
            assert!(matches!(
                store.set(key, "v").await,
                Err(StorageError::InvalidKey(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_reopen_sees_previous_writes() {
        let (store, _temp) = test_store();
        store.set("furniture_finder_cart_1", "[]").await.unwrap();

        let reopened = FileStore::open(store.base_path()).unwrap();
        assert_eq!(
            reopened.get("furniture_finder_cart_1").await.unwrap().as_deref(),
            Some("[]")
        );
    }
}
