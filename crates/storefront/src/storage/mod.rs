//! Key-value persistence for shopper state.
//!
//! Session, cart and favorites state is stored as whole JSON blobs under
//! string keys, one blob per concern and user:
//!
//! ```text
//! furniture_finder_auth            -> User
//! furniture_finder_cart_<user>     -> [CartItem]
//! furniture_finder_favorites_<user> -> [Product]
//! ```
//!
//! Every mutation rewrites the full blob for its key. Lists stay small
//! (a shopper's cart), so there is no incremental format.
//!
//! # Backends
//!
//! - [`FileStore`] - one JSON file per key in a data directory
//! - [`MemoryStore`] - process-local map, for tests and embedding

mod error;
mod file;
mod memory;

use std::future::Future;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use error::StorageError;
pub use file::FileStore;
pub use memory::MemoryStore;

/// String-keyed blob storage.
///
/// Implementations must be cheap to clone (handles onto shared state) and
/// thread-safe so stores can be moved across tasks.
pub trait KeyValueStore: Clone + Send + Sync {
    /// Reads the value for `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Deletes `key`. Removing a missing key succeeds.
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// Storage keys for persisted shopper state.
pub mod keys {
    use furniture_finder_core::UserId;

    /// Prefix shared by every key this application writes.
    pub const PREFIX: &str = "furniture_finder";

    /// Key for the logged-in user record.
    pub const AUTH_KEY: &str = "furniture_finder_auth";

    /// Key for a user's cart.
    #[must_use]
    pub fn cart_key(user_id: &UserId) -> String {
        format!("{PREFIX}_cart_{user_id}")
    }

    /// Key for a user's favorites.
    #[must_use]
    pub fn favorites_key(user_id: &UserId) -> String {
        format!("{PREFIX}_favorites_{user_id}")
    }
}

/// Loads and deserializes the blob under `key`.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if the stored blob does not match
/// `T`, or the backend's error if the read fails.
pub async fn load_json<T, S>(store: &S, key: &str) -> Result<Option<T>, StorageError>
where
    T: DeserializeOwned,
    S: KeyValueStore,
{
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| StorageError::serialization(key, e))
}

/// Serializes `value` and stores it under `key`.
///
/// # Errors
///
/// Returns an error if serialization or the backend write fails.
pub async fn save_json<T, S>(store: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + Sync,
    S: KeyValueStore,
{
    let raw = serde_json::to_string(value).map_err(|e| StorageError::serialization(key, e))?;
    store.set(key, &raw).await
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::{KeyValueStore, MemoryStore, StorageError};

    /// Memory store whose writes can be switched to fail.
    #[derive(Debug, Clone, Default)]
    pub(crate) struct FlakyStore {
        pub(crate) inner: MemoryStore,
        failing: Arc<AtomicBool>,
    }

    impl FlakyStore {
        pub(crate) fn fail_writes(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        fn check(&self) -> Result<(), StorageError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(StorageError::Unavailable("disk full".to_string()));
            }
            Ok(())
        }
    }

    impl KeyValueStore for FlakyStore {
        async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.check()?;
            self.inner.set(key, value).await
        }

        async fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.check()?;
            self.inner.remove(key).await
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use furniture_finder_core::UserId;

    use super::*;

    #[test]
    fn test_keys_are_scoped_per_user() {
        let sarah = UserId::new("2");
        let mike = UserId::new("3");
        assert_eq!(keys::cart_key(&sarah), "furniture_finder_cart_2");
        assert_eq!(keys::favorites_key(&sarah), "furniture_finder_favorites_2");
        assert_ne!(keys::cart_key(&sarah), keys::cart_key(&mike));
        assert!(keys::AUTH_KEY.starts_with(keys::PREFIX));
    }

    #[tokio::test]
    async fn test_json_helpers_roundtrip() {
        let store = MemoryStore::new();
        save_json(&store, "numbers", &vec![1, 2, 3]).await.unwrap();
        let loaded: Option<Vec<i32>> = load_json(&store, "numbers").await.unwrap();
        assert_eq!(loaded, Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn test_load_json_missing_key() {
        let store = MemoryStore::new();
        let loaded: Option<Vec<i32>> = load_json(&store, "absent").await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_load_json_corrupt_blob() {
        let store = MemoryStore::new();
        store.set("numbers", "{not json").await.unwrap();
        let result = load_json::<Vec<i32>, _>(&store, "numbers").await;
        assert!(matches!(
            result,
            Err(StorageError::Serialization { ref key, .. }) if key == "numbers"
        ));
    }
}
