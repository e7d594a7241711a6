//! Persisted shopper state.
//!
//! Each store owns an in-memory copy of one blob and a handle to the
//! key-value backend. Mutators update memory first and then rewrite the
//! whole blob; a failed write is logged and the in-memory state is kept,
//! so the shopper keeps seeing their latest action.
//!
//! - [`SessionStore`] - the logged-in user (one fixed key)
//! - [`CartStore`] - a user's cart lines
//! - [`FavoritesStore`] - a user's liked products

mod cart;
mod favorites;
mod session;

pub use cart::{CartStore, OrderReceipt};
pub use favorites::FavoritesStore;
pub use session::SessionStore;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::storage::{self, KeyValueStore};

/// Read a list blob, falling back to empty on a missing or unreadable key.
async fn load_list<T, S>(storage: &S, key: &str) -> Vec<T>
where
    T: DeserializeOwned,
    S: KeyValueStore,
{
    match storage::load_json::<Vec<T>, S>(storage, key).await {
        Ok(items) => items.unwrap_or_default(),
        Err(e) => {
            tracing::error!(key, error = %e, "Failed to load persisted list");
            Vec::new()
        }
    }
}

/// Rewrite a list blob. Failures are logged, not returned.
async fn persist_list<T, S>(storage: &S, key: &str, items: &[T])
where
    T: Serialize + Sync,
    S: KeyValueStore,
{
    if let Err(e) = storage::save_json(storage, key, &items).await {
        tracing::error!(key, error = %e, "Failed to persist list");
    }
}

/// Delete a blob. Failures are logged, not returned.
async fn remove_key<S: KeyValueStore>(storage: &S, key: &str) {
    if let Err(e) = storage.remove(key).await {
        tracing::error!(key, error = %e, "Failed to remove persisted key");
    }
}
