//! Per-user favorites store.

use furniture_finder_core::{Product, ProductId, UserId};
use tracing::instrument;

use super::{load_list, persist_list};
use crate::error::add_breadcrumb;
use crate::storage::{KeyValueStore, keys};

/// A user's liked products, persisted under `furniture_finder_favorites_<user>`.
///
/// Product ids are unique within the list.
#[derive(Debug)]
pub struct FavoritesStore<S> {
    storage: S,
    user_id: UserId,
    key: String,
    favorites: Vec<Product>,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    pub async fn load(storage: S, user_id: UserId) -> Self {
        let key = keys::favorites_key(&user_id);
        let favorites = dedupe(load_list(&storage, &key).await);

        Self {
            storage,
            user_id,
            key,
            favorites,
        }
    }

    pub async fn reload(&mut self) {
        self.favorites = dedupe(load_list(&self.storage, &self.key).await);
    }

    #[must_use]
    pub fn favorites(&self) -> &[Product] {
        &self.favorites
    }

    #[must_use]
    pub fn is_favorite(&self, id: ProductId) -> bool {
        self.favorites.iter().any(|p| p.id == id)
    }

    /// The liked product with `id`, as it was stored.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.favorites.iter().find(|p| p.id == id)
    }

    /// Append `product`. Already-liked products are left where they are.
    #[instrument(skip(self, product), fields(user_id = %self.user_id, product_id = %product.id))]
    pub async fn add_to_favorites(&mut self, product: Product) {
        if self.is_favorite(product.id) {
            return;
        }

        add_breadcrumb(
            "favorites",
            "Added to favorites",
            Some(&[("product_id", product.id.to_string().as_str())]),
        );
        self.favorites.push(product);
        self.persist().await;
    }

    /// Remove the product with `id`. Returns whether it was liked.
    #[instrument(skip(self), fields(user_id = %self.user_id))]
    pub async fn remove_from_favorites(&mut self, id: ProductId) -> bool {
        let before = self.favorites.len();
        self.favorites.retain(|p| p.id != id);
        if self.favorites.len() == before {
            return false;
        }

        self.persist().await;
        true
    }

    /// Like `product` if it is not liked yet, unlike it otherwise.
    ///
    /// Returns whether the product is liked afterwards.
    pub async fn toggle_favorite(&mut self, product: Product) -> bool {
        if self.is_favorite(product.id) {
            self.remove_from_favorites(product.id).await;
            false
        } else {
            self.add_to_favorites(product).await;
            true
        }
    }

    async fn persist(&self) {
        persist_list(&self.storage, &self.key, &self.favorites).await;
    }
}

fn dedupe(products: Vec<Product>) -> Vec<Product> {
    let mut unique: Vec<Product> = Vec::with_capacity(products.len());
    for product in products {
        if !unique.iter().any(|p| p.id == product.id) {
            unique.push(product);
        }
    }
    unique
}
