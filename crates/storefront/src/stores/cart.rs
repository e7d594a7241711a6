//! Per-user cart store.

use chrono::{DateTime, Utc};
use furniture_finder_core::{CartItem, Price, Product, ProductId, UserId};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use super::{load_list, persist_list, remove_key};
use crate::error::add_breadcrumb;
use crate::storage::{KeyValueStore, keys};

/// Snapshot of a cart taken at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub order_number: Uuid,
    pub placed_at: DateTime<Utc>,
    pub items: Vec<CartItem>,
    pub item_count: u64,
    pub total: Price,
}

/// A user's cart, persisted under `furniture_finder_cart_<user>`.
///
/// Holds at most one line per product id; quantities are always at least 1.
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    user_id: UserId,
    key: String,
    items: Vec<CartItem>,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Load the cart for `user_id`. A missing or unreadable blob yields an
    /// empty cart.
    pub async fn load(storage: S, user_id: UserId) -> Self {
        let key = keys::cart_key(&user_id);
        let items = sanitize(load_list(&storage, &key).await);
        tracing::debug!(user_id = %user_id, lines = items.len(), "Cart loaded");

        Self {
            storage,
            user_id,
            key,
            items,
        }
    }

    /// Re-read the cart from storage, discarding in-memory state.
    pub async fn reload(&mut self) {
        self.items = sanitize(load_list(&self.storage, &self.key).await);
    }

    /// Cart lines in the order they were first added.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Quantity of `id` in the cart, zero if absent.
    #[must_use]
    pub fn quantity_of(&self, id: ProductId) -> u32 {
        self.items
            .iter()
            .find(|item| item.product_id() == id)
            .map_or(0, |item| item.quantity)
    }

    /// Add `quantity` units of `product`.
    ///
    /// An existing line for the same id has its quantity increased; otherwise
    /// a new line is appended. Adding zero units does nothing.
    #[instrument(skip(self, product), fields(user_id = %self.user_id, product_id = %product.id))]
    pub async fn add_to_cart(&mut self, product: Product, quantity: u32) {
        if quantity == 0 {
            return;
        }

        let product_id = product.id;
        if let Some(item) = self.items.iter_mut().find(|item| item.product_id() == product_id) {
            item.quantity = item.quantity.saturating_add(quantity);
        } else {
            self.items.push(CartItem::new(product, quantity));
        }

        add_breadcrumb(
            "cart",
            "Added to cart",
            Some(&[("product_id", product_id.to_string().as_str())]),
        );
        self.persist().await;
    }

    /// Remove the line for `id`. Returns whether a line was removed.
    #[instrument(skip(self), fields(user_id = %self.user_id))]
    pub async fn remove_from_cart(&mut self, id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.product_id() != id);
        if self.items.len() == before {
            return false;
        }

        self.persist().await;
        true
    }

    /// Set the quantity of the line for `id`.
    ///
    /// A quantity of zero or less removes the line. Ids not in the cart are
    /// ignored.
    #[instrument(skip(self), fields(user_id = %self.user_id))]
    pub async fn update_quantity(&mut self, id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_from_cart(id).await;
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let Some(item) = self.items.iter_mut().find(|item| item.product_id() == id) else {
            return;
        };
        item.quantity = quantity;

        self.persist().await;
    }

    /// Empty the cart and delete its blob.
    #[instrument(skip(self), fields(user_id = %self.user_id))]
    pub async fn clear_cart(&mut self) {
        self.items.clear();
        remove_key(&self.storage, &self.key).await;
    }

    /// Sum of price times quantity over all lines.
    #[must_use]
    pub fn cart_total(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn cart_items_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Place the order: snapshot the cart into a receipt and clear it.
    ///
    /// Returns `None` for an empty cart.
    #[instrument(skip(self), fields(user_id = %self.user_id))]
    pub async fn checkout(&mut self) -> Option<OrderReceipt> {
        if self.items.is_empty() {
            return None;
        }

        let receipt = OrderReceipt {
            order_number: Uuid::new_v4(),
            placed_at: Utc::now(),
            item_count: self.cart_items_count(),
            total: self.cart_total(),
            items: self.items.clone(),
        };
        self.clear_cart().await;

        tracing::info!(
            order_number = %receipt.order_number,
            total = %receipt.total,
            "Order placed"
        );
        Some(receipt)
    }

    async fn persist(&self) {
        persist_list(&self.storage, &self.key, &self.items).await;
    }
}

/// Drop zero-quantity lines and merge duplicate ids from a stored blob.
fn sanitize(items: Vec<CartItem>) -> Vec<CartItem> {
    let mut merged: Vec<CartItem> = Vec::with_capacity(items.len());
    for item in items.into_iter().filter(|item| item.quantity > 0) {
        match merged.iter_mut().find(|m| m.product_id() == item.product_id()) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(item.quantity),
            None => merged.push(item),
        }
    }
    merged
}
