//! Catalog product record.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// Stock level above which a product counts as comfortably in stock.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// A product as served by the catalog.
///
/// Products are immutable snapshots; carts and favorites store the whole
/// record so they render without a catalog round trip. Optional catalog
/// fields fall back to empty values so older or partial payloads still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    #[serde(default)]
    pub discount_percentage: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub stock: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Availability bucket shown next to a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl Product {
    /// Create a product with only the required fields set.
    #[must_use]
    pub fn new(id: ProductId, title: impl Into<String>, price: Price) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            price,
            discount_percentage: 0.0,
            rating: 0.0,
            stock: 0,
            brand: None,
            category: String::new(),
            thumbnail: String::new(),
            images: Vec::new(),
            tags: Vec::new(),
        }
    }

    #[must_use]
    pub const fn stock_status(&self) -> StockStatus {
        match self.stock {
            0 => StockStatus::OutOfStock,
            n if n > LOW_STOCK_THRESHOLD => StockStatus::InStock,
            _ => StockStatus::LowStock,
        }
    }

    /// Whether the product can be added to a cart.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.stock > 0
    }

    /// Whether the catalog lists a discount for this product.
    #[must_use]
    pub fn has_discount(&self) -> bool {
        self.discount_percentage > 0.0
    }

    /// Price after the listed discount.
    #[must_use]
    pub fn discounted_price(&self) -> Price {
        self.price.discounted(self.discount_percentage)
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InStock => f.write_str("in stock"),
            Self::LowStock => f.write_str("low stock"),
            Self::OutOfStock => f.write_str("out of stock"),
        }
    }
}
