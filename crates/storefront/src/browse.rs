//! Client-side filtering and sorting of a fetched product page.
//!
//! The catalog returns one page in its own order; narrowing by text or
//! price and reordering happen locally on that page.

use std::cmp::Ordering;
use std::str::FromStr;

use furniture_finder_core::{Price, Product};

/// Number of title predictions offered while typing.
pub const DEFAULT_PREDICTIONS: usize = 5;

/// Narrowing applied to a product list. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Case-insensitive substring of the title or description.
    pub query: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<Price>,
    /// Inclusive upper price bound.
    pub max_price: Option<Price>,
}

impl ProductFilter {
    /// Filter on an inclusive price range only.
    #[must_use]
    pub const fn price_range(min_price: Option<Price>, max_price: Option<Price>) -> Self {
        Self {
            query: None,
            min_price,
            max_price,
        }
    }

    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_query(product)
            && self.min_price.is_none_or(|min| product.price >= min)
            && self.max_price.is_none_or(|max| product.price <= max)
    }

    fn matches_query(&self, product: &Product) -> bool {
        let Some(query) = self.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) else {
            return true;
        };
        let query = query.to_lowercase();
        product.title.to_lowercase().contains(&query)
            || product.description.to_lowercase().contains(&query)
    }
}

/// Ordering applied to a product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOption {
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
    RatingDesc,
}

impl SortOption {
    pub const ALL: [Self; 5] = [
        Self::PriceAsc,
        Self::PriceDesc,
        Self::NameAsc,
        Self::NameDesc,
        Self::RatingDesc,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
            Self::RatingDesc => "rating-desc",
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::PriceAsc => a.price.cmp(&b.price),
            Self::PriceDesc => b.price.cmp(&a.price),
            Self::NameAsc => compare_titles(a, b),
            Self::NameDesc => compare_titles(b, a),
            Self::RatingDesc => b.rating.total_cmp(&a.rating),
        }
    }
}

fn compare_titles(a: &Product, b: &Product) -> Ordering {
    a.title.to_lowercase().cmp(&b.title.to_lowercase())
}

impl std::fmt::Display for SortOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown sort option.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort option '{0}' (expected one of price-asc, price-desc, name-asc, name-desc, rating-desc)")]
pub struct ParseSortError(String);

impl FromStr for SortOption {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|option| option.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseSortError(s.to_string()))
    }
}

/// Filter `products` and optionally sort them.
///
/// Without a sort the catalog order is kept. Sorting is stable, so ties
/// keep their catalog order too.
#[must_use]
pub fn browse(products: &[Product], filter: &ProductFilter, sort: Option<SortOption>) -> Vec<Product> {
    let mut selected: Vec<Product> = products
        .iter()
        .filter(|product| filter.matches(product))
        .cloned()
        .collect();

    if let Some(sort) = sort {
        selected.sort_by(|a, b| sort.compare(a, b));
    }
    selected
}

/// Titles containing `text`, in catalog order, for type-ahead.
#[must_use]
pub fn title_predictions(products: &[Product], text: &str, limit: usize) -> Vec<String> {
    let text = text.trim().to_lowercase();
    if text.is_empty() {
        return Vec::new();
    }

    products
        .iter()
        .filter(|product| product.title.to_lowercase().contains(&text))
        .map(|product| product.title.clone())
        .take(limit)
        .collect()
}
