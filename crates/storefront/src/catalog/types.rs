//! Response shapes for the catalog API.

use serde::{Deserialize, Serialize};

use furniture_finder_core::Product;

/// One page of a product listing or search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    /// Total matches across all pages.
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub skip: u32,
    #[serde(default)]
    pub limit: u32,
}

impl ProductPage {
    /// Whether more products exist after this page.
    #[must_use]
    pub fn has_more(&self) -> bool {
        let seen = u64::from(self.skip) + self.products.len() as u64;
        seen < u64::from(self.total)
    }
}

/// A category entry from `GET /products/categories`.
///
/// Older catalog versions return bare slugs, newer ones return objects.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub(crate) enum CategoryEntry {
    Slug(String),
    Detailed { slug: String },
}

impl CategoryEntry {
    pub(crate) fn into_slug(self) -> String {
        match self {
            Self::Slug(slug) | Self::Detailed { slug } => slug,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_category_entries_accept_both_shapes() {
        let entries: Vec<CategoryEntry> = serde_json::from_str(
            r#"["furniture", {"slug": "home-decoration", "name": "Home Decoration", "url": "https://x/y"}]"#,
        )
        .unwrap();
        let slugs: Vec<String> = entries.into_iter().map(CategoryEntry::into_slug).collect();
        assert_eq!(slugs, vec!["furniture", "home-decoration"]);
    }

    #[test]
    fn test_has_more() {
        let page = ProductPage {
            products: Vec::new(),
            total: 15,
            skip: 10,
            limit: 5,
        };
        assert!(page.has_more());

        let last = ProductPage { total: 10, ..page };
        assert!(!last.has_more());
    }
}
