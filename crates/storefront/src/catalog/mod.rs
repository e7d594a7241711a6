//! Remote product catalog client.
//!
//! # Architecture
//!
//! - Thin `reqwest` wrapper over the catalog's REST endpoints
//! - The catalog is the source of truth - no local copy, no cache, no retries
//! - Every listing and search is scoped to one configured category
//!
//! # Endpoints
//!
//! - `GET /products/category/{category}?limit=&skip=` - listing page
//! - `GET /products/{id}` - product detail
//! - `GET /products/search?q=&category=` - text search
//! - `GET /products/categories` - category slugs
//!
//! # Example
//!
//! ```rust,ignore
//! use furniture_finder_storefront::catalog::CatalogClient;
//!
//! let client = CatalogClient::new(&config.catalog)?;
//! let page = client.fetch_products(20, 0).await?;
//! let product = client.fetch_product(page.products[0].id).await?;
//! ```

mod types;

use std::sync::Arc;

use furniture_finder_core::{Product, ProductId};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;
use url::Url;

use crate::config::CatalogConfig;
use types::CategoryEntry;

pub use types::ProductPage;

/// Category keywords kept by [`CatalogClient::fetch_categories`].
const CATEGORY_KEYWORDS: &[&str] = &["furniture", "home", "decoration"];

/// Category list returned when the catalog cannot be reached.
pub const FALLBACK_CATEGORY: &str = "furniture";

/// Longest response body excerpt kept in errors and logs.
const BODY_EXCERPT_CHARS: usize = 500;

/// Errors that can occur when talking to the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog answered with a non-success status.
    #[error("catalog returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The configured base URL cannot carry a path.
    #[error("invalid catalog URL: {0}")]
    InvalidUrl(Url),
}

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the remote product catalog.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    category: String,
    page_size: u32,
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("category", &self.inner.category)
            .finish_non_exhaustive()
    }
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidUrl` if the base URL cannot have path
    /// segments (e.g. `mailto:`).
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        if config.base_url.cannot_be_a_base() {
            return Err(CatalogError::InvalidUrl(config.base_url.clone()));
        }

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                category: config.category.clone(),
                page_size: config.page_size,
            }),
        })
    }

    /// Category this client is scoped to.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.inner.category
    }

    /// Default listing page size.
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.inner.page_size
    }

    /// Build an endpoint URL from path segments under the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, CatalogError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| CatalogError::InvalidUrl(self.inner.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Execute a GET request and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, CatalogError> {
        tracing::debug!(url = %url, "Catalog request");

        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            let excerpt = excerpt(&body);
            tracing::warn!(status = %status, body = %excerpt, "Catalog returned non-success status");
            return Err(CatalogError::Status {
                status,
                body: excerpt,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %excerpt(&body),
                "Failed to parse catalog response"
            );
            CatalogError::Parse(e)
        })
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get one page of the category listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload does not decode.
    #[instrument(skip(self))]
    pub async fn fetch_products(&self, limit: u32, skip: u32) -> Result<ProductPage, CatalogError> {
        let mut url = self.endpoint(&["products", "category", self.inner.category.as_str()])?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("skip", &skip.to_string());

        self.get_json(url).await
    }

    /// Get the first listing page at the configured page size.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_products`].
    pub async fn fetch_first_page(&self) -> Result<ProductPage, CatalogError> {
        self.fetch_products(self.inner.page_size, 0).await
    }

    /// Get a single product by id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the catalog has no such product,
    /// or another error if the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn fetch_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let url = self.endpoint(&["products", id.to_string().as_str()])?;

        match self.get_json(url).await {
            Err(CatalogError::Status { status, .. }) if status == reqwest::StatusCode::NOT_FOUND => {
                Err(CatalogError::NotFound(format!("Product not found: {id}")))
            }
            other => other,
        }
    }

    /// Search the category by free text.
    ///
    /// The query is URL-encoded; an empty query is passed through and the
    /// catalog decides what it matches.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload does not decode.
    #[instrument(skip(self))]
    pub async fn search_products(&self, query: &str) -> Result<ProductPage, CatalogError> {
        let mut url = self.endpoint(&["products", "search"])?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("category", &self.inner.category);

        self.get_json(url).await
    }

    // =========================================================================
    // Category Methods
    // =========================================================================

    /// Get the home-furnishing categories the catalog offers.
    ///
    /// Keeps slugs mentioning furniture, home or decoration. This never
    /// fails: any error is logged and the fallback `["furniture"]` returned.
    #[instrument(skip(self))]
    pub async fn fetch_categories(&self) -> Vec<String> {
        let result = match self.endpoint(&["products", "categories"]) {
            Ok(url) => self.get_json::<Vec<CategoryEntry>>(url).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(entries) => filter_categories(entries.into_iter().map(CategoryEntry::into_slug)),
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch categories, using fallback");
                vec![FALLBACK_CATEGORY.to_string()]
            }
        }
    }
}

/// Keep home-furnishing category slugs.
fn filter_categories(slugs: impl IntoIterator<Item = String>) -> Vec<String> {
    slugs
        .into_iter()
        .filter(|slug| {
            let lower = slug.to_lowercase();
            CATEGORY_KEYWORDS.iter().any(|kw| lower.contains(kw))
        })
        .collect()
}

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client_for(base: &str) -> CatalogClient {
        CatalogClient::new(&CatalogConfig {
            base_url: Url::parse(base).unwrap(),
            ..CatalogConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let client = client_for("https://dummyjson.com");
        let url = client.endpoint(&["products", "category", "furniture"]).unwrap();
        assert_eq!(url.as_str(), "https://dummyjson.com/products/category/furniture");
    }

    #[test]
    fn test_endpoint_keeps_base_path_prefix() {
        let client = client_for("http://localhost:8080/api/");
        let url = client.endpoint(&["products", "7"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/products/7");
    }

    #[test]
    fn test_endpoint_escapes_segments() {
        let client = client_for("https://dummyjson.com");
        let url = client.endpoint(&["products", "a/b"]).unwrap();
        assert_eq!(url.as_str(), "https://dummyjson.com/products/a%2Fb");
    }

    #[test]
    fn test_rejects_non_base_url() {
        let result = CatalogClient::new(&CatalogConfig {
            base_url: Url::parse("mailto:shop@example.com").unwrap(),
            ..CatalogConfig::default()
        });
        assert!(matches!(result, Err(CatalogError::InvalidUrl(_))));
    }

    #[test]
    fn test_filter_categories() {
        let slugs = [
            "beauty",
            "furniture",
            "Home-Decoration",
            "kitchen-accessories",
            "smartphones",
        ]
        .map(String::from);
        assert_eq!(filter_categories(slugs), vec!["furniture", "Home-Decoration"]);
    }

    #[test]
    fn test_excerpt_truncates_on_char_boundary() {
        let body = "é".repeat(BODY_EXCERPT_CHARS + 10);
        assert_eq!(excerpt(&body).chars().count(), BODY_EXCERPT_CHARS);
    }
}
