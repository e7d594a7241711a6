//! Integration test support for Furniture Finder.
//!
//! [`MockCatalog`] serves a small furniture catalog over HTTP on an
//! ephemeral local port, shaped like the public catalog API, so the
//! storefront can be exercised end to end without network access.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p furniture-finder-integration-tests
//! ```

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::extract::{OriginalUri, Path as UrlPath, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use furniture_finder_storefront::config::{CatalogConfig, StorefrontConfig};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::{Mutex, watch};
use url::Url;

/// Category the fixture catalog is stocked in.
pub const FIXTURE_CATEGORY: &str = "furniture";

#[derive(Clone)]
struct MockState {
    products: Arc<Vec<Value>>,
    requests: Arc<Mutex<Vec<String>>>,
    broken: bool,
}

/// Local stand-in for the remote product catalog.
pub struct MockCatalog {
    pub addr: SocketAddr,
    state: MockState,
    shutdown: watch::Sender<bool>,
}

impl MockCatalog {
    /// Start a catalog serving [`fixture_products`].
    ///
    /// # Errors
    ///
    /// Returns an error if no local port can be bound.
    pub async fn start() -> std::io::Result<Self> {
        Self::spawn(false).await
    }

    /// Start a catalog that answers every request with HTTP 500.
    ///
    /// # Errors
    ///
    /// Returns an error if no local port can be bound.
    pub async fn start_broken() -> std::io::Result<Self> {
        Self::spawn(true).await
    }

    async fn spawn(broken: bool) -> std::io::Result<Self> {
        let state = MockState {
            products: Arc::new(fixture_products()),
            requests: Arc::new(Mutex::new(Vec::new())),
            broken,
        };

        let app = Router::new()
            .route("/products/categories", get(categories))
            .route("/products/search", get(search))
            .route("/products/category/{category}", get(by_category))
            .route("/products/{id}", get(by_id))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let (shutdown, mut shutdown_rx) = watch::channel(false);

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.changed().await;
                })
                .await
                .ok();
        });

        Ok(Self {
            addr,
            state,
            shutdown,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}", self.addr))
            .unwrap_or_else(|_| unreachable!("socket address forms a valid URL"))
    }

    /// Catalog settings pointing at this server.
    #[must_use]
    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig {
            base_url: self.base_url(),
            category: FIXTURE_CATEGORY.to_string(),
            page_size: 2,
        }
    }

    /// Full storefront settings pointing at this server and `data_dir`.
    #[must_use]
    pub fn storefront_config(&self, data_dir: &Path) -> StorefrontConfig {
        StorefrontConfig {
            catalog: self.catalog_config(),
            data_dir: data_dir.to_path_buf(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    /// Path and query of every request received so far.
    pub async fn requests(&self) -> Vec<String> {
        self.state.requests.lock().await.clone()
    }
}

impl Drop for MockCatalog {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

/// The fixture catalog, in listing order.
#[must_use]
pub fn fixture_products() -> Vec<Value> {
    vec![
        json!({
            "id": 11,
            "title": "Annibale Colombo Bed",
            "description": "A luxurious and elegant bed frame",
            "category": "furniture",
            "price": 1899.99,
            "discountPercentage": 8.57,
            "rating": 4.77,
            "stock": 88,
            "tags": ["furniture", "beds"],
            "brand": "Annibale Colombo",
            "sku": "4KMDTZWF",
            "images": ["https://cdn.example.com/11/1.png"],
            "thumbnail": "https://cdn.example.com/11/thumbnail.png"
        }),
        json!({
            "id": 13,
            "title": "Bedside Table African Cherry",
            "description": "Elegant bedside table in rich African cherry wood",
            "category": "furniture",
            "price": 299.99,
            "discountPercentage": 0,
            "rating": 2.87,
            "stock": 7,
            "tags": ["furniture", "bedside tables"],
            "images": [],
            "thumbnail": "https://cdn.example.com/13/thumbnail.png"
        }),
        json!({
            "id": 14,
            "title": "Knoll Saarinen Executive Conference Chair",
            "description": "Modern and ergonomic conference chair",
            "category": "furniture",
            "price": 499.99,
            "discountPercentage": 15.23,
            "rating": 4.88,
            "stock": 0,
            "tags": ["furniture", "office chairs"],
            "brand": "Knoll",
            "images": [],
            "thumbnail": "https://cdn.example.com/14/thumbnail.png"
        }),
    ]
}

#[derive(Deserialize)]
struct PageQuery {
    limit: Option<usize>,
    skip: Option<usize>,
}

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
    category: Option<String>,
}

async fn record(state: &MockState, uri: &OriginalUri) {
    state.requests.lock().await.push(uri.0.to_string());
}

fn server_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"message": "catalog unavailable"})),
    )
        .into_response()
}

fn page(products: &[Value], skip: usize, limit: usize) -> Value {
    let selected: Vec<&Value> = products.iter().skip(skip).take(limit).collect();
    json!({
        "products": selected,
        "total": products.len(),
        "skip": skip,
        "limit": selected.len()
    })
}

fn in_category(products: &[Value], category: &str) -> Vec<Value> {
    products
        .iter()
        .filter(|p| p["category"].as_str() == Some(category))
        .cloned()
        .collect()
}

async fn categories(State(state): State<MockState>, uri: OriginalUri) -> Response {
    record(&state, &uri).await;
    if state.broken {
        return server_error();
    }

    Json(json!([
        {"slug": "beauty", "name": "Beauty", "url": "/products/category/beauty"},
        {"slug": "furniture", "name": "Furniture", "url": "/products/category/furniture"},
        {"slug": "home-decoration", "name": "Home Decoration", "url": "/products/category/home-decoration"},
        {"slug": "smartphones", "name": "Smartphones", "url": "/products/category/smartphones"}
    ]))
    .into_response()
}

async fn by_category(
    State(state): State<MockState>,
    uri: OriginalUri,
    UrlPath(category): UrlPath<String>,
    Query(query): Query<PageQuery>,
) -> Response {
    record(&state, &uri).await;
    if state.broken {
        return server_error();
    }

    let products = in_category(&state.products, &category);
    Json(page(
        &products,
        query.skip.unwrap_or(0),
        query.limit.unwrap_or(30),
    ))
    .into_response()
}

async fn search(
    State(state): State<MockState>,
    uri: OriginalUri,
    Query(query): Query<SearchQuery>,
) -> Response {
    record(&state, &uri).await;
    if state.broken {
        return server_error();
    }

    let needle = query.q.to_lowercase();
    let matches: Vec<Value> = state
        .products
        .iter()
        .filter(|p| {
            query
                .category
                .as_deref()
                .is_none_or(|c| p["category"].as_str() == Some(c))
        })
        .filter(|p| {
            ["title", "description"].iter().any(|field| {
                p[*field]
                    .as_str()
                    .is_some_and(|text| text.to_lowercase().contains(&needle))
            })
        })
        .cloned()
        .collect();

    Json(page(&matches, 0, matches.len())).into_response()
}

async fn by_id(
    State(state): State<MockState>,
    uri: OriginalUri,
    UrlPath(id): UrlPath<String>,
) -> Response {
    record(&state, &uri).await;
    if state.broken {
        return server_error();
    }

    let found = id
        .parse::<i64>()
        .ok()
        .and_then(|id| state.products.iter().find(|p| p["id"].as_i64() == Some(id)));

    match found {
        Some(product) => Json(product.clone()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"message": format!("Product with id '{id}' not found")})),
        )
            .into_response(),
    }
}
