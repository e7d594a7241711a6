//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `CATALOG_BASE_URL` - Catalog API host (default: `https://dummyjson.com`)
//! - `CATALOG_CATEGORY` - Category the shop front is scoped to (default: `furniture`)
//! - `CATALOG_PAGE_SIZE` - Products per listing page (default: 20)
//! - `STOREFRONT_DATA_DIR` - Directory holding persisted session/cart/favorites blobs
//!   (default: `<local data dir>/furniture-finder`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

pub const DEFAULT_CATALOG_BASE_URL: &str = "https://dummyjson.com";
pub const DEFAULT_CATALOG_CATEGORY: &str = "furniture";
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Catalog API configuration
    pub catalog: CatalogConfig,
    /// Directory for persisted key-value blobs
    pub data_dir: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

/// Remote catalog configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Catalog host, e.g. `https://dummyjson.com`
    pub base_url: Url,
    /// Category slug listings and searches are restricted to
    pub category: String,
    /// Default listing page size
    pub page_size: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            // The default is a compile-time constant known to parse.
            base_url: Url::parse(DEFAULT_CATALOG_BASE_URL)
                .unwrap_or_else(|_| unreachable!("default catalog URL is valid")),
            category: DEFAULT_CATALOG_CATEGORY.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let catalog = CatalogConfig::from_env()?;
        let data_dir = get_optional_env("STOREFRONT_DATA_DIR")
            .map_or_else(default_data_dir, PathBuf::from);

        Ok(Self {
            catalog,
            data_dir,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }
}

impl CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = parse_base_url(
            "CATALOG_BASE_URL",
            &get_env_or_default("CATALOG_BASE_URL", DEFAULT_CATALOG_BASE_URL),
        )?;
        let category = get_env_or_default("CATALOG_CATEGORY", DEFAULT_CATALOG_CATEGORY);
        if category.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "CATALOG_CATEGORY".to_string(),
                "must not be empty".to_string(),
            ));
        }
        let page_size = get_env_or_default("CATALOG_PAGE_SIZE", "20")
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_PAGE_SIZE".to_string(), e.to_string()))?;

        Ok(Self {
            base_url,
            category: category.trim().to_string(),
            page_size,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a catalog host URL, requiring http(s).
fn parse_base_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

/// Default directory for persisted blobs.
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir().map_or_else(
        || PathBuf::from(".furniture-finder"),
        |dir| dir.join("furniture-finder"),
    )
}

/// Get an optional environment variable, treating blank values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_defaults() {
        let config = CatalogConfig::default();
        assert_eq!(config.base_url.as_str(), "https://dummyjson.com/");
        assert_eq!(config.category, "furniture");
        assert_eq!(config.page_size, 20);
    }

    #[test]
    fn test_parse_base_url_accepts_http() {
        let url = parse_base_url("TEST_VAR", "http://127.0.0.1:8080").unwrap();
        assert_eq!(url.port(), Some(8080));
    }

    #[test]
    fn test_parse_base_url_rejects_garbage() {
        let err = parse_base_url("TEST_VAR", "not a url").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "TEST_VAR"));
    }

    #[test]
    fn test_parse_base_url_rejects_other_schemes() {
        let err = parse_base_url("TEST_VAR", "ftp://catalog.example.com").unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn test_default_data_dir_is_namespaced() {
        let dir = default_data_dir();
        assert!(dir.ends_with("furniture-finder") || dir.ends_with(".furniture-finder"));
    }
}
