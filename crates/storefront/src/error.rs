//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type for front ends. Server-side style
//! failures (catalog, storage, config) are captured to Sentry through
//! [`AppError::report`]; shopper mistakes are not.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::services::auth::AuthError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog request failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Persisted state could not be read or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Login failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Shopper is not logged in.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad input from the shopper.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Whether this error indicates a fault worth reporting, as opposed to
    /// a shopper mistake.
    #[must_use]
    pub const fn is_reportable(&self) -> bool {
        match self {
            Self::Catalog(CatalogError::NotFound(_)) => false,
            Self::Catalog(_) | Self::Storage(_) | Self::Config(_) => true,
            Self::Auth(_) | Self::NotFound(_) | Self::Unauthorized(_) | Self::BadRequest(_) => {
                false
            }
        }
    }

    /// Log the error, capturing it to Sentry if it is reportable.
    pub fn report(&self) {
        if self.is_reportable() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Command error"
            );
        } else {
            tracing::warn!(error = %self, "Command rejected");
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from a user ID.
///
/// Call this after successful login to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for shopper actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "12")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product 12".to_string());
        assert_eq!(err.to_string(), "Not found: product 12");

        let err = AppError::Auth(AuthError::InvalidCredentials);
        assert_eq!(err.to_string(), "Auth error: invalid email or password");
    }

    #[test]
    fn test_reportable_errors() {
        assert!(AppError::Storage(StorageError::Unavailable("disk".to_string())).is_reportable());
        assert!(
            AppError::Config(ConfigError::InvalidEnvVar("X".to_string(), "bad".to_string()))
                .is_reportable()
        );
        assert!(!AppError::Catalog(CatalogError::NotFound("7".to_string())).is_reportable());
        assert!(!AppError::Auth(AuthError::MissingCredentials).is_reportable());
        assert!(!AppError::Unauthorized("log in first".to_string()).is_reportable());
    }

    #[test]
    fn test_report_without_sentry_client_is_noop() {
        AppError::BadRequest("quantity".to_string()).report();
        AppError::Storage(StorageError::Unavailable("disk".to_string())).report();
        add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "12")]));
        set_sentry_user(&"1", Some("ethan.carter@email.com"));
        clear_sentry_user();
    }
}
