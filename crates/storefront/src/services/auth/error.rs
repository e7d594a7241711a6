//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during login.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Email or password left blank.
    #[error("email and password are required")]
    MissingCredentials,

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] furniture_finder_core::EmailError),

    /// No account matches the email.
    #[error("invalid email or password")]
    InvalidCredentials,
}
