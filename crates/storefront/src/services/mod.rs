//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - Account lookup for login against the demo directory

pub mod auth;
