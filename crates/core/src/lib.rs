//! Furniture Finder Core - Shared types library.
//!
//! This crate provides common types used across all Furniture Finder components:
//! - `storefront` - Catalog client, persisted session/cart/favorites stores
//! - `cli` - Command-line shop front
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices and emails
//! - [`models`] - Catalog and shopper records (`Product`, `User`, `CartItem`)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod models;
pub mod types;

pub use models::*;
pub use types::*;
