//! Furniture Finder storefront library.
//!
//! Everything a shop front needs below the UI: the remote catalog client,
//! key-value persistence, the demo account directory, and the session,
//! cart and favorites stores built on top of them.
//!
//! # Modules
//!
//! - [`catalog`] - REST client for the product catalog
//! - [`storage`] - `KeyValueStore` trait with file and memory backends
//! - [`stores`] - Session, cart and favorites state
//! - [`browse`] - Local filtering, sorting and type-ahead
//! - [`state`] - `AppState` wiring it together per shopper

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod browse;
pub mod catalog;
pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod storage;
pub mod stores;
