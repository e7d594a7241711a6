//! Catalog and shopper records.
//!
//! These mirror the catalog's JSON shapes (camelCase keys) and double as the
//! persisted blob format for sessions, carts and favorites.

pub mod cart;
pub mod product;
pub mod user;

pub use cart::CartItem;
pub use product::{Product, StockStatus};
pub use user::User;
