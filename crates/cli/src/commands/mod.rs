//! Command implementations.
//!
//! Commands print their results to stdout; diagnostics go through
//! `tracing` to stderr.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod favorites;
