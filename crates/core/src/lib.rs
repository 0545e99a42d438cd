//! Ordergraph Core - Domain types and the two pieces of non-trivial logic
//! shared by every Ordergraph component.
//!
//! This crate is used by:
//! - `api` - REST + GraphQL server over `PostgreSQL`
//! - `cli` - Command-line tools for connectivity checks and seeding
//!
//! # Architecture
//!
//! The core crate performs no database or network I/O. Pagination produces a
//! [`PagePlan`] for the caller's store to execute, and the loader reaches
//! storage through a caller-supplied [`BatchFn`].
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, orders, shipping details, products, pages
//! - [`loader`] - Request-scoped batch loader that collapses per-key lookups
//!   into one query per scheduling tick

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod loader;
pub mod types;

pub use loader::{BatchFn, BatchLoader, LoadError};
pub use types::*;
