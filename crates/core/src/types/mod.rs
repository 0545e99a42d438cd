//! Core types for Ordergraph.
//!
//! This module provides type-safe wrappers for the order domain.

pub mod id;
pub mod order;
pub mod page;
pub mod product;
pub mod shipping;

pub use id::*;
pub use order::{NewOrder, Order, OrderChanges, ValidationError, price_from_f64, price_to_f64};
pub use page::{Cursor, Edge, Page, PageInfo, PagePlan, PageRequest, SortOrder};
pub use product::Product;
pub use shipping::ShippingDetail;
