//! Data access for the order store.
//!
//! # Tables
//!
//! - `orders` - `id SERIAL`, `customer_id`, `product_id`, `quantity`,
//!   `total_price NUMERIC(10, 2)`
//! - `shipping` - zero or one row per order: `order_id`, `status`,
//!   `carrier`, `tracking_number`
//! - `products` - `id`, `name`, `price`
//! - `recommendations` - `customer_id` / `product_id` join
//!
//! The schema is managed outside this service. `ordergraph-cli seed` loads
//! demo rows into an existing schema.
//!
//! Every query binds caller values through `$n` parameters. The only
//! fragment ever pushed as raw SQL is the sort keyword from
//! [`SortOrder::as_sql`](ordergraph_core::SortOrder::as_sql).

pub mod orders;
pub mod recommendations;
pub mod shipping;
mod store;

use std::time::Duration;

use async_trait::async_trait;
use ordergraph_core::{
    CustomerId, NewOrder, Order, OrderChanges, OrderId, PagePlan, Product, ShippingDetail,
};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use orders::OrderRepository;
pub use recommendations::RecommendationRepository;
pub use shipping::ShippingRepository;
pub use store::PgStore;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Create a `PostgreSQL` connection pool.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
/// * `max_connections` - Upper bound on pooled connections
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &secrecy::SecretString,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// The queries the order service runs against its backing store.
///
/// [`PgStore`] is the production implementation. Router tests run the same
/// services against an in-memory store.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// All orders of one customer, in store order.
    async fn orders_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Order>, RepositoryError>;

    async fn order_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError>;

    /// Insert an order and return the identifier the store assigned.
    async fn insert_order(&self, order: &NewOrder) -> Result<OrderId, RepositoryError>;

    /// Apply a partial update. Returns the number of rows touched.
    async fn update_order(
        &self,
        id: OrderId,
        changes: &OrderChanges,
    ) -> Result<u64, RepositoryError>;

    /// Returns the number of rows removed.
    async fn delete_order(&self, id: OrderId) -> Result<u64, RepositoryError>;

    /// Run a page query: at most `plan.fetch_limit()` rows in plan order.
    async fn orders_page(&self, plan: &PagePlan) -> Result<Vec<Order>, RepositoryError>;

    /// Shipping rows for any of the given orders, in any order.
    async fn shipping_for_orders(
        &self,
        order_ids: &[OrderId],
    ) -> Result<Vec<ShippingDetail>, RepositoryError>;

    async fn recommendations(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Product>, RepositoryError>;

    /// Round-trip a trivial query to prove the store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}
