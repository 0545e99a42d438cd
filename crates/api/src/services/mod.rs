//! Order resolution shared by the REST and GraphQL surfaces.
//!
//! # Services
//!
//! - `orders` - [`OrderResolver`], the store-backed [`OrderService`]
//! - `shipping` - the request-scoped [`ShippingLoader`]
//!
//! Both API surfaces hold an `Arc<dyn OrderService>` and never talk to the
//! store directly. Shipping detail for an order is only ever resolved
//! through the loader of the request being served.

pub mod orders;
pub mod shipping;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use ordergraph_core::{
    CustomerId, LoadError, NewOrder, Order, OrderChanges, OrderId, Page, PageRequest, Product,
    ShippingDetail, ValidationError,
};

use crate::db::RepositoryError;

pub use orders::OrderResolver;
pub use shipping::{ShippingBatch, ShippingLoader};

/// Errors that can occur while resolving orders.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The client sent unusable input.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A plain read or write against the store failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// The page query failed.
    #[error("pagination query failed: {0}")]
    Pagination(#[source] RepositoryError),

    /// A shipping batch failed.
    #[error("shipping lookup failed: {0}")]
    Shipping(#[from] LoadError<RepositoryError>),

    /// The recommendation query failed.
    #[error("recommendation lookup failed: {0}")]
    Recommendations(#[source] RepositoryError),
}

impl ServiceError {
    /// Whether the client can fix the request.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// The message safe to return to clients.
    ///
    /// Validation messages pass through. Store failures collapse to a
    /// generic message per operation.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            Self::Repository(_) => "Database query failed".to_string(),
            Self::Pagination(_) => "Failed to fetch orders with pagination".to_string(),
            Self::Shipping(_) => "Shipping service unavailable".to_string(),
            Self::Recommendations(_) => "Failed to fetch recommendations".to_string(),
        }
    }
}

/// An order together with its shipping detail, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct OrderWithShipping {
    #[serde(flatten)]
    pub order: Order,
    pub shipping_details: Option<ShippingDetail>,
}

/// Operations both API surfaces expose.
#[async_trait]
pub trait OrderService: Send + Sync {
    async fn orders_by_customer(&self, customer_id: CustomerId)
    -> Result<Vec<Order>, ServiceError>;

    async fn order(&self, id: OrderId) -> Result<Option<Order>, ServiceError>;

    /// One page of a customer's orders.
    async fn orders_page(&self, request: &PageRequest) -> Result<Page<Order>, ServiceError>;

    /// Insert an order and return it with its assigned id.
    async fn create_order(&self, order: NewOrder) -> Result<Order, ServiceError>;

    /// Apply changes and return the order as stored afterwards.
    ///
    /// `None` when no order has that id. The store is not asked to tell a
    /// missing row apart from an untouched one.
    async fn update_order(
        &self,
        id: OrderId,
        changes: OrderChanges,
    ) -> Result<Option<Order>, ServiceError>;

    /// Delete an order. Deleting an unknown id succeeds.
    async fn delete_order(&self, id: OrderId) -> Result<(), ServiceError>;

    async fn recommendations(&self, customer_id: CustomerId)
    -> Result<Vec<Product>, ServiceError>;

    /// A fresh loader for one request.
    fn shipping_loader(&self) -> ShippingLoader;

    /// Whether the backing store answers.
    async fn check_ready(&self) -> Result<(), ServiceError>;
}

/// A page of orders with shipping attached through `loader`.
///
/// The page query runs first, then every order on the page goes through a
/// single `load_many` call.
///
/// # Errors
///
/// Returns the page error, or `ServiceError::Shipping` if the shipping
/// batch fails.
pub async fn orders_page_with_shipping(
    service: &dyn OrderService,
    loader: &ShippingLoader,
    request: &PageRequest,
) -> Result<Page<OrderWithShipping>, ServiceError> {
    let page = service.orders_page(request).await?;

    let order_ids: Vec<OrderId> = page.nodes().map(|order| order.id).collect();
    let mut shipping = loader.load_many(&order_ids).await?.into_iter();

    Ok(page.map_nodes(|order| OrderWithShipping {
        order,
        shipping_details: shipping.next().flatten(),
    }))
}
