//! Customer-scoped route handlers.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::IntoParams;

use ordergraph_core::{CustomerId, Order, Page, PageRequest, Product};

use crate::error::{MessageBody, Result};
use crate::services::{OrderWithShipping, orders_page_with_shipping};
use crate::state::AppState;

/// Page size when `first` is omitted.
const DEFAULT_PAGE_SIZE: i32 = 10;

/// Query parameters of the paginated order listing.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Page size (default 10)
    pub first: Option<i32>,
    /// Cursor of the last order already seen
    pub after: Option<String>,
    /// Inclusive lower bound on total price
    #[serde(rename = "minPrice")]
    #[param(value_type = Option<f64>)]
    pub min_price: Option<Decimal>,
    /// `ASC` (default) or `DESC`
    #[serde(rename = "sortOrder")]
    pub sort_order: Option<String>,
}

/// Get all orders for a specific customer.
#[utoipa::path(
    get,
    path = "/api/customers/{customerId}/orders",
    tag = "Orders",
    params(("customerId" = i32, Path, description = "The ID of the customer")),
    responses(
        (status = 200, description = "List of orders for the customer", body = [Order]),
        (status = 500, description = "Database query failed", body = MessageBody),
    )
)]
pub async fn list_orders(
    State(state): State<AppState>,
    path: std::result::Result<Path<CustomerId>, PathRejection>,
) -> Result<Json<Vec<Order>>> {
    let Path(customer_id) = path?;
    Ok(Json(state.orders().orders_by_customer(customer_id).await?))
}

/// Get one page of a customer's orders with shipping details attached.
#[utoipa::path(
    get,
    path = "/api/customers/{customerId}/orders/page",
    tag = "Orders",
    params(("customerId" = i32, Path, description = "The ID of the customer"), PageQuery),
    responses(
        (status = 200, description = "A page of orders", body = Page<OrderWithShipping>),
        (status = 400, description = "Invalid page size or cursor", body = MessageBody),
        (status = 500, description = "Failed to fetch orders with pagination", body = MessageBody),
    )
)]
pub async fn page_orders(
    State(state): State<AppState>,
    path: std::result::Result<Path<CustomerId>, PathRejection>,
    query: std::result::Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Page<OrderWithShipping>>> {
    let Path(customer_id) = path?;
    let Query(query) = query?;

    let request = PageRequest {
        customer_id,
        first: query.first.unwrap_or(DEFAULT_PAGE_SIZE),
        after: query.after,
        min_price: query.min_price,
        sort_order: query.sort_order,
    };

    let loader = state.orders().shipping_loader();
    let page = orders_page_with_shipping(state.orders(), &loader, &request).await?;
    Ok(Json(page))
}

/// Get product recommendations for a customer.
#[utoipa::path(
    get,
    path = "/api/customers/{customerId}/recommendations",
    tag = "Recommendations",
    params(("customerId" = i32, Path, description = "The ID of the customer")),
    responses(
        (status = 200, description = "Recommended products, or a message when there are none", body = [Product]),
        (status = 500, description = "Failed to fetch recommendations", body = MessageBody),
    )
)]
pub async fn recommendations(
    State(state): State<AppState>,
    path: std::result::Result<Path<CustomerId>, PathRejection>,
) -> Result<Response> {
    let Path(customer_id) = path?;

    let products = state.orders().recommendations(customer_id).await?;
    if products.is_empty() {
        return Ok(Json(MessageBody::new("No recommendations available")).into_response());
    }
    Ok(Json(products).into_response())
}
