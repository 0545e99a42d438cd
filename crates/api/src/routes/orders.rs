//! Order route handlers.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use ordergraph_core::{CustomerId, NewOrder, Order, OrderChanges, OrderId, ProductId, ShippingDetail};

use crate::error::{AppError, MessageBody, Result};
use crate::services::ServiceError;
use crate::state::AppState;

/// Create order request body. Presence is checked by validation, not by
/// deserialization, so a missing field yields the usual 400 message.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub customer_id: Option<CustomerId>,
    pub product_id: Option<ProductId>,
    pub quantity: Option<i32>,
    #[schema(value_type = Option<f64>)]
    pub total_price: Option<Decimal>,
}

/// Update order request body. Omitted fields keep their stored value.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderRequest {
    pub quantity: Option<i32>,
    #[schema(value_type = Option<f64>)]
    pub total_price: Option<Decimal>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderCreated {
    pub message: String,
    #[serde(rename = "orderId")]
    pub order_id: OrderId,
}

/// Get details of a specific order.
#[utoipa::path(
    get,
    path = "/api/orders/{orderId}",
    tag = "Orders",
    params(("orderId" = i32, Path, description = "The ID of the order")),
    responses(
        (status = 200, description = "Order details", body = Order),
        (status = 404, description = "Order not found", body = MessageBody),
        (status = 500, description = "Server error", body = MessageBody),
    )
)]
pub async fn get_order(
    State(state): State<AppState>,
    path: std::result::Result<Path<OrderId>, PathRejection>,
) -> Result<Json<Order>> {
    let Path(order_id) = path?;

    state
        .orders()
        .order(order_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))
}

/// Create a new order.
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created successfully", body = OrderCreated),
        (status = 400, description = "Missing required fields", body = MessageBody),
        (status = 500, description = "Database query failed", body = MessageBody),
    )
)]
pub async fn create_order(
    State(state): State<AppState>,
    body: std::result::Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderCreated>)> {
    let Json(body) = body?;
    let order = NewOrder::try_new(
        body.customer_id,
        body.product_id,
        body.quantity,
        body.total_price,
    )?;

    let order = state.orders().create_order(order).await?;

    Ok((
        StatusCode::CREATED,
        Json(OrderCreated {
            message: "Order created successfully".to_string(),
            order_id: order.id,
        }),
    ))
}

/// Update an existing order.
#[utoipa::path(
    put,
    path = "/api/orders/{orderId}",
    tag = "Orders",
    params(("orderId" = i32, Path, description = "The ID of the order")),
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Order updated", body = MessageBody),
        (status = 400, description = "Invalid quantity or price", body = MessageBody),
        (status = 500, description = "Server error", body = MessageBody),
    )
)]
pub async fn update_order(
    State(state): State<AppState>,
    path: std::result::Result<Path<OrderId>, PathRejection>,
    body: std::result::Result<Json<UpdateOrderRequest>, JsonRejection>,
) -> Result<Json<MessageBody>> {
    let Path(order_id) = path?;
    let Json(body) = body?;
    let changes = OrderChanges::try_new(body.quantity, body.total_price)?;

    state.orders().update_order(order_id, changes).await?;

    Ok(Json(MessageBody::new("Order updated")))
}

/// Delete an order.
#[utoipa::path(
    delete,
    path = "/api/orders/{orderId}",
    tag = "Orders",
    params(("orderId" = i32, Path, description = "The ID of the order")),
    responses(
        (status = 200, description = "Order deleted", body = MessageBody),
        (status = 500, description = "Server error", body = MessageBody),
    )
)]
pub async fn delete_order(
    State(state): State<AppState>,
    path: std::result::Result<Path<OrderId>, PathRejection>,
) -> Result<Json<MessageBody>> {
    let Path(order_id) = path?;

    state.orders().delete_order(order_id).await?;

    Ok(Json(MessageBody::new("Order deleted")))
}

/// Get tracking information for an order.
#[utoipa::path(
    get,
    path = "/api/orders/{orderId}/tracking",
    tag = "Shipping",
    params(("orderId" = i32, Path, description = "The ID of the order")),
    responses(
        (status = 200, description = "Shipping detail, or a message when none exists", body = ShippingDetail),
        (status = 500, description = "Shipping service unavailable", body = MessageBody),
    )
)]
pub async fn get_tracking(
    State(state): State<AppState>,
    path: std::result::Result<Path<OrderId>, PathRejection>,
) -> Result<Response> {
    let Path(order_id) = path?;

    let loader = state.orders().shipping_loader();
    let detail = loader
        .load(order_id)
        .await
        .map_err(ServiceError::Shipping)?;

    Ok(match detail {
        Some(detail) => Json(detail).into_response(),
        None => Json(MessageBody::new("No tracking information found")).into_response(),
    })
}
