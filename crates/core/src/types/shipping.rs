//! Shipping records. Read-only from Ordergraph's point of view.

use serde::{Deserialize, Serialize};

use super::id::{OrderId, ShippingId};

/// Shipping detail for an order.
///
/// An order has zero or one shipping row; lookups are by equality on
/// `order_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ShippingDetail {
    pub id: ShippingId,
    pub order_id: OrderId,
    pub status: String,
    pub carrier: Option<String>,
    pub tracking_number: Option<String>,
}
