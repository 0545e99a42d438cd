//! GraphQL output types.
//!
//! Entity fields keep the snake_case names clients already use
//! (`customer_id`, `shipping_details`); connection plumbing uses the usual
//! camelCase (`pageInfo`, `endCursor`, `hasNextPage`).

use async_graphql::{Context, ID, Object, SimpleObject};

use ordergraph_core::{Edge, Order, Page, PageInfo, Product, ShippingDetail, price_to_f64};

use super::service_error;
use crate::services::{ServiceError, ShippingLoader};

/// An order. `shipping_details` resolves through the request's loader.
pub struct OrderObject(pub Order);

#[Object(name = "Order", rename_fields = "snake_case")]
impl OrderObject {
    async fn id(&self) -> i32 {
        self.0.id.as_i32()
    }

    async fn customer_id(&self) -> i32 {
        self.0.customer_id.as_i32()
    }

    async fn product_id(&self) -> i32 {
        self.0.product_id.as_i32()
    }

    async fn quantity(&self) -> i32 {
        self.0.quantity
    }

    async fn total_price(&self) -> f64 {
        price_to_f64(self.0.total_price)
    }

    async fn shipping_details(
        &self,
        ctx: &Context<'_>,
    ) -> async_graphql::Result<Option<ShippingDetailsObject>> {
        let loader = ctx.data::<ShippingLoader>()?;
        let detail = loader
            .load(self.0.id)
            .await
            .map_err(|err| service_error(ServiceError::Shipping(err)))?;
        Ok(detail.map(ShippingDetailsObject::from))
    }
}

impl From<Order> for OrderObject {
    fn from(order: Order) -> Self {
        Self(order)
    }
}

#[derive(SimpleObject)]
#[graphql(name = "ShippingDetails", rename_fields = "snake_case")]
pub struct ShippingDetailsObject {
    pub id: ID,
    pub order_id: i32,
    pub status: String,
    pub carrier: Option<String>,
    pub tracking_number: Option<String>,
}

impl From<ShippingDetail> for ShippingDetailsObject {
    fn from(detail: ShippingDetail) -> Self {
        Self {
            id: ID::from(detail.id.to_string()),
            order_id: detail.order_id.as_i32(),
            status: detail.status,
            carrier: detail.carrier,
            tracking_number: detail.tracking_number,
        }
    }
}

#[derive(SimpleObject)]
#[graphql(name = "Product")]
pub struct ProductObject {
    pub id: i32,
    pub name: String,
    pub price: f64,
}

impl From<Product> for ProductObject {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name,
            price: price_to_f64(product.price),
        }
    }
}

#[derive(SimpleObject)]
#[graphql(name = "PageInfo")]
pub struct PageInfoObject {
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
}

impl From<PageInfo> for PageInfoObject {
    fn from(info: PageInfo) -> Self {
        Self {
            end_cursor: info.end_cursor,
            has_next_page: info.has_next_page,
        }
    }
}

#[derive(SimpleObject)]
pub struct OrderEdge {
    pub cursor: String,
    pub node: OrderObject,
}

impl From<Edge<Order>> for OrderEdge {
    fn from(edge: Edge<Order>) -> Self {
        Self {
            cursor: edge.cursor,
            node: OrderObject(edge.node),
        }
    }
}

/// A page of orders.
#[derive(SimpleObject)]
pub struct OrderConnection {
    pub edges: Vec<OrderEdge>,
    pub page_info: PageInfoObject,
}

impl From<Page<Order>> for OrderConnection {
    fn from(page: Page<Order>) -> Self {
        Self {
            edges: page.edges.into_iter().map(OrderEdge::from).collect(),
            page_info: page.page_info.into(),
        }
    }
}
