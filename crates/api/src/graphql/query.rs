use async_graphql::{Context, Object};

use ordergraph_core::{CustomerId, OrderId, PageRequest, price_from_f64};

use super::types::{OrderConnection, OrderObject, ProductObject, ShippingDetailsObject};
use super::{order_service, service_error};
use crate::services::{ServiceError, ShippingLoader};

pub struct QueryRoot;

#[Object(name = "RootQueryType", rename_args = "snake_case")]
impl QueryRoot {
    /// Every order placed by a customer.
    async fn get_orders_by_customer(
        &self,
        ctx: &Context<'_>,
        customer_id: i32,
    ) -> async_graphql::Result<Vec<OrderObject>> {
        let orders = order_service(ctx)?
            .orders_by_customer(CustomerId::new(customer_id))
            .await
            .map_err(service_error)?;
        Ok(orders.into_iter().map(OrderObject).collect())
    }

    /// A single order, or null.
    async fn get_order_details(
        &self,
        ctx: &Context<'_>,
        order_id: i32,
    ) -> async_graphql::Result<Option<OrderObject>> {
        let order = order_service(ctx)?
            .order(OrderId::new(order_id))
            .await
            .map_err(service_error)?;
        Ok(order.map(OrderObject))
    }

    /// Shipping detail for an order, or null. Batched with every other
    /// shipping lookup in the same request.
    async fn get_shipping_details(
        &self,
        ctx: &Context<'_>,
        order_id: i32,
    ) -> async_graphql::Result<Option<ShippingDetailsObject>> {
        let detail = ctx
            .data::<ShippingLoader>()?
            .load(OrderId::new(order_id))
            .await
            .map_err(|err| service_error(ServiceError::Shipping(err)))?;
        Ok(detail.map(ShippingDetailsObject::from))
    }

    /// Products recommended to a customer.
    async fn get_recommendations(
        &self,
        ctx: &Context<'_>,
        customer_id: i32,
    ) -> async_graphql::Result<Vec<ProductObject>> {
        let products = order_service(ctx)?
            .recommendations(CustomerId::new(customer_id))
            .await
            .map_err(service_error)?;
        Ok(products.into_iter().map(ProductObject::from).collect())
    }

    /// Cursor-paginated orders of a customer.
    ///
    /// `first` defaults to 10. `after` bounds the order id even when sorting
    /// by price. `sortOrder` accepts `ASC` or `DESC`; anything else sorts
    /// ascending.
    async fn orders_paginated(
        &self,
        ctx: &Context<'_>,
        customer_id: i32,
        #[graphql(default = 10)] first: i32,
        after: Option<String>,
        #[graphql(name = "minPrice")] min_price: Option<f64>,
        #[graphql(name = "sortOrder")] sort_order: Option<String>,
    ) -> async_graphql::Result<OrderConnection> {
        let mut request = PageRequest::new(CustomerId::new(customer_id), first);
        request.after = after;
        request.sort_order = sort_order;
        if let Some(min_price) = min_price {
            request.min_price =
                Some(price_from_f64(min_price).map_err(|e| service_error(e.into()))?);
        }

        let page = order_service(ctx)?
            .orders_page(&request)
            .await
            .map_err(service_error)?;
        Ok(page.into())
    }
}
