use async_graphql::{Context, Object};

use ordergraph_core::{
    CustomerId, NewOrder, OrderChanges, OrderId, ProductId, ValidationError, price_from_f64,
};

use super::types::OrderObject;
use super::{order_service, service_error};

pub struct MutationRoot;

fn validated<T>(result: Result<T, ValidationError>) -> async_graphql::Result<T> {
    result.map_err(|err| service_error(err.into()))
}

#[Object(name = "Mutation", rename_args = "snake_case")]
impl MutationRoot {
    /// Create an order and return it with its assigned id.
    async fn create_order(
        &self,
        ctx: &Context<'_>,
        customer_id: i32,
        product_id: i32,
        quantity: i32,
        total_price: f64,
    ) -> async_graphql::Result<OrderObject> {
        let order = validated(NewOrder::try_new(
            Some(CustomerId::new(customer_id)),
            Some(ProductId::new(product_id)),
            Some(quantity),
            Some(validated(price_from_f64(total_price))?),
        ))?;

        let order = order_service(ctx)?
            .create_order(order)
            .await
            .map_err(service_error)?;
        Ok(OrderObject(order))
    }

    /// Replace quantity and total price. Returns the stored order, or null
    /// when the id is unknown.
    async fn update_order(
        &self,
        ctx: &Context<'_>,
        order_id: i32,
        quantity: i32,
        total_price: f64,
    ) -> async_graphql::Result<Option<OrderObject>> {
        let changes = validated(OrderChanges::try_new(
            Some(quantity),
            Some(validated(price_from_f64(total_price))?),
        ))?;

        let order = order_service(ctx)?
            .update_order(OrderId::new(order_id), changes)
            .await
            .map_err(service_error)?;
        Ok(order.map(OrderObject))
    }

    /// Delete an order. Unknown ids are reported as deleted too.
    async fn delete_order(&self, ctx: &Context<'_>, order_id: i32) -> async_graphql::Result<String> {
        order_service(ctx)?
            .delete_order(OrderId::new(order_id))
            .await
            .map_err(service_error)?;
        Ok("Order deleted successfully".to_string())
    }
}
