use async_trait::async_trait;
use sqlx::PgPool;

use ordergraph_core::{
    CustomerId, NewOrder, Order, OrderChanges, OrderId, PagePlan, Product, ShippingDetail,
};

use super::{
    OrderRepository, OrderStore, RecommendationRepository, RepositoryError, ShippingRepository,
};

/// [`OrderStore`] backed by a `PostgreSQL` pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl OrderStore for PgStore {
    async fn orders_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Order>, RepositoryError> {
        OrderRepository::new(&self.pool)
            .list_by_customer(customer_id)
            .await
    }

    async fn order_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        OrderRepository::new(&self.pool).get_by_id(id).await
    }

    async fn insert_order(&self, order: &NewOrder) -> Result<OrderId, RepositoryError> {
        OrderRepository::new(&self.pool).create(order).await
    }

    async fn update_order(
        &self,
        id: OrderId,
        changes: &OrderChanges,
    ) -> Result<u64, RepositoryError> {
        OrderRepository::new(&self.pool).update(id, changes).await
    }

    async fn delete_order(&self, id: OrderId) -> Result<u64, RepositoryError> {
        OrderRepository::new(&self.pool).delete(id).await
    }

    async fn orders_page(&self, plan: &PagePlan) -> Result<Vec<Order>, RepositoryError> {
        OrderRepository::new(&self.pool).page(plan).await
    }

    async fn shipping_for_orders(
        &self,
        order_ids: &[OrderId],
    ) -> Result<Vec<ShippingDetail>, RepositoryError> {
        ShippingRepository::new(&self.pool)
            .for_orders(order_ids)
            .await
    }

    async fn recommendations(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Product>, RepositoryError> {
        RecommendationRepository::new(&self.pool)
            .for_customer(customer_id)
            .await
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
