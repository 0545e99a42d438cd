//! Store-backed order service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use ordergraph_core::{
    BatchLoader, CustomerId, NewOrder, Order, OrderChanges, OrderId, Page, PageRequest, Product,
};

use super::{OrderService, ServiceError, ShippingBatch, ShippingLoader};
use crate::db::OrderStore;

/// [`OrderService`] over any [`OrderStore`].
#[derive(Clone)]
pub struct OrderResolver {
    store: Arc<dyn OrderStore>,
}

impl OrderResolver {
    #[must_use]
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl OrderService for OrderResolver {
    #[instrument(skip(self), fields(customer_id = %customer_id))]
    async fn orders_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Order>, ServiceError> {
        Ok(self.store.orders_by_customer(customer_id).await?)
    }

    #[instrument(skip(self), fields(order_id = %id))]
    async fn order(&self, id: OrderId) -> Result<Option<Order>, ServiceError> {
        Ok(self.store.order_by_id(id).await?)
    }

    #[instrument(skip(self, request), fields(customer_id = %request.customer_id, first = request.first))]
    async fn orders_page(&self, request: &PageRequest) -> Result<Page<Order>, ServiceError> {
        let plan = request.plan()?;
        let rows = self
            .store
            .orders_page(&plan)
            .await
            .map_err(ServiceError::Pagination)?;

        let page = plan.assemble(rows);
        tracing::debug!(
            edges = page.len(),
            has_next_page = page.page_info.has_next_page,
            "assembled order page"
        );
        Ok(page)
    }

    #[instrument(skip(self, order), fields(customer_id = %order.customer_id))]
    async fn create_order(&self, order: NewOrder) -> Result<Order, ServiceError> {
        let id = self.store.insert_order(&order).await?;
        tracing::info!(order_id = %id, "order created");
        Ok(order.into_order(id))
    }

    #[instrument(skip(self, changes), fields(order_id = %id))]
    async fn update_order(
        &self,
        id: OrderId,
        changes: OrderChanges,
    ) -> Result<Option<Order>, ServiceError> {
        if changes.is_empty() {
            tracing::debug!("no changes supplied, skipping write");
        } else {
            let touched = self.store.update_order(id, &changes).await?;
            tracing::info!(rows = touched, "order updated");
        }
        Ok(self.store.order_by_id(id).await?)
    }

    #[instrument(skip(self), fields(order_id = %id))]
    async fn delete_order(&self, id: OrderId) -> Result<(), ServiceError> {
        let removed = self.store.delete_order(id).await?;
        tracing::info!(rows = removed, "order deleted");
        Ok(())
    }

    #[instrument(skip(self), fields(customer_id = %customer_id))]
    async fn recommendations(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Product>, ServiceError> {
        self.store
            .recommendations(customer_id)
            .await
            .map_err(ServiceError::Recommendations)
    }

    fn shipping_loader(&self) -> ShippingLoader {
        BatchLoader::new(ShippingBatch::new(Arc::clone(&self.store)))
    }

    async fn check_ready(&self) -> Result<(), ServiceError> {
        Ok(self.store.ping().await?)
    }
}
