//! Shipping detail batching.

use std::sync::Arc;

use ordergraph_core::{BatchFn, BatchLoader, OrderId, ShippingDetail};

use crate::db::{OrderStore, RepositoryError};

/// Batch function that resolves many orders' shipping in one store query.
#[derive(Clone)]
pub struct ShippingBatch {
    store: Arc<dyn OrderStore>,
}

impl ShippingBatch {
    #[must_use]
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self { store }
    }
}

impl BatchFn for ShippingBatch {
    type Key = OrderId;
    type Value = ShippingDetail;
    type Error = RepositoryError;

    async fn load(
        &self,
        keys: &[OrderId],
    ) -> Result<Vec<(OrderId, ShippingDetail)>, RepositoryError> {
        let rows = self.store.shipping_for_orders(keys).await?;
        Ok(rows.into_iter().map(|row| (row.order_id, row)).collect())
    }
}

/// Shipping loader. Create one per request.
pub type ShippingLoader = BatchLoader<ShippingBatch>;
