//! Shipping repository.

use sqlx::PgPool;

use ordergraph_core::{OrderId, ShippingDetail};

use super::RepositoryError;

/// Read-only access to shipping rows.
pub struct ShippingRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ShippingRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch shipping rows for a set of orders in a single query.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn for_orders(
        &self,
        order_ids: &[OrderId],
    ) -> Result<Vec<ShippingDetail>, RepositoryError> {
        let ids: Vec<i32> = order_ids.iter().map(OrderId::as_i32).collect();

        let rows = sqlx::query_as::<_, ShippingDetail>(
            r"
            SELECT id, order_id, status, carrier, tracking_number
            FROM shipping
            WHERE order_id = ANY($1)
            ",
        )
        .bind(ids)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
