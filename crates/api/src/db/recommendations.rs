//! Product recommendations per customer.

use sqlx::PgPool;

use ordergraph_core::{CustomerId, Product};

use super::RepositoryError;

/// Repository for the customer/product recommendation join.
pub struct RecommendationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RecommendationRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Products recommended to a customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(
            r"
            SELECT p.id, p.name, p.price
            FROM products p
            JOIN recommendations r ON r.product_id = p.id
            WHERE r.customer_id = $1
            ORDER BY p.id
            ",
        )
        .bind(customer_id)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }
}
