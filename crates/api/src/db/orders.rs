//! Order repository.

use sqlx::{PgPool, Postgres, QueryBuilder};

use ordergraph_core::{CustomerId, NewOrder, Order, OrderChanges, OrderId, PagePlan};

use super::RepositoryError;

const ORDER_COLUMNS: &str = "id, customer_id, product_id, quantity, total_price";

/// Repository for order reads and writes.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every order placed by a customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Order>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE customer_id = $1"
        ))
        .bind(customer_id)
        .fetch_all(self.pool)
        .await?;

        Ok(orders)
    }

    /// Get an order by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let order =
            sqlx::query_as::<_, Order>(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"))
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        Ok(order)
    }

    /// Insert a new order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, order: &NewOrder) -> Result<OrderId, RepositoryError> {
        let id = sqlx::query_scalar::<_, OrderId>(
            r"
            INSERT INTO orders (customer_id, product_id, quantity, total_price)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            ",
        )
        .bind(order.customer_id)
        .bind(order.product_id)
        .bind(order.quantity)
        .bind(order.total_price)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// Update quantity and/or total price. Omitted fields keep their value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(&self, id: OrderId, changes: &OrderChanges) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE orders
            SET quantity = COALESCE($1, quantity),
                total_price = COALESCE($2, total_price)
            WHERE id = $3
            ",
        )
        .bind(changes.quantity)
        .bind(changes.total_price)
        .bind(id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Delete an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: OrderId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Fetch one page worth of rows (plus the look-ahead row) for a plan.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn page(&self, plan: &PagePlan) -> Result<Vec<Order>, RepositoryError> {
        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE customer_id = "
        ));
        query.push_bind(plan.customer_id);

        if let Some(min_price) = plan.min_price {
            query.push(" AND total_price >= ").push_bind(min_price);
        }
        if let Some(after) = plan.after {
            query.push(" AND id > ").push_bind(after);
        }

        query
            .push(" ORDER BY total_price ")
            .push(plan.sort.as_sql())
            .push(", id ASC LIMIT ")
            .push_bind(plan.fetch_limit());

        let rows = query.build_query_as::<Order>().fetch_all(self.pool).await?;

        tracing::debug!(
            customer_id = %plan.customer_id,
            sort = %plan.sort,
            rows = rows.len(),
            "fetched order page"
        );

        Ok(rows)
    }
}
