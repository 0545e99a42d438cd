//! Load demo data into an existing schema.
//!
//! Inserts a small catalogue, two customers' orders, shipping rows for some
//! of them and a few recommendations. Running it twice inserts the orders
//! again; products are keyed by id and skipped when present.

use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;

use ordergraph_api::db::OrderRepository;
use ordergraph_core::{CustomerId, NewOrder, OrderId, ProductId};

use super::{CommandError, connect};

/// `(id, name, price in cents)`
const PRODUCTS: &[(i32, &str, i64)] = &[
    (10, "Pineapple Slicer", 1999),
    (11, "Fruit Bowl", 3550),
    (12, "Cold Press Juicer", 8900),
    (13, "Citrus Zester", 1000),
];

/// `(status, carrier, tracking number)`
type DemoShipping = (&'static str, Option<&'static str>, Option<&'static str>);

/// `(customer, product, quantity, total in cents, shipping)`
type DemoOrder = (i32, i32, i32, i64, Option<DemoShipping>);

const ORDERS: &[DemoOrder] = &[
    (
        1,
        10,
        1,
        2500,
        Some(("Shipped", Some("UPS"), Some("1Z999AA10123456784"))),
    ),
    (1, 11, 2, 1000, None),
    (1, 12, 1, 9999, Some(("Delivered", Some("FedEx"), Some("FX123456")))),
    (1, 10, 3, 7500, Some(("Pending", None, None))),
    (1, 13, 1, 1000, None),
    (2, 10, 1, 500, None),
];

/// `(customer, product)`
const RECOMMENDATIONS: &[(i32, i32)] = &[(1, 11), (1, 12), (2, 13)];

/// Seed the database with demo rows.
///
/// # Errors
///
/// Returns an error if the database URL is missing or any insert fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    let products = seed_products(&pool).await?;
    info!(inserted = products, "Products seeded");

    let orders = seed_orders(&pool).await?;
    info!(inserted = orders, "Orders and shipping seeded");

    for &(customer_id, product_id) in RECOMMENDATIONS {
        sqlx::query("INSERT INTO recommendations (customer_id, product_id) VALUES ($1, $2)")
            .bind(CustomerId::new(customer_id))
            .bind(ProductId::new(product_id))
            .execute(&pool)
            .await?;
    }
    info!(inserted = RECOMMENDATIONS.len(), "Recommendations seeded");

    pool.close().await;
    info!("Seeding complete!");
    Ok(())
}

async fn seed_products(pool: &PgPool) -> Result<u64, CommandError> {
    let mut inserted = 0;
    for &(id, name, cents) in PRODUCTS {
        let result = sqlx::query(
            "INSERT INTO products (id, name, price) VALUES ($1, $2, $3) ON CONFLICT (id) DO NOTHING",
        )
        .bind(ProductId::new(id))
        .bind(name)
        .bind(Decimal::new(cents, 2))
        .execute(pool)
        .await?;
        inserted += result.rows_affected();
    }
    Ok(inserted)
}

async fn seed_orders(pool: &PgPool) -> Result<usize, CommandError> {
    let repo = OrderRepository::new(pool);

    for &(customer_id, product_id, quantity, cents, shipping) in ORDERS {
        let order = NewOrder::try_new(
            Some(CustomerId::new(customer_id)),
            Some(ProductId::new(product_id)),
            Some(quantity),
            Some(Decimal::new(cents, 2)),
        )?;
        let order_id = repo.create(&order).await?;

        if let Some((status, carrier, tracking_number)) = shipping {
            insert_shipping(pool, order_id, status, carrier, tracking_number).await?;
        }
    }
    Ok(ORDERS.len())
}

async fn insert_shipping(
    pool: &PgPool,
    order_id: OrderId,
    status: &str,
    carrier: Option<&str>,
    tracking_number: Option<&str>,
) -> Result<(), CommandError> {
    sqlx::query(
        "INSERT INTO shipping (order_id, status, carrier, tracking_number) VALUES ($1, $2, $3, $4)",
    )
    .bind(order_id)
    .bind(status)
    .bind(carrier)
    .bind(tracking_number)
    .execute(pool)
    .await?;
    Ok(())
}
