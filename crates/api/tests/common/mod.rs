//! Shared test utilities for the API router tests.
//!
//! [`MemoryStore`] implements `OrderStore` over plain vectors and records
//! every shipping query so tests can assert on batching.

// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

use ordergraph_api::db::{OrderStore, RepositoryError};
use ordergraph_api::routes::router;
use ordergraph_api::services::OrderResolver;
use ordergraph_api::state::AppState;
use ordergraph_core::{
    CustomerId, NewOrder, Order, OrderChanges, OrderId, PagePlan, Product, ProductId, ShippingDetail,
    ShippingId,
};

// =============================================================================
// In-memory store
// =============================================================================

#[derive(Default)]
struct Tables {
    orders: Vec<Order>,
    shipping: Vec<ShippingDetail>,
    products: Vec<Product>,
    recommendations: Vec<(CustomerId, ProductId)>,
    next_order_id: i32,
}

/// In-memory `OrderStore` with failure injection.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    shipping_queries: Mutex<Vec<Vec<OrderId>>>,
    fail_all: AtomicBool,
    fail_shipping: AtomicBool,
}

impl MemoryStore {
    /// Make every query fail.
    pub fn fail_all(&self) {
        self.fail_all.store(true, Ordering::SeqCst);
    }

    /// Make shipping queries fail.
    pub fn fail_shipping(&self) {
        self.fail_shipping.store(true, Ordering::SeqCst);
    }

    /// The key sets of every shipping query run so far.
    pub fn shipping_queries(&self) -> Vec<Vec<OrderId>> {
        self.shipping_queries.lock().unwrap().clone()
    }

    pub fn order_count(&self) -> usize {
        self.tables.lock().unwrap().orders.len()
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.fail_all.load(Ordering::SeqCst) {
            return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn orders_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Order>, RepositoryError> {
        self.check()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .orders
            .iter()
            .filter(|o| o.customer_id == customer_id)
            .cloned()
            .collect())
    }

    async fn order_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        self.check()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables.orders.iter().find(|o| o.id == id).cloned())
    }

    async fn insert_order(&self, order: &NewOrder) -> Result<OrderId, RepositoryError> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        tables.next_order_id += 1;
        let id = OrderId::new(tables.next_order_id);
        tables.orders.push(order.clone().into_order(id));
        Ok(id)
    }

    async fn update_order(
        &self,
        id: OrderId,
        changes: &OrderChanges,
    ) -> Result<u64, RepositoryError> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        let Some(order) = tables.orders.iter_mut().find(|o| o.id == id) else {
            return Ok(0);
        };
        if let Some(quantity) = changes.quantity {
            order.quantity = quantity;
        }
        if let Some(total_price) = changes.total_price {
            order.total_price = total_price;
        }
        Ok(1)
    }

    async fn delete_order(&self, id: OrderId) -> Result<u64, RepositoryError> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        let before = tables.orders.len();
        tables.orders.retain(|o| o.id != id);
        Ok((before - tables.orders.len()) as u64)
    }

    async fn orders_page(&self, plan: &PagePlan) -> Result<Vec<Order>, RepositoryError> {
        self.check()?;
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<Order> = tables
            .orders
            .iter()
            .filter(|o| plan.admits(o))
            .cloned()
            .collect();
        rows.sort_by(|a, b| plan.compare(a, b));
        rows.truncate(usize::try_from(plan.fetch_limit()).unwrap());
        Ok(rows)
    }

    async fn shipping_for_orders(
        &self,
        order_ids: &[OrderId],
    ) -> Result<Vec<ShippingDetail>, RepositoryError> {
        self.shipping_queries.lock().unwrap().push(order_ids.to_vec());
        self.check()?;
        if self.fail_shipping.load(Ordering::SeqCst) {
            return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        }
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .shipping
            .iter()
            .filter(|s| order_ids.contains(&s.order_id))
            .cloned()
            .collect())
    }

    async fn recommendations(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Product>, RepositoryError> {
        self.check()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .products
            .iter()
            .filter(|p| tables.recommendations.contains(&(customer_id, p.id)))
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        self.check()
    }
}

// =============================================================================
// Fixtures
// =============================================================================

fn price(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn order(id: i32, customer: i32, product: i32, quantity: i32, total: &str) -> Order {
    Order {
        id: OrderId::new(id),
        customer_id: CustomerId::new(customer),
        product_id: ProductId::new(product),
        quantity,
        total_price: price(total),
    }
}

fn shipping(id: i32, order_id: i32, status: &str, carrier: Option<&str>, tracking: Option<&str>) -> ShippingDetail {
    ShippingDetail {
        id: ShippingId::new(id),
        order_id: OrderId::new(order_id),
        status: status.to_string(),
        carrier: carrier.map(String::from),
        tracking_number: tracking.map(String::from),
    }
}

/// A store with demo data.
///
/// Customer 1 has orders 1-5. By ascending price and id they sort as
/// 2 (10.00), 5 (10.00), 1 (25.00), 4 (75.00), 3 (99.99).
/// Customer 2 has order 6. Orders 1, 3 and 4 have shipping rows.
/// Customer 1 is recommended products 11 and 12; customer 2 has none.
pub fn seeded_store() -> Arc<MemoryStore> {
    let store = MemoryStore::default();
    {
        let mut tables = store.tables.lock().unwrap();
        tables.orders = vec![
            order(1, 1, 10, 1, "25.00"),
            order(2, 1, 11, 2, "10.00"),
            order(3, 1, 12, 1, "99.99"),
            order(4, 1, 10, 3, "75.00"),
            order(5, 1, 13, 1, "10.00"),
            order(6, 2, 10, 1, "5.00"),
        ];
        tables.next_order_id = 6;
        tables.shipping = vec![
            shipping(1, 1, "Shipped", Some("UPS"), Some("1Z999AA10123456784")),
            shipping(2, 3, "Delivered", Some("FedEx"), Some("FX123456")),
            shipping(3, 4, "Pending", None, None),
        ];
        tables.products = vec![
            Product {
                id: ProductId::new(10),
                name: "Pineapple Slicer".to_string(),
                price: price("19.99"),
            },
            Product {
                id: ProductId::new(11),
                name: "Fruit Bowl".to_string(),
                price: price("35.50"),
            },
            Product {
                id: ProductId::new(12),
                name: "Cold Press Juicer".to_string(),
                price: price("89.00"),
            },
        ];
        tables.recommendations = vec![
            (CustomerId::new(1), ProductId::new(11)),
            (CustomerId::new(1), ProductId::new(12)),
        ];
    }
    Arc::new(store)
}

/// Create a test app over a store.
///
/// Each call creates a fresh `AppState` wrapping the shared store.
pub fn test_app(store: &Arc<MemoryStore>) -> Router {
    let orders = Arc::new(OrderResolver::new(Arc::clone(store) as Arc<dyn OrderStore>));
    router(AppState::new(orders, None))
}

// =============================================================================
// Request helpers
// =============================================================================

/// Send a request and decode the JSON body (`Value::Null` when empty or not JSON).
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    send(
        app,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await
}

pub async fn send_json(app: Router, method: &str, uri: &str, body: &Value) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

/// Execute a GraphQL document and return the full response body.
pub async fn graphql(app: Router, query: &str) -> Value {
    let (status, body) = send_json(
        app,
        "POST",
        "/graphql",
        &serde_json::json!({ "query": query }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "graphql transport error: {body}");
    body
}
