//! HTTP routes.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                                   - Liveness
//! GET    /health/ready                             - Readiness (database ping)
//! GET    /metrics                                  - Prometheus exposition
//! GET    /api-docs/                                - Swagger UI
//! GET    /api-docs/openapi.json                    - OpenAPI document
//!
//! # GraphQL
//! GET    /graphql                                  - GraphiQL
//! POST   /graphql                                  - Execute a query
//!
//! # REST (JSON)
//! GET    /api/customers/{customerId}/orders        - All orders of a customer
//! GET    /api/customers/{customerId}/orders/page   - Cursor-paginated orders with shipping
//! GET    /api/customers/{customerId}/recommendations - Recommended products
//! GET    /api/orders/{orderId}                     - Order detail
//! POST   /api/orders                               - Create order
//! PUT    /api/orders/{orderId}                     - Update quantity / total price
//! DELETE /api/orders/{orderId}                     - Delete order
//! GET    /api/orders/{orderId}/tracking            - Shipping detail
//! ```

pub mod customers;
pub mod docs;
pub mod health;
pub mod orders;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::graphql;
use crate::middleware::{metrics_middleware, request_id_middleware};
use crate::state::AppState;

/// Create the REST routes, mounted under `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/customers/{customerId}/orders", get(customers::list_orders))
        .route(
            "/customers/{customerId}/orders/page",
            get(customers::page_orders),
        )
        .route(
            "/customers/{customerId}/recommendations",
            get(customers::recommendations),
        )
        .route("/orders", post(orders::create_order))
        .route(
            "/orders/{orderId}",
            get(orders::get_order)
                .put(orders::update_order)
                .delete(orders::delete_order),
        )
        .route("/orders/{orderId}/tracking", get(orders::get_tracking))
}

/// Build the full application router.
///
/// Tracing, CORS and Sentry layers are added by the binary so tests can
/// drive the bare router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/metrics", get(health::metrics))
        .route(
            "/graphql",
            get(graphql::graphiql).post(graphql::graphql_handler),
        )
        .merge(docs::swagger_ui())
        .nest("/api", api_routes())
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
