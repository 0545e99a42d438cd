//! Application state shared across handlers.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::graphql::{self, OrderSchema};
use crate::services::OrderService;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. It holds the order service
/// both API surfaces adapt, the GraphQL schema built over it, and the
/// Prometheus handle when a recorder is installed.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    orders: Arc<dyn OrderService>,
    schema: OrderSchema,
    metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(orders: Arc<dyn OrderService>, metrics: Option<PrometheusHandle>) -> Self {
        let schema = graphql::build_schema(Arc::clone(&orders));
        Self {
            inner: Arc::new(AppStateInner {
                orders,
                schema,
                metrics,
            }),
        }
    }

    /// Get a reference to the order service.
    #[must_use]
    pub fn orders(&self) -> &dyn OrderService {
        self.inner.orders.as_ref()
    }

    /// Get a reference to the GraphQL schema.
    #[must_use]
    pub fn schema(&self) -> &OrderSchema {
        &self.inner.schema
    }

    /// Get the Prometheus handle, if metrics are enabled.
    #[must_use]
    pub fn metrics(&self) -> Option<&PrometheusHandle> {
        self.inner.metrics.as_ref()
    }
}
