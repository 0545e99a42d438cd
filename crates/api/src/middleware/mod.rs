//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, transaction)
//! 2. `TraceLayer` (`http_request` span)
//! 3. CORS
//! 4. Request ID (recorded on the span)
//! 5. Metrics (per matched route)

pub mod metrics;
pub mod request_id;

pub use metrics::metrics_middleware;
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
