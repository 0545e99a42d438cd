//! HTTP request metrics.
//!
//! # Metrics Emitted
//!
//! - `ordergraph_http_requests_total` - Counter with labels: method, path, status_class
//! - `ordergraph_http_request_duration_seconds` - Histogram with the same labels
//!
//! `path` is the matched route template (`/api/orders/{orderId}`), never the
//! raw URI, so label cardinality stays bounded.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};

/// Label value for requests that matched no route.
const UNMATCHED_PATH: &str = "unmatched";

/// Middleware that records a counter and a latency histogram per request.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or(UNMATCHED_PATH, MatchedPath::as_str)
        .to_string();

    let start = Instant::now();
    let response = next.run(request).await;
    let elapsed = start.elapsed().as_secs_f64();

    let labels = [
        ("method", method),
        ("path", path),
        ("status_class", status_class(response.status().as_u16()).to_string()),
    ];
    metrics::counter!("ordergraph_http_requests_total", &labels).increment(1);
    metrics::histogram!("ordergraph_http_request_duration_seconds", &labels).record(elapsed);

    response
}

const fn status_class(status: u16) -> &'static str {
    match status {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_class() {
        assert_eq!(status_class(200), "2xx");
        assert_eq!(status_class(201), "2xx");
        assert_eq!(status_class(404), "4xx");
        assert_eq!(status_class(503), "5xx");
        assert_eq!(status_class(42), "other");
    }
}
