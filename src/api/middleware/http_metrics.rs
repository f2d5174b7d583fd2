//! Request count and latency recording.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

use crate::infrastructure::metrics::{HttpMetrics, normalize_route};

/// Path of the scrape endpoint, which is never measured itself.
pub const METRICS_PATH: &str = "/metrics";

/// Records `http_requests_total` and `http_request_duration_seconds` for every
/// request except scrapes, labeled by method, normalized route and status.
pub async fn layer(State(metrics): State<HttpMetrics>, req: Request, next: Next) -> Response {
    if req.uri().path() == METRICS_PATH {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().clone();
    let route = normalize_route(req.uri().path());

    let response = next.run(req).await;

    metrics.record_request(
        method.as_str(),
        route,
        response.status().as_u16(),
        start.elapsed(),
    );

    response
}
