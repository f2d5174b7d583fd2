//! Per-request access log.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

use crate::domain::request_id::RequestId;

/// Logs method, path, status, latency and correlation id once the response is ready.
pub async fn layer(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let request_id = req
        .extensions()
        .get::<RequestId>()
        .map(ToString::to_string)
        .unwrap_or_default();

    let response = next.run(req).await;

    tracing::info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        ms = start.elapsed().as_millis() as u64,
        request_id = %request_id,
        "request"
    );

    response
}
