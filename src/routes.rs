//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET|HEAD /r/{code}` - Short code redirect
//! - `GET /health`        - Liveness
//! - `GET /ready`         - Readiness
//! - `GET /metrics`       - Prometheus scrape (not itself measured)
//! - anything else        - 404 `not_found`
//!
//! # Middleware (outermost first)
//!
//! - **Request id** - Assigns/forwards `X-Request-Id` and echoes it on every response
//! - **Tracing** - Per-request span tagged with the request id
//! - **Metrics** - Request count and latency by method, route and status
//! - **Access log** - One `INFO` line per request
//! - **Timeout** - `408 Request Timeout` once a request outlives its deadline

use crate::api::handlers::{
    fallback_handler, health_handler, metrics_handler, missing_code_handler, ready_handler,
    redirect_handler,
};
use crate::api::middleware::{access_log, http_metrics, request_id};
use crate::state::AppState;
use axum::http::StatusCode;
use axum::routing::{any, get};
use axum::{Router, middleware};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Constructs the application router with all routes and middleware.
///
/// `request_timeout` bounds the whole handler, including a slow client body.
/// The timeout sits innermost so the 408 is still counted, logged and tagged
/// with the request id.
pub fn app_router(state: AppState, request_timeout: Duration) -> Router {
    let metrics = state.metrics.clone();

    Router::new()
        .route("/r/{code}", any(redirect_handler))
        .route("/r/", any(missing_code_handler))
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .route(http_metrics::METRICS_PATH, get(metrics_handler))
        .fallback(fallback_handler)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id::layer))
                .layer(crate::api::middleware::tracing::layer())
                .layer(middleware::from_fn_with_state(metrics, http_metrics::layer))
                .layer(middleware::from_fn(access_log::layer))
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    request_timeout,
                )),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analytics_event::AnalyticsEvent;
    use crate::domain::event_dispatcher::EventDispatcher;
    use crate::domain::request_id::RequestId;
    use crate::domain::resolve_outcome::ResolveOutcome;
    use crate::infrastructure::analytics::AnalyticsSink;
    use crate::infrastructure::metrics::HttpMetrics;
    use crate::infrastructure::resolver::UrlResolver;
    use crate::lifecycle::Shutdown;
    use async_trait::async_trait;
    use axum_test::TestServer;
    use std::sync::Arc;

    struct StalledResolver;

    #[async_trait]
    impl UrlResolver for StalledResolver {
        async fn resolve(&self, _code: &str, _request_id: &RequestId) -> ResolveOutcome {
            tokio::time::sleep(Duration::from_secs(5)).await;
            ResolveOutcome::Resolved("https://example.com".to_string())
        }
    }

    struct NullSink;

    #[async_trait]
    impl AnalyticsSink for NullSink {
        async fn post(&self, _event: AnalyticsEvent) {}
    }

    #[tokio::test]
    async fn test_slow_request_times_out_with_request_id() {
        let metrics = HttpMetrics::new().unwrap();
        let shutdown = Shutdown::new();
        let dispatcher =
            EventDispatcher::start(4, Arc::new(NullSink), metrics.clone(), shutdown.signal());
        let state = AppState::new(
            Arc::new(StalledResolver),
            dispatcher.sender(),
            metrics.clone(),
        );
        let server = TestServer::new(app_router(state, Duration::from_millis(50))).unwrap();

        let response = server
            .get("/r/abc")
            .add_header("x-request-id", "slow-1")
            .await;

        assert_eq!(response.status_code(), 408);
        assert_eq!(response.header("x-request-id"), "slow-1");
        assert!(metrics.render().contains(r#"status="408""#));

        dispatcher.stop().await;
    }
}
