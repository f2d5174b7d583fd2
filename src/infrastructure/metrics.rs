//! Prometheus metrics for the HTTP surface and the analytics pipeline.
//!
//! Metrics are recorded through an explicitly constructed [`HttpMetrics`]
//! which owns its own recorder. No global recorder is installed, so each
//! instance (and each test) has an isolated registry.
//!
//! # Metrics
//!
//! - `http_requests_total{method,route,status}` (counter)
//! - `http_request_duration_seconds{method,route,status}` (histogram)
//! - `analytics_events_total{result}` (counter): delivery attempts, `delivered` or `failed`
//! - `analytics_events_dropped_total` (counter): events rejected by a full or closed queue

use anyhow::Result;
use metrics::{Counter, Key, KeyName, Label, Level, Metadata, Recorder, SharedString, Unit};
use metrics_exporter_prometheus::{
    Matcher, PrometheusBuilder, PrometheusHandle, PrometheusRecorder,
};
use std::sync::Arc;
use std::time::Duration;

const REQUESTS_TOTAL: &str = "http_requests_total";
const REQUEST_DURATION: &str = "http_request_duration_seconds";
const EVENTS_TOTAL: &str = "analytics_events_total";
const EVENTS_DROPPED: &str = "analytics_events_dropped_total";

/// Latency buckets in seconds, tuned for a redirect path bounded by a 1.5s upstream timeout.
const LATENCY_BUCKETS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 1.5, 2.5, 5.0, 10.0,
];

static METADATA: Metadata<'static> =
    Metadata::new(module_path!(), Level::INFO, Some(module_path!()));

/// Cheaply cloneable metrics handle shared by middleware and background workers.
#[derive(Clone)]
pub struct HttpMetrics {
    inner: Arc<Inner>,
}

struct Inner {
    recorder: PrometheusRecorder,
    handle: PrometheusHandle,
    delivered: Counter,
    failed: Counter,
    dropped: Counter,
}

impl HttpMetrics {
    /// Builds a fresh recorder with histogram buckets for request latency.
    ///
    /// # Errors
    ///
    /// Returns an error if the bucket configuration is rejected by the exporter.
    pub fn new() -> Result<Self> {
        let recorder = PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Full(REQUEST_DURATION.to_string()),
                LATENCY_BUCKETS,
            )?
            .build_recorder();
        let handle = recorder.handle();

        recorder.describe_counter(
            KeyName::from(REQUESTS_TOTAL),
            None,
            SharedString::from("Total HTTP requests by method, route and status"),
        );
        recorder.describe_histogram(
            KeyName::from(REQUEST_DURATION),
            Some(Unit::Seconds),
            SharedString::from("HTTP request latency by method, route and status"),
        );
        recorder.describe_counter(
            KeyName::from(EVENTS_TOTAL),
            None,
            SharedString::from("Analytics delivery attempts by result"),
        );
        recorder.describe_counter(
            KeyName::from(EVENTS_DROPPED),
            None,
            SharedString::from("Analytics events dropped because the queue was full or closed"),
        );

        let delivered = register_counter(
            &recorder,
            EVENTS_TOTAL,
            vec![Label::new("result", "delivered")],
        );
        let failed = register_counter(
            &recorder,
            EVENTS_TOTAL,
            vec![Label::new("result", "failed")],
        );
        let dropped = register_counter(&recorder, EVENTS_DROPPED, Vec::new());

        Ok(Self {
            inner: Arc::new(Inner {
                recorder,
                handle,
                delivered,
                failed,
                dropped,
            }),
        })
    }

    /// Records one completed HTTP request.
    pub fn record_request(
        &self,
        method: &str,
        route: &'static str,
        status: u16,
        elapsed: Duration,
    ) {
        let labels = vec![
            Label::new("method", method.to_string()),
            Label::new("route", route),
            Label::new("status", status.to_string()),
        ];

        register_counter(&self.inner.recorder, REQUESTS_TOTAL, labels.clone()).increment(1);
        self.inner
            .recorder
            .register_histogram(&Key::from_parts(REQUEST_DURATION, labels), &METADATA)
            .record(elapsed.as_secs_f64());
    }

    pub fn event_delivered(&self) {
        self.inner.delivered.increment(1);
    }

    pub fn event_failed(&self) {
        self.inner.failed.increment(1);
    }

    pub fn event_dropped(&self) {
        self.inner.dropped.increment(1);
    }

    /// Renders all metrics in the Prometheus text exposition format.
    pub fn render(&self) -> String {
        self.inner.handle.render()
    }
}

fn register_counter(
    recorder: &PrometheusRecorder,
    name: &'static str,
    labels: Vec<Label>,
) -> Counter {
    recorder.register_counter(&Key::from_parts(name, labels), &METADATA)
}

/// Collapses a request path to a bounded set of route labels.
///
/// Codes are folded into `/r/{code}`. Unknown paths become `unknown` so scanners
/// cannot inflate label cardinality.
pub fn normalize_route(path: &str) -> &'static str {
    match path {
        "/health" => "/health",
        "/ready" => "/ready",
        p if p.len() > 3 && p.starts_with("/r/") => "/r/{code}",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_route() {
        assert_eq!(normalize_route("/r/abc"), "/r/{code}");
        assert_eq!(normalize_route("/r/"), "unknown");
        assert_eq!(normalize_route("/health"), "/health");
        assert_eq!(normalize_route("/ready"), "/ready");
        assert_eq!(normalize_route("/wp-admin.php"), "unknown");
        assert_eq!(normalize_route("/"), "unknown");
    }

    #[test]
    fn test_render_request_metrics() {
        let metrics = HttpMetrics::new().unwrap();
        metrics.record_request("GET", "/r/{code}", 302, Duration::from_millis(12));

        let rendered = metrics.render();

        assert!(rendered.contains("http_requests_total"));
        assert!(rendered.contains(r#"route="/r/{code}""#));
        assert!(rendered.contains(r#"status="302""#));
        assert!(rendered.contains("http_request_duration_seconds_bucket"));
    }

    #[test]
    fn test_event_counters() {
        let metrics = HttpMetrics::new().unwrap();
        metrics.event_dropped();
        metrics.event_dropped();
        metrics.event_delivered();

        let rendered = metrics.render();

        assert!(rendered.contains("analytics_events_dropped_total 2"));
        assert!(rendered.contains(r#"analytics_events_total{result="delivered"} 1"#));
    }

    #[test]
    fn test_instances_are_isolated() {
        let a = HttpMetrics::new().unwrap();
        let b = HttpMetrics::new().unwrap();
        a.event_dropped();

        assert!(a.render().contains("analytics_events_dropped_total 1"));
        assert!(!b.render().contains("analytics_events_dropped_total 1"));
    }
}
