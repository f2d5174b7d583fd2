#![allow(dead_code)]

use async_trait::async_trait;
use redirect_service::domain::analytics_event::AnalyticsEvent;
use redirect_service::domain::event_dispatcher::EventDispatcher;
use redirect_service::infrastructure::analytics::{AnalyticsSink, HttpAnalyticsSink};
use redirect_service::infrastructure::metrics::HttpMetrics;
use redirect_service::infrastructure::resolver::HttpUrlResolver;
use redirect_service::lifecycle::Shutdown;
use redirect_service::routes::{DEFAULT_REQUEST_TIMEOUT, app_router};
use redirect_service::state::AppState;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Sink that keeps every event it is handed.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnalyticsSink for RecordingSink {
    async fn post(&self, event: AnalyticsEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Full router wired to real HTTP clients pointed at mock upstreams.
pub struct TestApp {
    pub router: axum::Router,
    pub dispatcher: EventDispatcher,
    pub metrics: HttpMetrics,
    pub shutdown: Shutdown,
}

impl TestApp {
    pub async fn stop(&self) {
        self.dispatcher.stop().await;
    }
}

pub fn create_test_app(resolver_base: &str, analytics_base: &str, queue_size: usize) -> TestApp {
    let metrics = HttpMetrics::new().unwrap();
    let resolver =
        Arc::new(HttpUrlResolver::new(resolver_base, Duration::from_millis(1500)).unwrap());
    let sink = Arc::new(
        HttpAnalyticsSink::new(analytics_base, Duration::from_millis(300), metrics.clone())
            .unwrap(),
    );

    create_test_app_with_sink(resolver, sink, metrics, queue_size)
}

pub fn create_test_app_with_sink(
    resolver: Arc<HttpUrlResolver>,
    sink: Arc<dyn AnalyticsSink>,
    metrics: HttpMetrics,
    queue_size: usize,
) -> TestApp {
    let shutdown = Shutdown::new();
    let dispatcher = EventDispatcher::start(queue_size, sink, metrics.clone(), shutdown.signal());
    let state = AppState::new(resolver, dispatcher.sender(), metrics.clone());

    TestApp {
        router: app_router(state, DEFAULT_REQUEST_TIMEOUT),
        dispatcher,
        metrics,
        shutdown,
    }
}
