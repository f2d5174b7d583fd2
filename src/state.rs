//! Shared application state injected into handlers and middleware.

use std::sync::Arc;

use crate::domain::event_dispatcher::EventSender;
use crate::infrastructure::metrics::HttpMetrics;
use crate::infrastructure::resolver::UrlResolver;

/// Dependencies shared by all request handlers.
///
/// Built once in [`crate::server::run`] (or by tests) and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<dyn UrlResolver>,
    pub events: EventSender,
    pub metrics: HttpMetrics,
}

impl AppState {
    pub fn new(resolver: Arc<dyn UrlResolver>, events: EventSender, metrics: HttpMetrics) -> Self {
        Self {
            resolver,
            events,
            metrics,
        }
    }
}
