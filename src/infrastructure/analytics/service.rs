//! Analytics sink trait.

use async_trait::async_trait;

use crate::domain::analytics_event::AnalyticsEvent;

/// Best-effort destination for analytics events.
///
/// `post` is called by the dispatcher worker once per event. Implementations
/// log and swallow their own failures: there is no retry and no result is
/// reported back to the request that produced the event.
#[async_trait]
pub trait AnalyticsSink: Send + Sync {
    async fn post(&self, event: AnalyticsEvent);
}
