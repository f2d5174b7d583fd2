//! HTTP client for the analytics collector.

use super::service::AnalyticsSink;
use crate::domain::analytics_event::AnalyticsEvent;
use crate::domain::request_id::REQUEST_ID_HEADER;
use crate::infrastructure::metrics::HttpMetrics;
use crate::infrastructure::upstream::{MAX_ERROR_BODY, read_body_limited};

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, header};
use std::time::Duration;
use tracing::{debug, error};

pub const DEFAULT_ANALYTICS_TIMEOUT: Duration = Duration::from_millis(300);

/// Posts events as JSON to `{base}/events`.
///
/// Failures (transport errors and non-2xx responses) are logged with the
/// event's request id and counted, never retried.
pub struct HttpAnalyticsSink {
    client: Client,
    endpoint: String,
    metrics: HttpMetrics,
}

impl HttpAnalyticsSink {
    /// Creates a sink for the given collector base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration, metrics: HttpMetrics) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build analytics HTTP client")?;

        Ok(Self {
            client,
            endpoint: format!("{}/events", base_url.trim_end_matches('/')),
            metrics,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AnalyticsSink for HttpAnalyticsSink {
    async fn post(&self, event: AnalyticsEvent) {
        let request_id = event.request_id.clone().unwrap_or_default();

        let mut request = self
            .client
            .post(&self.endpoint)
            .header(header::ACCEPT, "application/json")
            .json(&event);

        if !request_id.is_empty() {
            request = request.header(REQUEST_ID_HEADER, request_id.as_str());
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                self.metrics.event_failed();
                error!(
                    error = %e,
                    request_id = %request_id,
                    code = %event.code,
                    "Analytics post failed"
                );
                return;
            }
        };

        let status = response.status();
        if status.is_success() {
            self.metrics.event_delivered();
            debug!(request_id = %request_id, code = %event.code, "Analytics event delivered");
            return;
        }

        self.metrics.event_failed();
        let body = read_body_limited(response, MAX_ERROR_BODY).await;
        error!(
            status = status.as_u16(),
            body = %body,
            request_id = %request_id,
            code = %event.code,
            "Analytics collector returned non-2xx"
        );
    }
}
