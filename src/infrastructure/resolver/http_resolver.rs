//! HTTP client for the url-service resolve endpoint.

use super::service::UrlResolver;
use crate::domain::request_id::{REQUEST_ID_HEADER, RequestId};
use crate::domain::resolve_outcome::ResolveOutcome;
use crate::infrastructure::upstream::{MAX_ERROR_BODY, read_body_limited};
use crate::utils::http_url::is_http_url;

use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::http::HeaderValue;
use reqwest::{Client, StatusCode, header};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Resolver call timeout. Kept short: the call sits on the redirect critical path.
pub const DEFAULT_RESOLVE_TIMEOUT: Duration = Duration::from_millis(1500);

/// Body returned by the url-service on a successful lookup.
#[derive(Debug, Deserialize)]
struct ResolveResponse {
    long_url: String,
}

/// Resolver backed by `GET {base}/urls/{code}`.
///
/// Owns a dedicated [`reqwest::Client`] so its timeout is independent of the
/// analytics client.
pub struct HttpUrlResolver {
    client: Client,
    base_url: Url,
}

impl HttpUrlResolver {
    /// Creates a resolver for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid absolute URL or the HTTP
    /// client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid resolver base URL '{base_url}'"))?;

        if base_url.cannot_be_a_base() {
            anyhow::bail!("Resolver base URL '{base_url}' cannot be used as a base");
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build resolver HTTP client")?;

        Ok(Self { client, base_url })
    }

    /// Builds `{base}/urls/{code}` with the code percent-escaped as a single segment.
    fn endpoint(&self, code: &str) -> Option<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .push("urls")
            .push(code);
        Some(url)
    }
}

#[async_trait]
impl UrlResolver for HttpUrlResolver {
    async fn resolve(&self, code: &str, request_id: &RequestId) -> ResolveOutcome {
        let Some(endpoint) = self.endpoint(code) else {
            return ResolveOutcome::upstream_error(0, "resolver base URL cannot hold a path");
        };

        let mut request = self
            .client
            .get(endpoint)
            .header(header::ACCEPT, "application/json");

        if !request_id.as_str().is_empty() {
            request = request.header(REQUEST_ID_HEADER, request_id.as_str());
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return ResolveOutcome::upstream_error(0, e.to_string()),
        };

        let status = response.status();
        debug!(code = %code, status = status.as_u16(), "Resolver responded");

        if status == StatusCode::NOT_FOUND {
            return ResolveOutcome::NotFound;
        }

        if !status.is_success() {
            let body = read_body_limited(response, MAX_ERROR_BODY).await;
            let message = if body.is_empty() {
                status.to_string()
            } else {
                body
            };
            return ResolveOutcome::upstream_error(status.as_u16(), message);
        }

        let parsed = match response.json::<ResolveResponse>().await {
            Ok(parsed) => parsed,
            Err(e) => {
                return ResolveOutcome::upstream_error(
                    status.as_u16(),
                    format!("invalid response body: {e}"),
                );
            }
        };

        let long_url = parsed.long_url.trim();
        if !is_http_url(long_url) || HeaderValue::from_str(long_url).is_err() {
            return ResolveOutcome::upstream_error(
                status.as_u16(),
                "invalid long_url from upstream",
            );
        }

        ResolveOutcome::Resolved(long_url.to_string())
    }
}
