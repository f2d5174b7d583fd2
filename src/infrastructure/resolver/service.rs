//! Resolver trait.

use async_trait::async_trait;

use crate::domain::request_id::RequestId;
use crate::domain::resolve_outcome::ResolveOutcome;

/// Resolves a short code to its destination URL.
///
/// Implementations never return errors: every failure is folded into
/// [`ResolveOutcome::UpstreamError`], and a [`ResolveOutcome::Resolved`]
/// value is always an absolute http(s) URL.
///
/// # Implementations
///
/// - [`crate::infrastructure::resolver::HttpUrlResolver`] - HTTP client for the url-service
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlResolver: Send + Sync {
    /// Looks up `code`, forwarding `request_id` for cross-service tracing.
    async fn resolve(&self, code: &str, request_id: &RequestId) -> ResolveOutcome;
}
