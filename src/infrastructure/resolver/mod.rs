//! Upstream lookup of short codes.
//!
//! Provides a [`UrlResolver`] trait with one production implementation:
//! - [`HttpUrlResolver`] - Calls the url-service `GET /urls/{code}` endpoint

mod http_resolver;
mod service;

pub use http_resolver::{DEFAULT_RESOLVE_TIMEOUT, HttpUrlResolver};
pub use service::UrlResolver;

#[cfg(test)]
pub use service::MockUrlResolver;
