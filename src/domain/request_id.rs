//! Per-request correlation identifier.

use axum::http::{HeaderMap, HeaderName};
use std::fmt;
use uuid::Uuid;

/// Header carrying the correlation id on inbound requests, responses and
/// every outbound call made on behalf of a request.
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Longest inbound correlation id that is trusted as-is.
pub const MAX_REQUEST_ID_LEN: usize = 128;

/// Opaque correlation id, fixed for the lifetime of a single request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Generates a fresh random (UUID v4) id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reuses the inbound correlation id or generates a new one.
///
/// The inbound `X-Request-Id` is forwarded verbatim when it is non-empty,
/// at most [`MAX_REQUEST_ID_LEN`] bytes and readable as a header string.
/// Anything else gets a new UUID. Never fails.
pub fn assign_or_extract(headers: &HeaderMap) -> RequestId {
    headers
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map(|v| RequestId(v.to_string()))
        .unwrap_or_else(RequestId::generate)
}
