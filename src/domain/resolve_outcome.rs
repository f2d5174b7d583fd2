//! Result of resolving a short code against the upstream resolver.

/// Three-way outcome of a resolver lookup.
///
/// `Resolved` always carries an absolute `http://` or `https://` URL. Any other
/// destination returned upstream is reported as `UpstreamError` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveOutcome {
    Resolved(String),
    NotFound,
    /// `status` is the upstream HTTP status, or 0 for transport-level failures.
    UpstreamError { status: u16, message: String },
}

impl ResolveOutcome {
    pub fn upstream_error(status: u16, message: impl Into<String>) -> Self {
        Self::UpstreamError {
            status,
            message: message.into(),
        }
    }
}
