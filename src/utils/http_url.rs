//! Absolute `http`/`https` URL checks.

use url::Url;

/// Returns `true` if `value` is an absolute `http://` or `https://` URL with a host.
///
/// Surrounding whitespace is ignored and the scheme is matched case-insensitively.
/// Anything else, including `javascript:`, `data:`, relative paths and
/// scheme-only strings such as `https://`, is rejected. The `//` after the
/// scheme is required: the parser accepts `http:example.com` and `http:/path`,
/// which browsers resolve against the current origin.
///
/// # Examples
///
/// ```ignore
/// assert!(is_http_url("https://example.com"));
/// assert!(is_http_url("  HTTP://example.com/path "));
/// assert!(!is_http_url("javascript:alert(1)"));
/// ```
pub fn is_http_url(value: &str) -> bool {
    let trimmed = value.trim();
    if !has_http_prefix(trimmed) {
        return false;
    }

    match Url::parse(trimmed) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.has_host(),
        Err(_) => false,
    }
}

fn has_http_prefix(value: &str) -> bool {
    ["http://", "https://"].iter().any(|prefix| {
        value
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}
