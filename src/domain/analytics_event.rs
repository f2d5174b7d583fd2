//! Usage event recorded for every successful redirect.

use serde::Serialize;

use crate::utils::http_url::is_http_url;

/// A redirect usage event, in the JSON shape the analytics collector accepts.
///
/// Created by the redirect handler once a code resolves, then handed to
/// [`crate::domain::event_dispatcher::EventSender::enqueue`]. The handler keeps
/// no reference to it afterwards; delivery is fire-and-forget.
///
/// Empty optional fields are omitted from the serialized body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsEvent {
    pub code: String,
    /// Unix timestamp in seconds.
    pub ts: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl AnalyticsEvent {
    /// Creates a new event.
    ///
    /// # Arguments
    ///
    /// - `code` - The short code that was resolved
    /// - `ts` - Unix timestamp (seconds) of the redirect
    /// - `user_agent` - Raw `User-Agent` header, if any
    /// - `referrer` - Raw `Referer` header; kept only if it is an absolute http(s) URL
    /// - `request_id` - Correlation id of the originating request
    pub fn new(
        code: String,
        ts: i64,
        user_agent: Option<&str>,
        referrer: Option<&str>,
        request_id: Option<&str>,
    ) -> Self {
        Self {
            code,
            ts,
            user_agent: non_empty(user_agent),
            referrer: referrer
                .map(str::trim)
                .filter(|r| is_http_url(r))
                .map(str::to_string),
            request_id: non_empty(request_id),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_creation_full() {
        let event = AnalyticsEvent::new(
            "abc".to_string(),
            1_700_000_000,
            Some("Mozilla/5.0"),
            Some("https://google.com"),
            Some("req-1"),
        );

        assert_eq!(event.code, "abc");
        assert_eq!(event.ts, 1_700_000_000);
        assert_eq!(event.user_agent.as_deref(), Some("Mozilla/5.0"));
        assert_eq!(event.referrer.as_deref(), Some("https://google.com"));
        assert_eq!(event.request_id.as_deref(), Some("req-1"));
    }

    #[test]
    fn test_non_http_referrer_is_dropped() {
        let event = AnalyticsEvent::new(
            "abc".to_string(),
            0,
            None,
            Some("android-app://com.example"),
            None,
        );
        assert!(event.referrer.is_none());

        let event = AnalyticsEvent::new("abc".to_string(), 0, None, Some("/local"), None);
        assert!(event.referrer.is_none());

        let event = AnalyticsEvent::new("abc".to_string(), 0, None, Some("https:/local"), None);
        assert!(event.referrer.is_none());
    }

    #[test]
    fn test_serializes_without_empty_fields() {
        let event = AnalyticsEvent::new("xyz".to_string(), 42, Some(""), None, None);

        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({ "code": "xyz", "ts": 42 })
        );
    }

    #[test]
    fn test_serializes_collector_shape() {
        let event = AnalyticsEvent::new(
            "abc".to_string(),
            7,
            Some("curl/8"),
            Some(" https://ref.example/page "),
            Some("rid"),
        );

        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "code": "abc",
                "ts": 7,
                "user_agent": "curl/8",
                "referrer": "https://ref.example/page",
                "request_id": "rid"
            })
        );
    }
}
