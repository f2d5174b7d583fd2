use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use redirect_service::domain::request_id::RequestId;
use redirect_service::domain::resolve_outcome::ResolveOutcome;
use redirect_service::infrastructure::resolver::{
    DEFAULT_RESOLVE_TIMEOUT, HttpUrlResolver, UrlResolver,
};

fn resolver(base: &str) -> HttpUrlResolver {
    HttpUrlResolver::new(base, DEFAULT_RESOLVE_TIMEOUT).unwrap()
}

fn rid() -> RequestId {
    RequestId::generate()
}

#[tokio::test]
async fn test_resolve_ok() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/urls/abc"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "code": "abc", "long_url": "https://example.com" })),
        )
        .mount(&server)
        .await;

    let outcome = resolver(&server.uri()).resolve("abc", &rid()).await;

    assert_eq!(
        outcome,
        ResolveOutcome::Resolved("https://example.com".to_string())
    );
}

#[tokio::test]
async fn test_resolve_sends_headers() {
    let server = MockServer::start().await;
    let request_id = rid();
    Mock::given(method("GET"))
        .and(path("/urls/abc"))
        .and(header("accept", "application/json"))
        .and(header("x-request-id", request_id.as_str()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "code": "abc", "long_url": "http://example.com/a" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let outcome = resolver(&server.uri()).resolve("abc", &request_id).await;

    assert!(matches!(outcome, ResolveOutcome::Resolved(_)));
    server.verify().await;
}

#[tokio::test]
async fn test_resolve_escapes_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/urls/a%2Fb%20c"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "code": "a/b c", "long_url": "https://example.com" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let base = format!("{}/", server.uri());
    let outcome = resolver(&base).resolve("a/b c", &rid()).await;

    assert!(matches!(outcome, ResolveOutcome::Resolved(_)));
    server.verify().await;
}

#[tokio::test]
async fn test_resolve_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such code"))
        .mount(&server)
        .await;

    let outcome = resolver(&server.uri()).resolve("missing", &rid()).await;

    assert_eq!(outcome, ResolveOutcome::NotFound);
}

#[tokio::test]
async fn test_resolve_rejects_non_http_destination() {
    for long_url in ["javascript:alert(1)", "data:text/html,hi", "/relative", "ftp://x.y", ""] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "code": "abc", "long_url": long_url })),
            )
            .mount(&server)
            .await;

        let outcome = resolver(&server.uri()).resolve("abc", &rid()).await;

        assert_eq!(
            outcome,
            ResolveOutcome::upstream_error(200, "invalid long_url from upstream"),
            "long_url {long_url:?} must not resolve"
        );
    }
}

#[tokio::test]
async fn test_resolve_rejects_scheme_without_slashes() {
    for long_url in ["http:/r/loop", "http:example.com", "https:/evil.example"] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "code": "abc", "long_url": long_url })),
            )
            .mount(&server)
            .await;

        let outcome = resolver(&server.uri()).resolve("abc", &rid()).await;

        assert_eq!(
            outcome,
            ResolveOutcome::upstream_error(200, "invalid long_url from upstream"),
            "long_url {long_url:?} must not resolve"
        );
    }
}

#[tokio::test]
async fn test_resolve_server_error_uses_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("  database unavailable \n"))
        .mount(&server)
        .await;

    let outcome = resolver(&server.uri()).resolve("abc", &rid()).await;

    assert_eq!(
        outcome,
        ResolveOutcome::upstream_error(500, "database unavailable")
    );
}

#[tokio::test]
async fn test_resolve_server_error_truncates_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("x".repeat(5000)))
        .mount(&server)
        .await;

    let outcome = resolver(&server.uri()).resolve("abc", &rid()).await;

    match outcome {
        ResolveOutcome::UpstreamError { status, message } => {
            assert_eq!(status, 502);
            assert_eq!(message.len(), 1024);
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_resolve_server_error_empty_body_uses_status_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let outcome = resolver(&server.uri()).resolve("abc", &rid()).await;

    assert_eq!(
        outcome,
        ResolveOutcome::upstream_error(503, "503 Service Unavailable")
    );
}

#[tokio::test]
async fn test_resolve_malformed_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let outcome = resolver(&server.uri()).resolve("abc", &rid()).await;

    assert!(matches!(
        outcome,
        ResolveOutcome::UpstreamError { status: 200, .. }
    ));
}

#[tokio::test]
async fn test_resolve_timeout_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "code": "abc", "long_url": "https://example.com" }))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let resolver = HttpUrlResolver::new(&server.uri(), Duration::from_millis(50)).unwrap();
    let outcome = resolver.resolve("abc", &rid()).await;

    assert!(matches!(
        outcome,
        ResolveOutcome::UpstreamError { status: 0, .. }
    ));
}

#[tokio::test]
async fn test_resolve_connection_refused_is_transport_error() {
    let outcome = resolver("http://127.0.0.1:1").resolve("abc", &rid()).await;

    match outcome {
        ResolveOutcome::UpstreamError { status, message } => {
            assert_eq!(status, 0);
            assert!(!message.is_empty());
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}
