//! Correlation id middleware and extractor.

use axum::{
    extract::{FromRequestParts, Request},
    http::{HeaderValue, request::Parts},
    middleware::Next,
    response::Response,
};
use std::convert::Infallible;

use crate::domain::request_id::{REQUEST_ID_HEADER, RequestId, assign_or_extract};

/// Assigns the request's correlation id and echoes it on the response.
///
/// The id is stored in request extensions for handlers and inner middleware
/// (see the [`RequestId`] extractor) and set as `X-Request-Id` on every
/// response, including errors and fallbacks.
///
/// Must be the outermost layer so that tracing spans and access logs see the id.
pub async fn layer(mut req: Request, next: Next) -> Response {
    let request_id = assign_or_extract(req.headers());
    req.extensions_mut().insert(request_id.clone());

    let mut response = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Extracts the id assigned by [`layer`].
///
/// Falls back to assigning one from the request headers when the middleware is
/// not installed (e.g. handlers mounted directly in tests).
impl<S> FromRequestParts<S> for RequestId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<RequestId>()
            .cloned()
            .unwrap_or_else(|| assign_or_extract(&parts.headers)))
    }
}
