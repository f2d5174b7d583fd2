//! Handler for short code redirects.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{error, info, warn};

use crate::domain::analytics_event::AnalyticsEvent;
use crate::domain::request_id::RequestId;
use crate::domain::resolve_outcome::ResolveOutcome;
use crate::error::AppError;
use crate::state::AppState;

/// Longest code accepted, in characters.
pub const MAX_CODE_LEN: usize = 64;

/// Redirects a short code to its destination URL.
///
/// # Endpoint
///
/// `GET|HEAD /r/{code}`
///
/// # Request Flow
///
/// 1. Reject methods other than GET/HEAD
/// 2. Trim and validate the code
/// 3. Resolve the code upstream (the only blocking step, bounded by the resolver timeout)
/// 4. Offer an analytics event to the dispatcher (never blocks; drops are logged)
/// 5. Return 302 Found
///
/// # Errors
///
/// - 405 for other methods
/// - 400 if the code is blank or longer than [`MAX_CODE_LEN`]
/// - 404 if the resolver does not know the code
/// - 502 if the resolver fails or returns an unusable destination
///
/// The analytics path never changes the response status.
pub async fn redirect_handler(
    method: Method,
    State(state): State<AppState>,
    request_id: RequestId,
    headers: HeaderMap,
    Path(code): Path<String>,
) -> Result<Response, AppError> {
    if method != Method::GET && method != Method::HEAD {
        return Err(AppError::MethodNotAllowed);
    }

    let code = code.trim();
    if code.is_empty() || code.chars().count() > MAX_CODE_LEN {
        return Err(AppError::InvalidCode);
    }

    let destination = match state.resolver.resolve(code, &request_id).await {
        ResolveOutcome::Resolved(destination) => destination,
        ResolveOutcome::NotFound => return Err(AppError::NotFound),
        ResolveOutcome::UpstreamError { status, message } => {
            error!(
                code = %code,
                status,
                error = %message,
                request_id = %request_id,
                "Resolve failed"
            );
            return Err(AppError::BadGateway);
        }
    };

    let location = HeaderValue::from_str(&destination).map_err(|_| {
        error!(code = %code, request_id = %request_id, "Destination is not a valid header value");
        AppError::BadGateway
    })?;

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok());

    let event = AnalyticsEvent::new(
        code.to_string(),
        chrono::Utc::now().timestamp(),
        user_agent,
        headers.get(header::REFERER).and_then(|v| v.to_str().ok()),
        Some(request_id.as_str()),
    );

    if !state.events.enqueue(event) {
        warn!(code = %code, request_id = %request_id, "Analytics queue full, event dropped");
    }

    info!(
        code = %code,
        destination = %destination,
        user_agent = user_agent.unwrap_or_default(),
        request_id = %request_id,
        "redirect"
    );

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// Handles `/r/` with no code segment.
pub async fn missing_code_handler(method: Method) -> AppError {
    if method != Method::GET && method != Method::HEAD {
        return AppError::MethodNotAllowed;
    }

    AppError::InvalidCode
}
