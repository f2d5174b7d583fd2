//! Client-visible error taxonomy for the redirect surface.
//!
//! Every variant maps to a status code and a short opaque token body.
//! Upstream details are logged at the failure site and never returned to the client.

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    /// Code missing, blank, or longer than the allowed length.
    #[error("invalid_code")]
    InvalidCode,

    /// Resolver reported the code as unknown, or no route matched.
    #[error("not_found")]
    NotFound,

    #[error("method_not_allowed")]
    MethodNotAllowed,

    /// Resolver failed, timed out, or returned an unusable destination.
    #[error("bad_gateway")]
    BadGateway,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidCode => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::BadGateway => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (
            self.status(),
            [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
                (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
            ],
            self.to_string(),
        )
            .into_response()
    }
}
