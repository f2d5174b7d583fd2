//! Catch-all for unknown paths.

use crate::error::AppError;

/// Returns an opaque 404 for any unmatched route.
pub async fn fallback_handler() -> AppError {
    AppError::NotFound
}
