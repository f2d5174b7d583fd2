//! HTTP request handlers.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod fallback;
pub mod health;
pub mod metrics;
pub mod redirect;

pub use fallback::fallback_handler;
pub use health::{health_handler, ready_handler};
pub use metrics::metrics_handler;
pub use redirect::{missing_code_handler, redirect_handler};
