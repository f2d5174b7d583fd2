//! HTTP middleware wrapped around the handler chain.
//!
//! Provides correlation id propagation and observability middleware.

pub mod access_log;
pub mod http_metrics;
pub mod request_id;
pub mod tracing;
