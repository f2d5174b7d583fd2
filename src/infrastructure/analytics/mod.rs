//! Delivery of usage events to the analytics collector.
//!
//! Provides an [`AnalyticsSink`] trait with one production implementation:
//! - [`HttpAnalyticsSink`] - Posts events to the collector's `POST /events` endpoint

mod http_sink;
mod service;

pub use http_sink::{DEFAULT_ANALYTICS_TIMEOUT, HttpAnalyticsSink};
pub use service::AnalyticsSink;
