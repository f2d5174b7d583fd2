//! Infrastructure layer for external integrations.
//!
//! This layer implements the interfaces the domain and API layers depend on,
//! providing concrete HTTP clients for the upstream services and the
//! Prometheus metrics recorder.
//!
//! # Modules
//!
//! - [`resolver`] - Short code lookup against the url-service
//! - [`analytics`] - Event delivery to the analytics collector
//! - [`metrics`] - Request and pipeline metrics
//! - [`upstream`] - Shared helpers for upstream responses

pub mod analytics;
pub mod metrics;
pub mod resolver;
pub mod upstream;
