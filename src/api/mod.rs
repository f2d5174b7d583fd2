//! HTTP layer for request/response handling.
//!
//! This layer translates inbound requests into resolver lookups and analytics
//! events, and formats responses according to the public contract.
//!
//! # Modules
//!
//! - [`dto`] - Response bodies for the JSON endpoints
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Correlation id and observability middleware

pub mod dto;
pub mod handlers;
pub mod middleware;
