//! # Redirect Service
//!
//! An HTTP edge service that resolves short codes through an upstream
//! url-service and answers with a `302` redirect, while recording a usage event
//! for every redirect through a bounded, load-shedding background pipeline.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Request identity, resolve outcomes, analytics events
//!   and the event dispatcher
//! - **Infrastructure Layer** ([`infrastructure`]) - Upstream HTTP clients and metrics
//! - **API Layer** ([`api`]) - Handlers, DTOs and middleware
//! - **Lifecycle** ([`lifecycle`]) - Signals and shutdown coordination
//!
//! ## Guarantees
//!
//! - The resolver call is the only step that can delay a redirect, and it is
//!   bounded by its own timeout
//! - Enqueuing an analytics event never blocks; a full queue drops the event
//!   and counts the drop
//! - Analytics failures never change the status of a redirect response
//! - On shutdown, queued events are delivered before exit unless the drain
//!   deadline passes
//!
//! ## Quick Start
//!
//! ```bash
//! export URL_SERVICE_BASE_URL="http://localhost:3000"
//! export ANALYTICS_SERVICE_BASE_URL="http://localhost:8000"
//! cargo run
//! curl -i http://localhost:8080/r/abc
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod lifecycle;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::domain::analytics_event::AnalyticsEvent;
    pub use crate::domain::event_dispatcher::{EventDispatcher, EventSender};
    pub use crate::domain::request_id::{REQUEST_ID_HEADER, RequestId};
    pub use crate::domain::resolve_outcome::ResolveOutcome;
    pub use crate::error::AppError;
    pub use crate::infrastructure::analytics::{AnalyticsSink, HttpAnalyticsSink};
    pub use crate::infrastructure::metrics::HttpMetrics;
    pub use crate::infrastructure::resolver::{HttpUrlResolver, UrlResolver};
    pub use crate::lifecycle::Shutdown;
    pub use crate::state::AppState;
}
