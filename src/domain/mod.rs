//! Domain layer: request identity, resolve outcomes and the analytics pipeline.
//!
//! # Modules
//!
//! - [`request_id`] - Correlation id assignment
//! - [`resolve_outcome`] - Three-way result of an upstream lookup
//! - [`analytics_event`] - Usage event model
//! - [`event_dispatcher`] - Bounded queue and background delivery worker
//!
//! # Event Flow
//!
//! 1. Redirect handler resolves a code
//! 2. [`analytics_event::AnalyticsEvent`] is offered to the queue (non-blocking)
//! 3. The [`event_dispatcher::EventDispatcher`] worker posts it to the collector
//! 4. On shutdown, the queue is closed and drained before the process exits

pub mod analytics_event;
pub mod event_dispatcher;
pub mod request_id;
pub mod resolve_outcome;
