//! HTTP server initialization and runtime setup.
//!
//! Builds the upstream clients, metrics and analytics dispatcher, serves the
//! router, and runs the two-phase shutdown.

use crate::config::Config;
use crate::domain::event_dispatcher::EventDispatcher;
use crate::infrastructure::analytics::HttpAnalyticsSink;
use crate::infrastructure::metrics::HttpMetrics;
use crate::infrastructure::resolver::HttpUrlResolver;
use crate::lifecycle::{Shutdown, signals};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

/// Runs the HTTP server with the given configuration until SIGINT/SIGTERM.
///
/// Initializes:
/// - Prometheus metrics recorder
/// - Resolver and analytics HTTP clients (independent timeouts)
/// - Background analytics dispatcher
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - An HTTP client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let listener = TcpListener::bind(config.listen_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr()))?;
    info!("Listening on http://{}", listener.local_addr()?);

    serve(listener, config, signals::wait_for_signal()).await
}

/// Serves on an already-bound listener until `shutdown_signal` completes.
///
/// # Shutdown sequence
///
/// 1. Stop accepting connections and let in-flight requests finish, bounded by
///    the grace period
/// 2. Stop the analytics dispatcher, draining queued events, bounded by a
///    second grace period
/// 3. If the drain overruns, cancel the worker and return
///
/// # Errors
///
/// Returns an error if an HTTP client cannot be built or the server fails.
pub async fn serve<F>(listener: TcpListener, config: Config, shutdown_signal: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let metrics = HttpMetrics::new()?;

    let resolver = Arc::new(HttpUrlResolver::new(
        &config.url_service_base_url,
        config.resolve_timeout(),
    )?);

    let sink = Arc::new(HttpAnalyticsSink::new(
        &config.analytics_base_url,
        config.analytics_timeout(),
        metrics.clone(),
    )?);

    // Cuts the dispatcher short once the drain deadline passes.
    let cancel = Shutdown::new();
    let dispatcher = EventDispatcher::start(
        config.analytics_queue_size,
        sink,
        metrics.clone(),
        cancel.signal(),
    );

    let state = AppState::new(resolver, dispatcher.sender(), metrics);
    let app = app_router(state, config.request_timeout());

    let draining = Shutdown::new();
    let mut stop_accepting = draining.signal();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { stop_accepting.cancelled().await })
            .await
    });

    let grace = config.shutdown_grace();
    let mut server_result = Ok(());

    tokio::select! {
        joined = &mut server => {
            server_result = flatten(joined);
            if let Err(e) = &server_result {
                error!(error = %e, "HTTP server exited unexpectedly");
            }
        }
        _ = shutdown_signal => {
            info!("Shutdown signal received, draining in-flight requests");
            draining.trigger();

            match tokio::time::timeout(grace, &mut server).await {
                Ok(joined) => {
                    server_result = flatten(joined);
                    info!("HTTP server stopped");
                }
                Err(_) => {
                    warn!(
                        grace_secs = grace.as_secs(),
                        "Grace period elapsed with requests in flight"
                    );
                    server.abort();
                }
            }
        }
    }

    stop_dispatcher(&dispatcher, &cancel, grace).await;

    server_result
}

/// Drains the dispatcher, cancelling it if the drain exceeds `grace`.
async fn stop_dispatcher(dispatcher: &EventDispatcher, cancel: &Shutdown, grace: Duration) {
    if tokio::time::timeout(grace, dispatcher.stop()).await.is_err() {
        warn!(
            grace_secs = grace.as_secs(),
            "Analytics drain exceeded grace period, cancelling"
        );
        cancel.trigger();
        dispatcher.stop().await;
    }
}

fn flatten(
    joined: std::result::Result<std::io::Result<()>, tokio::task::JoinError>,
) -> Result<()> {
    joined
        .context("HTTP server task failed")?
        .context("HTTP server error")
}
