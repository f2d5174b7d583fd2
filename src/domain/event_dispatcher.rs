//! Bounded, single-consumer pipeline that forwards analytics events off the request path.
//!
//! # Lifecycle
//!
//! ```text
//! start() → Running ─stop()→ Draining ─queue empty→ Stopped
//!                              └─ shutdown signal ─→ Stopped (remaining events abandoned)
//! ```
//!
//! Producers hold an [`EventSender`] and call [`EventSender::enqueue`], which never
//! waits: a full (or closed) queue rejects the event and counts the drop.
//! One worker task receives events in FIFO order and hands each to an
//! [`AnalyticsSink`]. [`EventDispatcher::stop`] closes the queue and waits for the
//! worker to deliver everything already accepted. A triggered [`ShutdownSignal`]
//! preempts the worker, including a post that is still in flight.

use std::sync::Arc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{Mutex, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::domain::analytics_event::AnalyticsEvent;
use crate::infrastructure::analytics::AnalyticsSink;
use crate::infrastructure::metrics::HttpMetrics;
use crate::lifecycle::ShutdownSignal;

/// Producer handle for the dispatch queue. Cheap to clone.
#[derive(Clone)]
pub struct EventSender {
    tx: mpsc::Sender<AnalyticsEvent>,
    metrics: HttpMetrics,
}

impl EventSender {
    /// Attempts to queue `event` without waiting.
    ///
    /// Returns `false` if the queue is at capacity or the dispatcher has been
    /// stopped. The event is discarded and the drop is counted; the caller is
    /// expected to log it.
    pub fn enqueue(&self, event: AnalyticsEvent) -> bool {
        match self.tx.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) | Err(TrySendError::Closed(_)) => {
                self.metrics.event_dropped();
                false
            }
        }
    }

    /// Returns `true` once the dispatcher no longer accepts events.
    #[cfg(test)]
    pub(crate) fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    /// Fixed queue capacity.
    #[cfg(test)]
    pub(crate) fn max_capacity(&self) -> usize {
        self.tx.max_capacity()
    }
}

/// Owner of the dispatch queue and its background worker.
pub struct EventDispatcher {
    sender: EventSender,
    stop_tx: watch::Sender<bool>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl EventDispatcher {
    /// Creates the queue and spawns exactly one worker task.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn start(
        capacity: usize,
        sink: Arc<dyn AnalyticsSink>,
        metrics: HttpMetrics,
        shutdown: ShutdownSignal,
    ) -> Self {
        let (tx, rx) = mpsc::channel(capacity);
        let (stop_tx, stop_rx) = watch::channel(false);

        let worker = tokio::spawn(run_worker(rx, sink, stop_rx, shutdown));
        info!(capacity, "Analytics dispatcher started");

        Self {
            sender: EventSender { tx, metrics },
            stop_tx,
            worker: Mutex::new(Some(worker)),
        }
    }

    /// Returns a producer handle for request handlers.
    pub fn sender(&self) -> EventSender {
        self.sender.clone()
    }

    /// Stops accepting events and waits for the worker to finish.
    ///
    /// Every event accepted before this call is delivered first, unless the
    /// shutdown signal cuts the drain short. Calling `stop` again, or
    /// concurrently, is a no-op that returns once the worker has exited.
    /// Cancel-safe: dropping the returned future leaves the worker running,
    /// and a later call resumes waiting on it.
    pub async fn stop(&self) {
        self.stop_tx.send_replace(true);

        let mut worker = self.worker.lock().await;
        if let Some(handle) = worker.as_mut() {
            if let Err(e) = handle.await {
                error!(error = %e, "Analytics dispatcher worker panicked");
            }
            *worker = None;
            info!("Analytics dispatcher stopped");
        }
    }
}

async fn run_worker(
    mut rx: mpsc::Receiver<AnalyticsEvent>,
    sink: Arc<dyn AnalyticsSink>,
    mut stop_rx: watch::Receiver<bool>,
    mut shutdown: ShutdownSignal,
) {
    let mut draining = false;

    loop {
        let next = tokio::select! {
            biased;
            _ = shutdown.cancelled() => {
                warn!("Analytics dispatcher cancelled");
                return;
            }
            _ = stop_rx.changed(), if !draining => {
                // Reject new events; anything already buffered is still received below.
                rx.close();
                draining = true;
                debug!("Analytics dispatcher draining");
                continue;
            }
            event = rx.recv() => event,
        };

        let Some(event) = next else {
            return;
        };

        tokio::select! {
            biased;
            _ = shutdown.cancelled() => {
                warn!("Analytics dispatcher cancelled mid-delivery");
                return;
            }
            _ = sink.post(event) => {}
        }
    }
}
