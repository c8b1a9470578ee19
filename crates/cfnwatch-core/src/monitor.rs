//! Supervision of the watcher tree.
//!
//! ```text
//! Monitor::watch(root) ──► StackWatcher(root) ──► tick / poll / emit
//!                                │
//!                                └─ nested stack event ──► StackWatcher(child) ──► ...
//!
//! every watcher ── Fatal ──► fatal channel ──► Monitor::run_until() ──► cancel + join
//! ```
//!
//! All watchers share one [`WatchContext`]: the service, the output, the
//! rate limiter, the admission registry, a cancellation token and a task
//! tracker that lets shutdown wait for every spawned watcher.

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, error, info};

use crate::config::WatchConfig;
use crate::error::WatchError;
use crate::rate::RateLimiter;
use crate::registry::AdmissionRegistry;
use crate::sink::EventSink;
use crate::source::EventSource;
use crate::watcher::StackWatcher;
use crate::Result;

// ---------------------------------------------------------------------------
// WatchContext
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub(crate) struct WatchContext {
    pub(crate) source: Arc<dyn EventSource>,
    pub(crate) sink: Arc<dyn EventSink>,
    pub(crate) limiter: RateLimiter,
    pub(crate) registry: AdmissionRegistry,
    pub(crate) cancel: CancellationToken,
    pub(crate) tracker: TaskTracker,
    fatal_tx: mpsc::UnboundedSender<WatchError>,
}

impl WatchContext {
    /// Starts a watcher for `stack` on its own task. Returns immediately;
    /// admission is decided inside the new task.
    pub(crate) fn spawn_watcher(&self, stack: String, cursor: DateTime<Utc>) {
        debug!(stack = %stack, cursor = %cursor, "spawning watcher");
        let watcher = StackWatcher::new(stack, cursor, self.clone());
        let fatal_tx = self.fatal_tx.clone();
        self.tracker.spawn(async move {
            if let Err(e) = watcher.run().await {
                let _ = fatal_tx.send(e);
            }
        });
    }
}

// ---------------------------------------------------------------------------
// Monitor
// ---------------------------------------------------------------------------

/// Owner of one watcher tree rooted at a single stack.
pub struct Monitor {
    config: WatchConfig,
    pub(crate) ctx: WatchContext,
    fatal_rx: mpsc::UnboundedReceiver<WatchError>,
}

enum Exit {
    Fatal(WatchError),
    Drained,
    Shutdown,
}

impl Monitor {
    /// Must be called from inside a Tokio runtime: the rate limiter starts
    /// ticking immediately.
    pub fn new(config: WatchConfig, source: Arc<dyn EventSource>, sink: Arc<dyn EventSink>) -> Self {
        let (fatal_tx, fatal_rx) = mpsc::unbounded_channel();
        let ctx = WatchContext {
            source,
            sink,
            limiter: RateLimiter::new(config.poll_interval()),
            registry: AdmissionRegistry::new(),
            cancel: CancellationToken::new(),
            tracker: TaskTracker::new(),
            fatal_tx,
        };
        Self {
            config,
            ctx,
            fatal_rx,
        }
    }

    pub fn config(&self) -> &WatchConfig {
        &self.config
    }

    pub fn registry(&self) -> &AdmissionRegistry {
        &self.ctx.registry
    }

    /// Token that stops every watcher when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.ctx.cancel.clone()
    }

    /// Starts watching `stack`, showing events from the configured look-back
    /// window onwards.
    pub fn watch(&self, stack: impl Into<String>) {
        let cursor = self.config.initial_cursor(Utc::now());
        self.watch_from(stack, cursor);
    }

    /// Starts watching `stack`, showing only events strictly after `cursor`.
    pub fn watch_from(&self, stack: impl Into<String>, cursor: DateTime<Utc>) {
        self.ctx.spawn_watcher(stack.into(), cursor);
    }

    /// Drives the watchers until `shutdown` resolves, a watcher hits a fatal
    /// error, or no watcher is left running. Every watcher has stopped by the
    /// time this returns.
    pub async fn run_until<F>(mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let tracker = self.ctx.tracker.clone();
        tracker.close();

        let exit = tokio::select! {
            biased;
            Some(err) = self.fatal_rx.recv() => Exit::Fatal(err),
            _ = tracker.wait() => Exit::Drained,
            _ = shutdown => Exit::Shutdown,
        };

        let outcome = match exit {
            Exit::Fatal(err) => {
                error!(error = %err, "fatal error, stopping all watchers");
                Err(err)
            }
            // A watcher that died fatally has already queued its error.
            Exit::Drained => match self.fatal_rx.try_recv() {
                Ok(err) => Err(err),
                Err(_) => {
                    debug!("no watchers left");
                    Ok(())
                }
            },
            Exit::Shutdown => {
                info!(watched = self.ctx.registry.len(), "shutting down");
                Ok(())
            }
        };

        self.ctx.cancel.cancel();
        tracker.wait().await;
        outcome
    }
}
