//! The per-stack polling loop.
//!
//! ```text
//! run()
//!   ├─ empty id / already admitted ─► return Ok
//!   └─ loop {
//!        ├─ wait for shared tick          (cancellable)
//!        ├─ list events, newest first     (cancellable)
//!        │    ├─ Recoverable ─► warn, next tick
//!        │    └─ Fatal       ─► return Err
//!        └─ oldest first: skip ts <= cursor, advance cursor,
//!           spawn child for nested stacks, emit
//!      }
//! ```

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, trace, warn};

use crate::error::WatchError;
use crate::monitor::WatchContext;
use crate::types::StackEvent;
use crate::Result;

pub struct StackWatcher {
    stack: String,
    /// Timestamp of the newest event already processed for this stack.
    cursor: DateTime<Utc>,
    ctx: WatchContext,
}

impl StackWatcher {
    pub(crate) fn new(stack: String, cursor: DateTime<Utc>, ctx: WatchContext) -> Self {
        Self { stack, cursor, ctx }
    }

    pub fn cursor(&self) -> DateTime<Utc> {
        self.cursor
    }

    /// Claims the stack and polls it until cancelled. Returns `Ok` right away
    /// when the identifier is empty or another watcher already owns it.
    pub async fn run(mut self) -> Result<()> {
        if self.stack.is_empty() {
            debug!("ignoring empty stack identifier");
            return Ok(());
        }
        if !self.ctx.registry.try_admit(&self.stack) {
            debug!(stack = %self.stack, "stack already watched");
            return Ok(());
        }

        info!(stack = %self.stack, cursor = %self.cursor, "watching stack");
        self.ctx.sink.watching(&self.stack);

        let cancel = self.ctx.cancel.clone();
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = self.ctx.limiter.tick() => {}
            }

            let polled = tokio::select! {
                _ = cancel.cancelled() => break,
                polled = self.poll_once() => polled,
            };

            match polled {
                Ok(emitted) => trace!(stack = %self.stack, emitted, "poll complete"),
                Err(WatchError::Recoverable { code, message }) => {
                    warn!(stack = %self.stack, code = %code, "describe stack events failed: {message}");
                }
                Err(fatal) => {
                    error!(stack = %self.stack, error = %fatal, "watcher stopped");
                    return Err(fatal);
                }
            }
        }

        debug!(stack = %self.stack, "watcher cancelled");
        Ok(())
    }

    /// One fetch-and-process round, without waiting for the rate limiter.
    /// Returns how many events were emitted.
    pub async fn poll_once(&mut self) -> Result<usize> {
        let page = self.ctx.source.list_events(&self.stack).await?;
        Ok(self.process_page(page))
    }

    /// Processes a page given newest first. Only events strictly newer than
    /// the cursor are emitted; an event sharing the cursor's timestamp counts
    /// as already seen.
    pub(crate) fn process_page(&mut self, page: Vec<StackEvent>) -> usize {
        let mut emitted = 0;
        for event in page.into_iter().rev() {
            if event.timestamp <= self.cursor {
                continue;
            }
            self.cursor = event.timestamp;

            if event.is_nested_stack()
                && !event.is_own_stack()
                && event.physical_resource_id != self.stack
            {
                self.ctx
                    .spawn_watcher(event.physical_resource_id.clone(), self.cursor);
            }

            self.ctx.sink.emit(&self.stack, &event);
            emitted += 1;
        }
        emitted
    }
}
