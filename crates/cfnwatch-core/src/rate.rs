//! Process-wide pacing of calls against the orchestration service.
//!
//! Every watcher awaits [`RateLimiter::tick`] before each poll. The ticks
//! come from a single interval, so the aggregate call rate stays fixed no
//! matter how many stacks are being watched: with N watchers each one gets
//! roughly every N-th tick.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

/// Cheap-to-clone handle on one shared tick source.
#[derive(Clone)]
pub struct RateLimiter {
    interval: Arc<Mutex<Interval>>,
}

impl RateLimiter {
    /// Starts the tick source. The first tick fires one full `period` after
    /// creation.
    ///
    /// Must be called from inside a Tokio runtime. Panics if `period` is zero.
    pub fn new(period: Duration) -> Self {
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self {
            interval: Arc::new(Mutex::new(interval)),
        }
    }

    /// Waits for the next tick. Each tick is handed to exactly one waiter;
    /// waiters are served in the order they started waiting.
    pub async fn tick(&self) {
        let mut interval = self.interval.lock().await;
        interval.tick().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_tick_waits_one_period() {
        let limiter = RateLimiter::new(Duration::from_millis(550));
        let start = Instant::now();
        limiter.tick().await;
        assert_eq!(start.elapsed(), Duration::from_millis(550));
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_are_shared_between_consumers() {
        let limiter = RateLimiter::new(Duration::from_millis(100));
        let start = Instant::now();

        let mut handles = Vec::new();
        for _ in 0..4 {
            let limiter = limiter.clone();
            handles.push(tokio::spawn(async move {
                limiter.tick().await;
                Instant::now()
            }));
        }

        let mut finished = Vec::new();
        for h in handles {
            finished.push(h.await.unwrap() - start);
        }
        finished.sort();

        // Four consumers need four distinct ticks, not one tick each in parallel.
        assert_eq!(
            finished,
            vec![
                Duration::from_millis(100),
                Duration::from_millis(200),
                Duration::from_millis(300),
                Duration::from_millis(400),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn idle_limiter_does_not_burst() {
        let limiter = RateLimiter::new(Duration::from_millis(100));
        time::sleep(Duration::from_secs(5)).await;

        limiter.tick().await;
        let after_first = Instant::now();
        limiter.tick().await;
        assert_eq!(after_first.elapsed(), Duration::from_millis(100));
    }
}
