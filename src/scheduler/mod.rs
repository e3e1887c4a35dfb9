//! Processing scheduler
//!
//! Opaque handle that owns the tick cadence for stream processing. The
//! splitters register their periodic processing with it at construction;
//! the endpoint aborts the returned handles at shutdown. The core passes the
//! scheduler through without inspecting it further.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Default tick cadence: one 20 ms audio frame period
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(20);

/// Handle to the periodic processing driver
#[derive(Debug, Clone)]
pub struct Scheduler {
    tick_interval: Duration,
}

impl Scheduler {
    /// Create a scheduler with the given tick cadence
    pub fn new(tick_interval: Duration) -> Self {
        Self { tick_interval }
    }

    /// The configured tick cadence
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Spawn a task running `tick` once per interval until aborted.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_periodic<F, Fut>(&self, mut tick: F) -> JoinHandle<()>
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let interval = self.tick_interval;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                tick().await;
            }
        })
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_default_cadence() {
        let scheduler = Scheduler::default();
        assert_eq!(scheduler.tick_interval(), Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_periodic_task_ticks_until_aborted() {
        let scheduler = Scheduler::new(Duration::from_millis(5));
        let ticks = Arc::new(AtomicU32::new(0));

        let handle = scheduler.spawn_periodic({
            let ticks = Arc::clone(&ticks);
            move || {
                let ticks = Arc::clone(&ticks);
                async move {
                    ticks.fetch_add(1, Ordering::Relaxed);
                }
            }
        });

        tokio::time::sleep(Duration::from_millis(30)).await;
        handle.abort();

        // Let any in-flight tick finish before sampling
        tokio::time::sleep(Duration::from_millis(10)).await;
        let seen = ticks.load(Ordering::Relaxed);
        assert!(seen >= 2, "expected at least 2 ticks, saw {}", seen);

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(ticks.load(Ordering::Relaxed), seen);
    }
}
