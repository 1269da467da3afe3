// ABOUTME: Scoped repeating timer for the waiting phase.
// ABOUTME: The background task is aborted when the handle is dropped.

use std::ops::ControlFlow;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Shortest period a ticker runs at.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Calls `on_tick` every `period` until it breaks or the handle is dropped.
pub struct WaitTicker {
    handle: JoinHandle<()>,
}

impl WaitTicker {
    /// First call happens one full `period` after spawning. A zero period
    /// is raised to [`MIN_PERIOD`].
    pub fn spawn<F>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() -> ControlFlow<()> + Send + 'static,
    {
        let period = period.max(MIN_PERIOD);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if on_tick().is_break() {
                    break;
                }
            }
        });
        Self { handle }
    }
}

impl Drop for WaitTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
