use std::time::Duration;

use log::debug;
use tokio::{
    runtime::Handle,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval_at},
};

/// Recurring callback owned by a mounted clock.
///
/// The first tick fires one full `period` after [`start`](RefreshTimer::start).
/// Dropping the timer cancels it, so a clock torn down without an explicit
/// unmount never leaves a task firing behind it.
#[derive(Debug)]
pub struct RefreshTimer {
    period: Duration,
    task:   Option<JoinHandle<()>>,
}

impl RefreshTimer {
    /// Spawn the ticking task on `handle`.
    ///
    /// `period` must be non-zero.
    pub fn start<F>(handle: &Handle, period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let first_tick = Instant::now() + period;

        let task = handle.spawn(async move {
            let mut ticker = interval_at(first_tick, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                on_tick();
            }
        });

        debug!("Refresh timer started with period {period:?}");

        Self {
            period,
            task: Some(task),
        }
    }

    /// Whether the ticking task is still scheduled.
    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Abort the ticking task. Calling this more than once is a no-op.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("Refresh timer with period {:?} cancelled", self.period);
        }
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
