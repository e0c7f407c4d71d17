//! Simulated host clocks for tests.

use std::sync::Mutex;

use chrono::{DateTime, Local, TimeDelta};
use clockface_proto::ports::clock::ClockSource;
use tokio::time::Instant;

/// Clock that follows tokio's time source, starting from a chosen wall time.
///
/// Under a paused runtime (`#[tokio::test(start_paused = true)]`) the reading
/// only moves when the test calls [`tokio::time::advance`], which keeps the
/// displayed time in lock-step with the refresh timer.
#[derive(Debug)]
pub struct PausedClock {
    origin:  DateTime<Local>,
    started: Instant,
}

impl PausedClock {
    pub fn new(origin: DateTime<Local>) -> Self {
        Self {
            origin,
            started: Instant::now(),
        }
    }
}

impl ClockSource for PausedClock {
    fn now(&self) -> DateTime<Local> {
        TimeDelta::from_std(self.started.elapsed())
            .ok()
            .and_then(|elapsed| self.origin.checked_add_signed(elapsed))
            .unwrap_or(self.origin)
    }

    fn name(&self) -> &str {
        "paused"
    }
}

/// Clock frozen at a settable instant.
#[derive(Debug)]
pub struct FixedClock {
    time: Mutex<DateTime<Local>>,
}

impl FixedClock {
    pub fn new(time: DateTime<Local>) -> Self {
        Self {
            time: Mutex::new(time),
        }
    }

    pub fn set(&self, time: DateTime<Local>) {
        *self.time.lock().expect("poisoned fixed clock lock") = time;
    }
}

impl ClockSource for FixedClock {
    fn now(&self) -> DateTime<Local> {
        *self.time.lock().expect("poisoned fixed clock lock")
    }

    fn name(&self) -> &str {
        "fixed"
    }
}
