use std::time::Duration;

/// How often the host drains the event bus.
///
/// Polls at the `active` rate while events keep arriving and backs off to the
/// `idle` rate after `idle_after` consecutive empty drains.
#[derive(Debug, Clone)]
pub(super) struct PollCadence {
    active:      Duration,
    idle:        Duration,
    idle_after:  u8,
    empty_polls: u8,
}

impl PollCadence {
    pub(super) fn new(active: Duration, idle: Duration, idle_after: u8) -> Self {
        Self {
            active,
            idle,
            idle_after,
            empty_polls: 0,
        }
    }

    pub(super) fn interval(&self) -> Duration {
        if self.empty_polls >= self.idle_after {
            self.idle
        } else {
            self.active
        }
    }

    pub(super) fn record_events(&mut self) {
        self.empty_polls = 0;
    }

    pub(super) fn record_empty(&mut self) {
        self.empty_polls = self.empty_polls.saturating_add(1).min(self.idle_after);
    }
}

impl Default for PollCadence {
    fn default() -> Self {
        Self::new(Duration::from_millis(16), Duration::from_millis(100), 3)
    }
}
