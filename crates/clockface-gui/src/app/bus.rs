use std::sync::{Arc, Mutex};

use clockface_core::event_bus::{BusEvent, EventReceiver};
use log::error;

/// Events pulled from the bus in one drain.
#[derive(Debug, Clone, Default)]
pub struct BusFlushOutcome {
    events:    Vec<BusEvent>,
    had_error: bool,
}

impl BusFlushOutcome {
    pub(super) fn failed() -> Self {
        Self {
            events:    Vec::new(),
            had_error: true,
        }
    }

    pub(super) fn had_error(&self) -> bool {
        self.had_error
    }

    pub(super) fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub(super) fn into_events(self) -> Vec<BusEvent> {
        self.events
    }
}

/// Pop every queued event, stopping at the first read failure.
pub(super) async fn drain_bus(receiver: Arc<Mutex<EventReceiver>>) -> BusFlushOutcome {
    let Ok(mut guard) = receiver.lock() else {
        error!("event bus receiver poisoned");
        return BusFlushOutcome::failed();
    };

    let mut outcome = BusFlushOutcome::default();

    loop {
        match guard.try_recv() {
            Ok(Some(event)) => outcome.events.push(event),
            Ok(None) => return outcome,
            Err(err) => {
                error!("failed to read event bus payload: {err}");
                outcome.had_error = true;
                return outcome;
            }
        }
    }
}
