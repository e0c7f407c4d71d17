use chrono::{DateTime, Local};
use clockface_proto::ports::clock::ClockSource;

/// Wall clock of the host in its local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    fn name(&self) -> &str {
        "system"
    }
}
