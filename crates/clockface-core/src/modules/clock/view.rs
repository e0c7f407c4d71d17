use chrono::{DateTime, Local};
use clockface_proto::ports::clock::ClockSource;

/// Fixed first line of the clock.
pub const GREETING: &str = "Hello, world!";

/// Text produced by one render of the clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockView {
    pub greeting:  &'static str,
    pub time_line: String,
}

impl ClockView {
    /// Render `time` with the formatter of `source`.
    pub fn render(time: DateTime<Local>, source: &dyn ClockSource) -> Self {
        Self {
            greeting:  GREETING,
            time_line: format!("The time now is {}.", source.format_time_of_day(time)),
        }
    }

    pub fn lines(&self) -> [&str; 2] {
        [self.greeting, &self.time_line]
    }
}
