use std::fmt::Write;

use chrono::{DateTime, Local};

/// Locale-style time of day, e.g. `3:04:05 PM`.
pub const TIME_OF_DAY_FORMAT: &str = "%-I:%M:%S %p";

/// Host clock facility consumed by the clock component.
///
/// Implementations must be cheap to call: the refresh timer reads the clock
/// once per tick from a background task.
pub trait ClockSource: Send + Sync {
    /// Current point in time according to this clock.
    fn now(&self) -> DateTime<Local>;

    /// Format `time` as a locale time-of-day string.
    ///
    /// Falls back to the raw Unix timestamp when the formatter fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{Local, TimeZone};
    /// use clockface_proto::ports::clock::ClockSource;
    ///
    /// struct Fixed;
    ///
    /// impl ClockSource for Fixed {
    ///     fn now(&self) -> chrono::DateTime<Local> {
    ///         Local.with_ymd_and_hms(2024, 5, 1, 15, 4, 5).unwrap()
    ///     }
    /// }
    ///
    /// assert_eq!(Fixed.format_time_of_day(Fixed.now()), "3:04:05 PM");
    /// ```
    fn format_time_of_day(&self, time: DateTime<Local>) -> String {
        format_time_of_day(time)
    }

    /// Identifier used in log messages.
    fn name(&self) -> &str {
        "clock"
    }
}

/// Free-standing formatter shared by every [`ClockSource`].
pub fn format_time_of_day(time: DateTime<Local>) -> String {
    let mut rendered = String::new();

    match write!(rendered, "{}", time.format(TIME_OF_DAY_FORMAT)) {
        Ok(()) => rendered,
        Err(_) => time.timestamp().to_string(),
    }
}
