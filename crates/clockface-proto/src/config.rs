use std::time::Duration;

use serde::Deserialize;

mod validation;

pub use validation::ConfigValidationError;

pub const DEFAULT_CONFIG_FILE_PATH: &str = "~/.config/clockface/config.toml";

/// Refresh period used when the config does not override it.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ClockModuleConfig {
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl ClockModuleConfig {
    /// Refresh period of the clock timer.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Default for ClockModuleConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

fn default_tick_interval_ms() -> u64 {
    DEFAULT_TICK_INTERVAL_MS
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub clock: ClockModuleConfig,
}

fn default_log_level() -> String {
    "warn".to_owned()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            clock: ClockModuleConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config: Config = toml::from_str("").expect("parse empty config");
        assert_eq!(config, Config::default());
        assert_eq!(config.clock.tick_interval(), Duration::from_secs(1));
    }

    #[test]
    fn parses_log_level_and_clock_section() {
        let config: Config = toml::from_str(
            r#"
            log_level = "debug"

            [clock]
            tick_interval_ms = 250
            "#,
        )
        .expect("parse config");

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.clock.tick_interval(), Duration::from_millis(250));
    }

    #[test]
    fn clock_section_without_interval_keeps_default() {
        let config: Config = toml::from_str("[clock]\n").expect("parse config");
        assert_eq!(config.clock.tick_interval_ms, DEFAULT_TICK_INTERVAL_MS);
    }
}
