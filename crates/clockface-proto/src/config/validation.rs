use super::Config;

/// Errors returned when validating a [`Config`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigValidationError {
    /// The clock would never tick.
    #[error("clock tick interval must be greater than zero")]
    ZeroTickInterval,

    /// The log level string is blank.
    #[error("log level must not be empty")]
    EmptyLogLevel,
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigValidationError`] if the clock period is zero or the log
    /// level is blank.
    ///
    /// # Examples
    ///
    /// ```
    /// use clockface_proto::config::Config;
    ///
    /// let config = Config::default();
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.clock.tick_interval_ms == 0 {
            return Err(ConfigValidationError::ZeroTickInterval);
        }

        if self.log_level.trim().is_empty() {
            return Err(ConfigValidationError::EmptyLogLevel);
        }

        Ok(())
    }
}
