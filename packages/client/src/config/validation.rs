//! Configuration validation

use std::time::Duration;

use super::core::{HttpConfig, WorkerConfig};

/// Configuration validation result type
pub type ConfigResult<T> = Result<T, ConfigurationError>;

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Invalid timeout value: {0}")]
    InvalidTimeout(String),

    #[error("Invalid configuration parameter: {0}")]
    InvalidParameter(String),
}

/// Configuration validation trait
pub trait Validator {
    /// Validates the configuration settings
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` variant if any validation fails.
    fn validate(&self) -> ConfigResult<()>;
}

/// Largest timeout accepted by validation.
pub const MAX_TIMEOUT: Duration = Duration::from_secs(3600);

/// Validate timeout duration
///
/// # Errors
///
/// Returns `ConfigurationError::InvalidTimeout` if the duration is zero or
/// exceeds 1 hour.
pub fn validate_timeout(timeout: Duration, name: &str) -> ConfigResult<()> {
    if timeout.is_zero() {
        return Err(ConfigurationError::InvalidTimeout(format!(
            "{name} cannot be zero"
        )));
    }

    if timeout > MAX_TIMEOUT {
        return Err(ConfigurationError::InvalidTimeout(format!(
            "{name} cannot exceed 1 hour"
        )));
    }

    Ok(())
}

impl Validator for HttpConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_timeout(self.timeout, "timeout")
    }
}

impl Validator for WorkerConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_workers == 0 {
            return Err(ConfigurationError::InvalidParameter(
                "max_workers must be greater than zero".to_string(),
            ));
        }
        if let Some(timeout) = self.connect_timeout {
            validate_timeout(timeout, "connect_timeout")?;
        }
        if self.user_agent.is_empty() {
            return Err(ConfigurationError::InvalidParameter(
                "user_agent cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
