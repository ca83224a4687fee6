//! Timeout and poll-cadence configuration.
//!
//! One `RetryConfig` value is threaded into wait specs and the driver
//! rather than living in process-wide constants, so tests (and callers
//! with different SLAs) can use short timeouts.

use std::env;
use std::time::Duration;

/// Timing for remote operations and status polling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Deadline for an operation's side effects to converge
    pub timeout: Duration,
    /// Shorter deadline used for teardown waits
    pub delete_timeout: Duration,
    /// Upper bound on the pause between status polls
    pub poll_interval: Duration,
    /// Lower bound on the pause between status polls
    pub min_poll_interval: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        // The provider's historical defaults: bare-metal provisioning is
        // slow, teardown less so.
        Self {
            timeout: Duration::from_secs(100 * 60),
            delete_timeout: Duration::from_secs(15 * 60),
            poll_interval: Duration::from_secs(5),
            min_poll_interval: Duration::from_secs(3),
        }
    }
}

impl RetryConfig {
    /// Load timing overrides from environment variables, falling back to
    /// the defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            timeout: env_secs("CONVERGE_TIMEOUT_SECS", defaults.timeout)?,
            delete_timeout: env_secs("CONVERGE_DELETE_TIMEOUT_SECS", defaults.delete_timeout)?,
            poll_interval: env_secs("CONVERGE_POLL_INTERVAL_SECS", defaults.poll_interval)?,
            min_poll_interval: env_secs(
                "CONVERGE_MIN_POLL_INTERVAL_SECS",
                defaults.min_poll_interval,
            )?,
        })
    }
}

fn env_secs(var: &'static str, default: Duration) -> Result<Duration, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::InvalidDuration { var, value: raw }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a whole number of seconds, got '{value}'")]
    InvalidDuration { var: &'static str, value: String },
}
