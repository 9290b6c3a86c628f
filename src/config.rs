//! Configuration consumed by the retry engine.

use std::time::Duration;

/// Attempt budget used when none is configured: run once, no retries.
pub const DEFAULT_MAX_ATTEMPTS: usize = 1;

/// Settings for a single retry run.
///
/// `max_attempts` counts total attempts (initial try + retries). A zero `timeout` disables
/// the per-attempt timeout; a zero `delay` retries immediately after a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total attempts, including the first one.
    pub max_attempts: usize,
    /// Pause after a failed attempt, before the next one starts.
    pub delay: Duration,
    /// Per-attempt timeout; `Duration::ZERO` means no timeout.
    pub timeout: Duration,
    /// Observe cancellation while the inter-attempt delay is running.
    pub cancel_during_delay: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: Duration::ZERO,
            timeout: Duration::ZERO,
            cancel_during_delay: false,
        }
    }
}

/// Problems detected by [`RetryConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The operation would never run.
    #[error("max_attempts must be > 0 (got 0); the operation will never run")]
    ZeroAttempts,
}

impl RetryConfig {
    /// Check the configuration. Runs never fail on an invalid config; a zero attempt budget
    /// just performs no iterations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        Ok(())
    }

    /// Whether the per-attempt timeout is active.
    pub fn has_timeout(&self) -> bool {
        !self.timeout.is_zero()
    }
}
