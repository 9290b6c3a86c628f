//! Retry builder and execution engine
//!
//! Runs a fallible operation up to `max_attempts` times, racing every attempt against a
//! per-attempt timeout and a cancellation signal.
//!
//! Semantics:
//! - `max_attempts` counts total attempts (initial try + retries); the default is one attempt.
//! - Each attempt runs on its own task. The race picks, in priority order: cancellation,
//!   the attempt's result, the timeout.
//! - Success ends the run immediately, whatever happened in earlier attempts.
//! - Every failed attempt is followed by the fixed delay, the final one included. No delay
//!   follows a timed-out attempt.
//! - Cancellation ends the run with [`RetryError::Cancelled`]. The in-flight attempt is
//!   abandoned, not interrupted.
//! - The delay is not raced against cancellation unless `cancel_during_delay(true)` is set; a
//!   cancellation that lands during the delay is seen when the next attempt begins, and that
//!   attempt counts towards `retry_count` even though the operation is not launched again.
//!
//! Invariants:
//! - Attempts never exceed `max_attempts`; they run strictly one after another.
//! - `retry_count == attempts - 1` whenever at least one attempt began.
//!
//! Example
//! ```rust
//! use std::time::Duration;
//! use retryable::retry;
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("backend unavailable")]
//! struct Unavailable;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let stats = retry(|| async { Err::<(), _>(Unavailable) })
//!     .with_max_attempts(3)
//!     .with_delay(Duration::from_millis(1))
//!     .with_timeout(Duration::from_secs(5))
//!     .run()
//!     .await;
//!
//! assert_eq!(stats.retry_count, 2);
//! assert!(stats.error.unwrap().is_inner());
//! # });
//! ```

use crate::attempt::Operation;
use crate::{
    AttemptTimeout, CancelHandle, RetryConfig, RetryError, Sleeper, Stats, TokioSleeper,
};
use futures::FutureExt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Build a retry run for an async operation.
pub fn retry<E, F, Fut>(operation: F) -> Retryable<E>
where
    E: std::error::Error + Send + Sync + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), E>> + Send + 'static,
{
    Retryable::new(Operation::Async(Arc::new(move || operation().boxed())))
}

/// Build a retry run for a blocking operation. Attempts run on tokio's blocking pool.
pub fn retry_blocking<E, F>(operation: F) -> Retryable<E>
where
    E: std::error::Error + Send + Sync + 'static,
    F: Fn() -> Result<(), E> + Send + Sync + 'static,
{
    Retryable::new(Operation::Blocking(Arc::new(operation)))
}

/// A configured retry run: operation, settings, delay sleeper and cancellation signal.
///
/// Clones share the operation and the cancellation signal.
pub struct Retryable<E> {
    operation: Operation<E>,
    config: RetryConfig,
    sleeper: Arc<dyn Sleeper>,
    cancel: CancelHandle,
}

impl<E> Clone for Retryable<E> {
    fn clone(&self) -> Self {
        Self {
            operation: self.operation.clone(),
            config: self.config,
            sleeper: self.sleeper.clone(),
            cancel: self.cancel.clone(),
        }
    }
}

impl<E> std::fmt::Debug for Retryable<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Retryable")
            .field("config", &self.config)
            .field("sleeper", &self.sleeper)
            .field("cancelled", &self.cancel.is_cancelled())
            .field("operation", &"<operation>")
            .finish()
    }
}

enum Outcome<E> {
    Completed(Result<(), RetryError<E>>),
    TimedOut,
    Cancelled,
}

impl<E> Retryable<E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn new(operation: Operation<E>) -> Self {
        Self {
            operation,
            config: RetryConfig::default(),
            sleeper: Arc::new(TokioSleeper),
            cancel: CancelHandle::new(),
        }
    }

    /// Per-attempt timeout. `Duration::ZERO` disables it.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Fixed pause after a failed attempt.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.config.delay = delay;
        self
    }

    /// Total attempts (initial + retries). Zero means the operation never runs.
    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.config.max_attempts = attempts;
        self
    }

    /// Replace all settings at once.
    pub fn with_config(mut self, config: RetryConfig) -> Self {
        self.config = config;
        self
    }

    /// Let cancellation cut the inter-attempt delay short.
    pub fn cancel_during_delay(mut self, enabled: bool) -> Self {
        self.config.cancel_during_delay = enabled;
        self
    }

    /// Provide a custom sleeper for the inter-attempt delay.
    pub fn with_sleeper<S>(mut self, sleeper: S) -> Self
    where
        S: Sleeper + 'static,
    {
        self.sleeper = Arc::new(sleeper);
        self
    }

    /// Observe an externally owned token instead of a private signal.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = CancelHandle::from_token(token);
        self
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Fire the cancellation signal. Idempotent and non-blocking.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Handle that can cancel this run from another task or thread.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Execute the run and wait until it is terminal.
    pub async fn run(&self) -> Stats<E> {
        let started = Instant::now();
        let mut stats = Stats::new();

        if let Err(err) = self.config.validate() {
            tracing::warn!(%err, "retry run has no attempts to make");
            return stats.finish(started.elapsed());
        }

        let timeout = AttemptTimeout::new(self.config.timeout);

        while stats.attempts < self.config.max_attempts {
            let attempt = stats.begin_attempt();

            // Already cancelled: the race would pick cancellation anyway, so skip the launch
            if self.cancel.is_cancelled() {
                tracing::debug!(attempt, "run cancelled before attempt launched");
                stats.error = Some(RetryError::Cancelled);
                break;
            }

            tracing::trace!(attempt, max_attempts = self.config.max_attempts, "starting attempt");
            let handoff = self.operation.launch();

            let outcome = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => Outcome::Cancelled,
                result = handoff.recv() => Outcome::Completed(result),
                _ = timeout.expired() => Outcome::TimedOut,
            };

            match outcome {
                Outcome::Completed(Ok(())) => {
                    tracing::debug!(attempt, "attempt succeeded");
                    stats.error = None;
                    break;
                }
                Outcome::Completed(Err(err)) => {
                    tracing::debug!(attempt, error = %err, "attempt failed");
                    stats.error = Some(err);
                    if !self.pause().await {
                        tracing::debug!(attempt, "run cancelled during delay");
                        stats.error = Some(RetryError::Cancelled);
                        break;
                    }
                }
                Outcome::TimedOut => {
                    tracing::debug!(
                        attempt,
                        timeout = ?self.config.timeout,
                        "attempt timed out"
                    );
                    stats.timeout_count += 1;
                    stats.error = Some(RetryError::Timeout { timeout: self.config.timeout });
                }
                Outcome::Cancelled => {
                    tracing::debug!(attempt, "run cancelled during attempt");
                    stats.error = Some(RetryError::Cancelled);
                    break;
                }
            }
        }

        stats.finish(started.elapsed())
    }

    /// Sleep the inter-attempt delay. Returns `false` when cancellation cut it short.
    async fn pause(&self) -> bool {
        let delay = self.config.delay;
        if delay.is_zero() {
            return true;
        }
        if !self.config.cancel_during_delay {
            self.sleeper.sleep(delay).await;
            return true;
        }
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => false,
            _ = self.sleeper.sleep(delay) => true,
        }
    }
}
