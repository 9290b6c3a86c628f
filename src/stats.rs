//! Outcome statistics of a retry run.

use crate::RetryError;
use std::time::Duration;

/// What a run did. Returned by value once the run is terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats<E> {
    /// `None` on success, otherwise the error recorded by the last attempt (or the
    /// cancellation that ended the run).
    pub error: Option<RetryError<E>>,
    /// Attempts made beyond the first one.
    pub retry_count: usize,
    /// Attempts that hit the per-attempt timeout.
    pub timeout_count: usize,
    /// Attempts begun in total. An attempt that found the run already cancelled counts, even
    /// though its operation was never launched.
    pub attempts: usize,
    /// Wall time from the start of the run until it became terminal.
    pub elapsed: Duration,
}

impl<E> Stats<E> {
    pub(crate) fn new() -> Self {
        Self { error: None, retry_count: 0, timeout_count: 0, attempts: 0, elapsed: Duration::ZERO }
    }

    pub(crate) fn begin_attempt(&mut self) -> usize {
        self.attempts += 1;
        self.retry_count = self.attempts.saturating_sub(1);
        self.attempts
    }

    pub(crate) fn finish(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self
    }

    /// True when the run ended without an error.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Convert into a `Result`, discarding the counters.
    pub fn into_result(self) -> Result<(), RetryError<E>> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
