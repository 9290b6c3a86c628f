//! Per-attempt timeout arm of the attempt race

use std::time::Duration;

/// Timer raced against each attempt. A zero duration disables it entirely: the timer never
/// fires, which is not the same as timing out immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptTimeout {
    duration: Duration,
}

impl AttemptTimeout {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    pub fn is_disabled(&self) -> bool {
        self.duration.is_zero()
    }

    /// Inspect the configured timeout, `None` when disabled.
    pub fn duration(&self) -> Option<Duration> {
        if self.is_disabled() {
            None
        } else {
            Some(self.duration)
        }
    }

    /// Resolves once the timeout has elapsed; pends forever when disabled.
    pub async fn expired(self) {
        match self.duration() {
            Some(duration) => tokio::time::sleep(duration).await,
            None => std::future::pending::<()>().await,
        }
    }
}
