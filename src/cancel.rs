//! Broadcast cancellation signal shared between a run and its cancellers.

use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};

/// One-shot, broadcast-once cancellation signal.
///
/// Clones share the same signal. Cancelling is idempotent and never blocks, so it is safe from
/// any task or thread, repeatedly, and after the run has already finished.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing token, e.g. a child of an application shutdown token.
    pub fn from_token(token: CancellationToken) -> Self {
        Self { token }
    }

    /// Fire the signal.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Underlying token, for linking child tokens.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub(crate) fn cancelled(&self) -> WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }
}
