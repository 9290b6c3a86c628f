//! Error types reported by a retry run
use std::fmt;
use std::time::Duration;

/// Terminal error of a run, carried in [`Stats::error`](crate::Stats).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryError<E> {
    /// The operation itself failed; passed through unchanged
    Inner(E),
    /// The attempt did not finish within the per-attempt timeout
    Timeout { timeout: Duration },
    /// The run was cancelled before it reached another terminal state
    Cancelled,
    /// The attempt task ended without handing back a result (it panicked)
    Aborted,
}

impl<E: fmt::Display> fmt::Display for RetryError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inner(e) => write!(f, "{}", e),
            Self::Timeout { timeout } => write!(f, "function timeout after {:?}", timeout),
            Self::Cancelled => write!(f, "function cancelled"),
            Self::Aborted => write!(f, "operation task ended without reporting a result"),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for RetryError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Inner(e) => Some(e),
            _ => None,
        }
    }
}

impl<E> RetryError<E> {
    /// Check if this error is due to the per-attempt timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
    /// Check if the run was cancelled
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
    /// Check if the attempt task died before reporting
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted)
    }
    /// Check if this error wraps an operation error.
    pub fn is_inner(&self) -> bool {
        matches!(self, Self::Inner(_))
    }
    /// Borrow the operation error if present.
    pub fn as_inner(&self) -> Option<&E> {
        match self {
            Self::Inner(e) => Some(e),
            _ => None,
        }
    }
    /// Get the operation error if this is an Inner variant
    pub fn into_inner(self) -> Option<E> {
        match self {
            Self::Inner(e) => Some(e),
            _ => None,
        }
    }
    /// Configured timeout that was exceeded, if this is a timeout error.
    pub fn timeout_duration(&self) -> Option<Duration> {
        match self {
            Self::Timeout { timeout } => Some(*timeout),
            _ => None,
        }
    }
}
