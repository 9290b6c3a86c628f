//! Convenient re-exports for common retry types.
pub use crate::{
    cancel::CancelHandle,
    config::{ConfigError, RetryConfig},
    error::RetryError,
    retry::{retry, retry_blocking, Retryable},
    sleeper::{Sleeper, TokioSleeper},
    stats::Stats,
    CancellationToken,
};
