#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::all))]

//! # retryable
//!
//! Retry executor for async Rust: run a fallible operation up to a fixed number of times with
//! a per-attempt timeout, a fixed inter-attempt delay, and external cancellation, then report
//! what happened.
//!
//! ## Features
//!
//! - **Fixed delay** between failed attempts (no delay after a timeout)
//! - **Per-attempt timeout**; a zero timeout disables it
//! - **Cancellation** from any task or thread, idempotent, backed by `CancellationToken`
//! - **Run statistics**: final error, retries made, timeouts observed
//! - Async and blocking operations
//!
//! ## Quick Start
//!
//! ```rust
//! use retryable::{retry, RetryError};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let poller = retry(|| async {
//!         // Your async operation here
//!         Ok::<_, std::io::Error>(())
//!     })
//!     .with_max_attempts(5)
//!     .with_delay(Duration::from_millis(200))
//!     .with_timeout(Duration::from_secs(15));
//!
//!     let cancel = poller.cancel_handle();
//!     tokio::spawn(async move {
//!         tokio::time::sleep(Duration::from_secs(10)).await;
//!         cancel.cancel();
//!     });
//!
//!     let stats = poller.run().await;
//!     if let Some(RetryError::Cancelled) = stats.error {
//!         eprintln!("gave up after {} retries", stats.retry_count);
//!     }
//! }
//! ```

mod attempt;
pub mod cancel;
pub mod config;
pub mod error;
pub mod prelude;
pub mod retry;
pub mod sleeper;
pub mod stats;
pub mod timeout;

// Re-exports
pub use cancel::CancelHandle;
pub use config::{ConfigError, RetryConfig, DEFAULT_MAX_ATTEMPTS};
pub use error::RetryError;
pub use retry::{retry, retry_blocking, Retryable};
pub use sleeper::{Sleeper, TokioSleeper, TrackingSleeper};
pub use stats::Stats;
pub use timeout::AttemptTimeout;
pub use tokio_util::sync::CancellationToken;
