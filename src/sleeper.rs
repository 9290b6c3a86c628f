//! Pluggable wait used for the inter-attempt delay.
//!
//! Only the delay after a failed attempt goes through a [`Sleeper`]; the per-attempt timeout
//! always runs on the tokio timer.

use futures::future::BoxFuture;
use futures::FutureExt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Waits out the delay between a failed attempt and the next one.
pub trait Sleeper: Send + Sync + std::fmt::Debug {
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()>;
}

/// Default sleeper backed by `tokio::time::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
        tokio::time::sleep(duration).boxed()
    }
}

/// Sleeper for tests: returns at once and remembers each requested delay.
#[derive(Debug, Clone, Default)]
pub struct TrackingSleeper {
    requested: Arc<Mutex<Vec<Duration>>>,
}

impl TrackingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays requested so far, in order.
    pub fn calls(&self) -> Vec<Duration> {
        self.requested.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.requested.lock().map(|r| r.len()).unwrap_or(0)
    }

    /// Sum of all requested delays.
    pub fn total(&self) -> Duration {
        self.calls().into_iter().sum()
    }
}

impl Sleeper for TrackingSleeper {
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(duration);
        }
        futures::future::ready(()).boxed()
    }
}
