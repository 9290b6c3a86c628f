//! Poll a flaky endpoint with a delay and timeout, giving up when cancelled.
use retryable::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
#[error("endpoint returned 503 on poll {0}")]
struct Unavailable(usize);

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    let polls = Arc::new(AtomicUsize::new(0));
    let poller = retry(move || {
        let n = polls.fetch_add(1, Ordering::SeqCst);
        async move {
            // Replace with your real poll; every third call hangs
            if n % 3 == 2 {
                tokio::time::sleep(Duration::from_secs(30)).await;
            }
            Err::<(), _>(Unavailable(n))
        }
    })
    .with_max_attempts(10)
    .with_delay(Duration::from_millis(300))
    .with_timeout(Duration::from_millis(500));

    let cancel = poller.cancel_handle();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(2)).await;
        cancel.cancel();
    });

    let stats = poller.run().await;
    match &stats.error {
        None => println!("succeeded after {} retries", stats.retry_count),
        Some(err) => println!(
            "gave up: {} (retries: {}, timeouts: {}, elapsed: {:?})",
            err, stats.retry_count, stats.timeout_count, stats.elapsed
        ),
    }
}
