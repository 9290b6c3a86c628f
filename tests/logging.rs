mod common;

use common::TestError;
use retryable::retry;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone)]
struct SharedWriter(Arc<Mutex<Vec<u8>>>);

impl<'a> MakeWriter<'a> for SharedWriter {
    type Writer = SharedGuard;
    fn make_writer(&'a self) -> Self::Writer {
        SharedGuard(self.0.clone())
    }
}

struct SharedGuard(Arc<Mutex<Vec<u8>>>);
impl std::io::Write for SharedGuard {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut guard = self.0.lock().unwrap();
        guard.extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn capture() -> (Arc<Mutex<Vec<u8>>>, tracing::subscriber::DefaultGuard) {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::fmt()
        .with_writer(BoxMakeWriter::new(SharedWriter(buffer.clone())))
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .without_time()
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (buffer, guard)
}

fn logs(buffer: &Arc<Mutex<Vec<u8>>>) -> String {
    String::from_utf8(buffer.lock().unwrap().clone()).unwrap()
}

#[tokio::test]
async fn zero_attempt_budget_warns() {
    let (buffer, _guard) = capture();

    let stats = retry(|| async { Ok::<(), TestError>(()) }).with_max_attempts(0).run().await;

    assert_eq!(stats.attempts, 0);
    let logs = logs(&buffer);
    assert!(logs.contains("WARN"));
    assert!(logs.contains("retry run has no attempts to make"));
}

#[tokio::test(start_paused = true)]
async fn attempt_outcomes_are_logged() {
    let (buffer, _guard) = capture();

    let _ = retry(|| async {
        tokio::time::sleep(Duration::from_secs(1)).await;
        Err::<(), _>(TestError(0))
    })
    .with_max_attempts(1)
    .with_timeout(Duration::from_millis(10))
    .run()
    .await;

    let logs = logs(&buffer);
    assert!(logs.contains("attempt timed out"), "logs were: {}", logs);
    assert!(logs.contains("timeout=10ms"), "logs were: {}", logs);
}
