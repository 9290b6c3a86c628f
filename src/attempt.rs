//! Launching a single attempt and handing its result back to the race.
//!
//! Each attempt runs on its own task and reports through a `oneshot` slot. The producer's send
//! always completes without a waiting reader, so an attempt abandoned by a timeout or a
//! cancellation finishes in the background and its late result is dropped with the slot.
//! Nothing interrupts an abandoned attempt; an operation that never returns keeps its task alive.

use crate::RetryError;
use futures::future::BoxFuture;
use std::sync::Arc;
use tokio::sync::oneshot;

type AsyncFn<E> = Arc<dyn Fn() -> BoxFuture<'static, Result<(), E>> + Send + Sync>;
type BlockingFn<E> = Arc<dyn Fn() -> Result<(), E> + Send + Sync>;

/// The fallible unit of work a run retries.
pub(crate) enum Operation<E> {
    /// Polled on a tokio task.
    Async(AsyncFn<E>),
    /// Run on the blocking thread pool.
    Blocking(BlockingFn<E>),
}

impl<E> Clone for Operation<E> {
    fn clone(&self) -> Self {
        match self {
            Operation::Async(op) => Operation::Async(op.clone()),
            Operation::Blocking(op) => Operation::Blocking(op.clone()),
        }
    }
}

impl<E> Operation<E>
where
    E: Send + 'static,
{
    /// Spawn one attempt; the task is detached.
    pub(crate) fn launch(&self) -> Handoff<E> {
        let (tx, rx) = oneshot::channel();
        match self {
            Operation::Async(op) => {
                let op = op.clone();
                tokio::spawn(async move {
                    // Receiver gone means the attempt was abandoned
                    let _ = tx.send(op().await);
                });
            }
            Operation::Blocking(op) => {
                let op = op.clone();
                tokio::task::spawn_blocking(move || {
                    let _ = tx.send(op());
                });
            }
        }
        Handoff { rx }
    }
}

/// Read side of an attempt's single-slot result channel.
pub(crate) struct Handoff<E> {
    rx: oneshot::Receiver<Result<(), E>>,
}

impl<E> Handoff<E> {
    /// Wait for the attempt's result. A task that died before sending yields `Aborted`.
    pub(crate) async fn recv(self) -> Result<(), RetryError<E>> {
        match self.rx.await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(RetryError::Inner(e)),
            Err(_) => Err(RetryError::Aborted),
        }
    }
}
