use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("attempt {0} failed")]
pub struct TestError(pub usize);

/// Counts calls and fails until the given (0-based) call index is reached.
#[derive(Clone, Default)]
pub struct CallCounter {
    calls: Arc<AtomicUsize>,
}

impl CallCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a call, returning its 0-based index.
    pub fn hit(&self) -> usize {
        self.calls.fetch_add(1, Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn fail_until(&self, succeed_at: usize) -> Result<(), TestError> {
        let n = self.hit();
        if n < succeed_at {
            Err(TestError(n))
        } else {
            Ok(())
        }
    }
}
