//! Results waiting for the next upload.

use parking_lot::Mutex;

use crate::domain::TaskResult;

/// Accumulates results produced since the last successful upload.
///
/// Same swap-out discipline as [`TaskQueue`](super::TaskQueue): `drain`
/// leaves an empty vector behind inside the critical section.
#[derive(Debug, Default)]
pub struct ResultSink {
    results: Mutex<Vec<TaskResult>>,
}

impl ResultSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, result: TaskResult) {
        self.results.lock().push(result);
    }

    /// Take every buffered result, in completion order.
    pub fn drain(&self) -> Vec<TaskResult> {
        std::mem::take(&mut *self.results.lock())
    }

    /// Put a drained batch back in front of anything added since.
    ///
    /// Used when an upload failed, so the batch is retried next cycle
    /// without reordering it behind newer results.
    ///
    /// Delivery is at-least-once: a failure reported after the body went out
    /// (a 5xx status, a read timeout) may mean the controller already stored
    /// the batch, and it will see the same ids again.
    pub fn restore(&self, batch: Vec<TaskResult>) {
        if batch.is_empty() {
            return;
        }
        let mut results = self.results.lock();
        let newer = std::mem::replace(&mut *results, batch);
        results.extend(newer);
    }

    pub fn len(&self) -> usize {
        self.results.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.lock().is_empty()
    }
}
