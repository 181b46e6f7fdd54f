//! Pending tasks between the beacon cycle and the execution cycle.

use std::collections::VecDeque;

use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::domain::Task;

/// FIFO of decoded tasks waiting to run.
///
/// Design:
/// - Producers push, the execution loop drains everything at once.
/// - Drain swaps the deque out under the lock; the tasks are run after the
///   guard is gone, so a push that races a drain lands in the next drain.
/// - `Notify` keeps a permit when nobody is waiting, so a push is never
///   missed by a consumer that starts waiting afterwards.
#[derive(Debug, Default)]
pub struct TaskQueue {
    pending: Mutex<VecDeque<Task>>,
    notify: Notify,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, task: Task) {
        self.pending.lock().push_back(task);
        self.notify.notify_one();
    }

    /// Push a whole batch in order; returns how many were added.
    pub fn extend(&self, tasks: impl IntoIterator<Item = Task>) -> usize {
        let added = {
            let mut pending = self.pending.lock();
            let before = pending.len();
            pending.extend(tasks);
            pending.len() - before
        };
        if added > 0 {
            self.notify.notify_one();
        }
        added
    }

    /// Take every pending task, oldest first.
    pub fn drain(&self) -> VecDeque<Task> {
        std::mem::take(&mut *self.pending.lock())
    }

    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }

    /// Wait for the next push signal.
    pub async fn notified(&self) {
        self.notify.notified().await;
    }
}
