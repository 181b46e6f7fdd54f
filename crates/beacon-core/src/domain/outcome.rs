//! Outcome model: the one result every task produces.
//!
//! Failures are data here, not `Err`: a task that could not open its file
//! still yields a `TaskResult` with `success = false` and a message the
//! controller can read.

use super::TaskId;

pub const COULD_NOT_OPEN: &str = "Couldn't open file.";
pub const WROTE_FILE: &str = "Wrote file.";
pub const EMPTY_DIRECTORY: &str = "Directory empty or did not exist.";
pub const REMOVED: &str = "Removed.";
pub const CONFIGURED: &str = "Configured.";
pub const TIMED_OUT: &str = "timed out";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskResult {
    /// Same id as the originating task.
    pub id: TaskId,
    pub contents: String,
    pub success: bool,
}

impl TaskResult {
    pub fn new(id: TaskId, contents: impl Into<String>, success: bool) -> Self {
        Self {
            id,
            contents: contents.into(),
            success,
        }
    }

    pub fn success(id: TaskId, contents: impl Into<String>) -> Self {
        Self::new(id, contents, true)
    }

    pub fn failure(id: TaskId, contents: impl Into<String>) -> Self {
        Self::new(id, contents, false)
    }
}
