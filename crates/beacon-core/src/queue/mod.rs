//! Queue module: the two hand-off buffers shared by the loops.
//!
//! Both are drained by swap, never copy-then-clear, and neither holds its
//! lock across an `.await`.

mod result_sink;
mod task_queue;

pub use result_sink::ResultSink;
pub use task_queue::TaskQueue;
