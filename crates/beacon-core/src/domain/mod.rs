//! Domain model (IDs, tasks, results, configuration).

pub mod config;
pub mod ids;
pub mod outcome;
pub mod task;

pub use config::Configuration;
pub use ids::TaskId;
pub use outcome::TaskResult;
pub use task::{Task, TaskKind};
