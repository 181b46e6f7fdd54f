//! TaskExecutor - 1 タスク → 1 結果
//!
//! # 学習ポイント
//! - `match` による網羅的ディスパッチ（variant を追加するとここがコンパイルエラーになる）
//! - 失敗は `Err` ではなく `success = false` の [`TaskResult`] として返す
//! - ブロッキングな directory walk は `spawn_blocking` に逃がす
//!
//! `execute` はシェル経由で任意コマンドを実行する。サンドボックスはしない（意図した機能）。

use std::fmt::Write as _;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::debug;
use walkdir::WalkDir;

use crate::domain::outcome::{
    CONFIGURED, COULD_NOT_OPEN, EMPTY_DIRECTORY, REMOVED, TIMED_OUT, WROTE_FILE,
};
use crate::domain::{Configuration, Task, TaskId, TaskResult};
use crate::state::ConfigState;

/// Runs tasks. Total: every call returns exactly one result for the task's id.
#[derive(Debug, Clone)]
pub struct TaskExecutor {
    config: ConfigState,
    execute_timeout: Option<Duration>,
}

impl TaskExecutor {
    pub fn new(config: ConfigState) -> Self {
        Self {
            config,
            execute_timeout: None,
        }
    }

    /// Bound `execute` tasks; `None` waits for the child however long it takes.
    pub fn with_execute_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.execute_timeout = timeout;
        self
    }

    pub async fn run(&self, task: Task) -> TaskResult {
        let kind = task.kind();
        let result = match task {
            Task::Get { id, path } => get(id, &path).await,
            Task::Put { id, path, contents } => put(id, &path, &contents).await,
            Task::List { id, path, depth } => list(id, path, depth).await,
            Task::Delete { id, path } => delete(id, &path).await,
            Task::Execute { id, command } => self.execute(id, &command).await,
            Task::Configure { id, configuration } => self.configure(id, configuration),
        };
        debug!(task_id = %result.id, %kind, success = result.success, "task finished");
        result
    }

    async fn execute(&self, id: TaskId, command: &str) -> TaskResult {
        let child = match shell(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
        {
            Ok(child) => child,
            Err(e) => return TaskResult::failure(id, format!("failed to spawn command: {e}")),
        };

        let output = child.wait_with_output();
        let output = match self.execute_timeout {
            // dropping the future drops the child, which kills it
            Some(limit) => match tokio::time::timeout(limit, output).await {
                Ok(output) => output,
                Err(_) => return TaskResult::failure(id, TIMED_OUT),
            },
            None => output.await,
        };

        match output {
            Ok(output) => {
                TaskResult::success(id, String::from_utf8_lossy(&output.stdout).into_owned())
            }
            Err(e) => TaskResult::failure(id, e.to_string()),
        }
    }

    fn configure(&self, id: TaskId, configuration: Configuration) -> TaskResult {
        self.config.update(configuration);
        TaskResult::success(id, CONFIGURED)
    }
}

async fn get(id: TaskId, path: &Path) -> TaskResult {
    match tokio::fs::read(path).await {
        Ok(bytes) => TaskResult::success(id, String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "get failed");
            TaskResult::failure(id, COULD_NOT_OPEN)
        }
    }
}

async fn put(id: TaskId, path: &Path, contents: &str) -> TaskResult {
    match tokio::fs::write(path, contents.as_bytes()).await {
        Ok(()) => TaskResult::success(id, WROTE_FILE),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "put failed");
            TaskResult::failure(id, COULD_NOT_OPEN)
        }
    }
}

async fn list(id: TaskId, path: PathBuf, depth: u8) -> TaskResult {
    match tokio::task::spawn_blocking(move || walk(&path, depth)).await {
        Ok(Some(listing)) => TaskResult::success(id, listing),
        Ok(None) => TaskResult::failure(id, EMPTY_DIRECTORY),
        Err(e) => TaskResult::failure(id, e.to_string()),
    }
}

/// One line per entry below `root`, at most `depth` levels down (0 acts as 1).
///
/// Permission-denied entries are skipped; any other per-entry error becomes
/// a `(message)` line and the walk goes on. `None` when nothing was listed.
fn walk(root: &Path, depth: u8) -> Option<String> {
    if !root.is_dir() {
        return None;
    }

    let mut listing = String::new();
    let mut lines = 0usize;
    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(usize::from(depth.max(1)))
    {
        match entry {
            Ok(entry) => {
                let _ = writeln!(listing, "{}", entry.path().display());
            }
            Err(e) if is_permission_denied(&e) => continue,
            Err(e) => {
                let _ = writeln!(listing, "({e})");
            }
        }
        lines += 1;
    }
    (lines > 0).then_some(listing)
}

fn is_permission_denied(error: &walkdir::Error) -> bool {
    error
        .io_error()
        .is_some_and(|e| e.kind() == io::ErrorKind::PermissionDenied)
}

async fn delete(id: TaskId, path: &Path) -> TaskResult {
    let removed = match tokio::fs::symlink_metadata(path).await {
        Ok(meta) if meta.is_dir() => tokio::fs::remove_dir(path).await,
        Ok(_) => tokio::fs::remove_file(path).await,
        // nothing to remove
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    };
    match removed {
        Ok(()) => TaskResult::success(id, REMOVED),
        Err(e) => TaskResult::failure(id, e.to_string()),
    }
}

#[cfg(windows)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

#[cfg(not(windows))]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}
