//! ExecutionLoop - TaskQueue を消化して ResultSink に結果を積むループ
//!
//! # フロー
//! 1. queue の通知 / poll_interval / 停止通知 のどれかを待つ
//! 2. TaskQueue を丸ごと drain
//! 3. drain した順に TaskExecutor で実行し、完了ごとに ResultSink へ push
//!
//! `running == false` になったら手元のバッチを終え、最後にもう一度 drain してから抜けます。

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::executor::TaskExecutor;
use crate::queue::{ResultSink, TaskQueue};
use crate::state::ConfigState;

pub struct ExecutionLoop {
    queue: Arc<TaskQueue>,
    sink: Arc<ResultSink>,
    executor: TaskExecutor,
    config: ConfigState,
    poll_interval: Duration,
}

impl ExecutionLoop {
    pub fn new(
        queue: Arc<TaskQueue>,
        sink: Arc<ResultSink>,
        executor: TaskExecutor,
        config: ConfigState,
        poll_interval: Duration,
    ) -> Self {
        Self {
            queue,
            sink,
            executor,
            config,
            poll_interval,
        }
    }

    /// Run everything queued right now; returns how many tasks ran.
    pub async fn run_pending(&self) -> usize {
        let batch = self.queue.drain();
        let count = batch.len();
        if count > 0 {
            debug!(count, "executing batch");
        }
        for task in batch {
            let result = self.executor.run(task).await;
            self.sink.push(result);
        }
        count
    }

    pub async fn run(&self) {
        info!(poll_ms = self.poll_interval.as_millis() as u64, "execution loop started");
        loop {
            self.run_pending().await;
            if !self.config.is_running() {
                break;
            }
            tokio::select! {
                _ = self.queue.notified() => {}
                _ = tokio::time::sleep(self.poll_interval) => {}
                _ = self.config.wait_stopped() => {}
            }
        }
        let last = self.run_pending().await;
        info!(last, "execution loop stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::outcome::{CONFIGURED, COULD_NOT_OPEN};
    use crate::domain::{Configuration, Task, TaskId};

    fn setup() -> (ExecutionLoop, Arc<TaskQueue>, Arc<ResultSink>, ConfigState) {
        let queue = Arc::new(TaskQueue::new());
        let sink = Arc::new(ResultSink::new());
        let config = ConfigState::default();
        let exec = ExecutionLoop::new(
            queue.clone(),
            sink.clone(),
            TaskExecutor::new(config.clone()),
            config.clone(),
            Duration::from_millis(50),
        );
        (exec, queue, sink, config)
    }

    fn missing_get() -> Task {
        Task::Get {
            id: TaskId::random(),
            path: "/definitely/not/here".into(),
        }
    }

    #[tokio::test]
    async fn results_follow_drain_order() {
        let (exec, queue, sink, _) = setup();
        let first = missing_get();
        let second = Task::Configure {
            id: TaskId::random(),
            configuration: Configuration::new(2.0, true).unwrap(),
        };
        queue.push(first.clone());
        queue.push(second.clone());

        assert_eq!(exec.run_pending().await, 2);

        let results = sink.drain();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, first.id());
        assert_eq!(results[0].contents, COULD_NOT_OPEN);
        assert_eq!(results[1].id, second.id());
        assert_eq!(results[1].contents, CONFIGURED);
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn wakes_on_push_and_stops_on_configure() {
        let (exec, queue, sink, config) = setup();
        let handle = tokio::spawn(async move { exec.run().await });

        queue.push(missing_get());
        queue.push(Task::Configure {
            id: TaskId::random(),
            configuration: Configuration::new(1.0, false).unwrap(),
        });

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("loop exits once running is false")
            .unwrap();

        assert!(!config.is_running());
        assert_eq!(sink.len(), 2);
    }

    #[tokio::test]
    async fn final_drain_runs_tasks_queued_at_stop() {
        let (exec, queue, sink, config) = setup();
        config.update(Configuration::new(1.0, false).unwrap());
        queue.push(missing_get());

        exec.run().await;

        assert!(queue.is_empty());
        assert_eq!(sink.len(), 1);
    }
}
