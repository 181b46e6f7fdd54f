//! Agent - 共有リソースを持ち、2 つのループを走らせる
//!
//! ExecutionLoop は別タスクとして spawn し、BeaconLoop は呼び出し元のタスクで回します。
//! BeaconLoop が終わったら ExecutionLoop を join し、取りこぼしがないよう最後に 1 回 drain します。

use std::sync::Arc;

use tracing::{debug, info};

use crate::app::beacon_loop::BeaconLoop;
use crate::app::execution_loop::ExecutionLoop;
use crate::config::Endpoint;
use crate::error::BeaconError;
use crate::queue::{ResultSink, TaskQueue};
use crate::state::ConfigState;

pub struct Agent {
    endpoint: Endpoint,
    state: ConfigState,
    queue: Arc<TaskQueue>,
    sink: Arc<ResultSink>,
    beacon: BeaconLoop,
    execution: ExecutionLoop,
}

impl Agent {
    pub(crate) fn new(
        endpoint: Endpoint,
        state: ConfigState,
        queue: Arc<TaskQueue>,
        sink: Arc<ResultSink>,
        beacon: BeaconLoop,
        execution: ExecutionLoop,
    ) -> Self {
        Self {
            endpoint,
            state,
            queue,
            sink,
            beacon,
            execution,
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn config_state(&self) -> &ConfigState {
        &self.state
    }

    pub fn queue(&self) -> &Arc<TaskQueue> {
        &self.queue
    }

    pub fn sink(&self) -> &Arc<ResultSink> {
        &self.sink
    }

    /// Run until a `configure` task sets `running` to false.
    pub async fn run(self) -> Result<(), BeaconError> {
        let Agent {
            endpoint,
            mut beacon,
            execution,
            ..
        } = self;
        info!(controller = %endpoint, "agent starting");

        let worker = tokio::spawn(async move {
            execution.run().await;
            execution
        });
        beacon.run().await;

        let execution = worker.await?;
        // a cycle in flight at cutover may enqueue after the worker's last drain
        let late = execution.run_pending().await;
        if late > 0 {
            debug!(late, "ran tasks enqueued after the execution loop stopped");
        }
        info!("agent stopped");
        Ok(())
    }
}
