//! AgentBuilder - Agent の構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）: 不正な設定ではネットワークに一切触れない
//! - Transport / DwellSampler の差し替え（テスト・デモ用）

use std::sync::Arc;

use crate::app::agent::Agent;
use crate::app::beacon_loop::BeaconLoop;
use crate::app::execution_loop::ExecutionLoop;
use crate::config::AgentConfig;
use crate::error::{ConfigError, TransportError};
use crate::executor::TaskExecutor;
use crate::impls::HttpTransport;
use crate::ports::{DwellSampler, ExponentialDwell, Transport};
use crate::queue::{ResultSink, TaskQueue};
use crate::state::ConfigState;

/// AgentBuilder は Agent を構築
///
/// # 使用例
/// ```ignore
/// let agent = AgentBuilder::new(AgentConfig::default()).build()?;
/// agent.run().await?;
/// ```
pub struct AgentBuilder {
    config: AgentConfig,
    transport: Option<Arc<dyn Transport>>,
    dwell: Option<Box<dyn DwellSampler>>,
}

/// BuildError は Agent 構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("invalid agent configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("could not set up the controller transport: {0}")]
    Transport(#[from] TransportError),
}

impl AgentBuilder {
    pub fn new(config: AgentConfig) -> Self {
        Self {
            config,
            transport: None,
            dwell: None,
        }
    }

    /// Transport を差し替える（省略時は HttpTransport）
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// DwellSampler を差し替える（省略時は ExponentialDwell）
    pub fn dwell_sampler(mut self, dwell: impl DwellSampler + 'static) -> Self {
        self.dwell = Some(Box::new(dwell));
        self
    }

    /// 設定を検証して Agent を組み立てる
    ///
    /// # 検証
    /// - AgentConfig::validate()（mean dwell > 0, poll_interval > 0）
    /// - HttpTransport の生成（TLS バックエンドの初期化を含む）
    pub fn build(self) -> Result<Agent, BuildError> {
        self.config.validate()?;
        let initial = self.config.initial_configuration()?;

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(
                &self.config.endpoint,
                self.config.request_timeout,
            )?),
        };
        let dwell = self
            .dwell
            .unwrap_or_else(|| Box::new(ExponentialDwell::from_entropy()));

        let state = ConfigState::new(initial);
        let queue = Arc::new(TaskQueue::new());
        let sink = Arc::new(ResultSink::new());

        let executor =
            TaskExecutor::new(state.clone()).with_execute_timeout(self.config.execute_timeout);
        let execution = ExecutionLoop::new(
            queue.clone(),
            sink.clone(),
            executor,
            state.clone(),
            self.config.poll_interval,
        );
        let beacon = BeaconLoop::new(transport, queue.clone(), sink.clone(), state.clone(), dwell);

        Ok(Agent::new(self.config.endpoint, state, queue, sink, beacon, execution))
    }
}
