//! beacon-core
//!
//! Core building blocks for the beacon agent: poll a controller on a jittered
//! interval, run the tasks it hands out, and report the results next cycle.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（TaskId, Task, TaskResult, Configuration）
//! - **codec**: wire JSON ⇔ ドメインモデル
//! - **ports**: 抽象化レイヤー（Transport, DwellSampler）
//! - **impls**: 実装（HttpTransport, ScriptedTransport）
//! - **queue**: ループ間の受け渡しバッファ（TaskQueue, ResultSink）
//! - **state**: ConfigState（configure タスクで更新される共有設定）
//! - **executor**: TaskExecutor（variant ごとの実行）
//! - **app**: アプリケーションロジック（builder, agent, beacon_loop, execution_loop）
//! - **config**: 起動時設定（AgentConfig, Endpoint）
//! - **observability**: サイクルごとの集計（CycleReport）
//! - **error**: エラー型

pub mod app;
pub mod codec;
pub mod config;
pub mod domain;
pub mod error;
pub mod executor;
pub mod impls;
pub mod observability;
pub mod ports;
pub mod queue;
pub mod state;

pub use crate::app::{Agent, AgentBuilder, BuildError};
pub use crate::config::{AgentConfig, Endpoint};
pub use crate::domain::{Configuration, Task, TaskId, TaskKind, TaskResult};
pub use crate::error::{BeaconError, ConfigError, DecodeError, TransportError};
pub use crate::state::ConfigState;
