//! App - アプリケーション層
//!
//! このモジュールは、ports・queue・executor を組み合わせて beacon を動かします。
//!
//! # 主要コンポーネント
//! - **AgentBuilder**: 設定の検証とワイヤリング
//! - **Agent**: 共有リソースを持ち、2 つのループを起動・join
//! - **BeaconLoop**: 結果送信 → タスク受信 → enqueue → jitter 付きスリープ
//! - **ExecutionLoop**: タスク実行ループ（drain → execute → push）

pub mod agent;
pub mod beacon_loop;
pub mod builder;
pub mod execution_loop;

// 主要な型を再エクスポート
pub use self::agent::Agent;
pub use self::beacon_loop::BeaconLoop;
pub use self::builder::{AgentBuilder, BuildError};
pub use self::execution_loop::ExecutionLoop;
