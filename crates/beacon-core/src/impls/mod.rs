//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **HttpTransport**: 本番用（reqwest）
//! - **ScriptedTransport**: テスト・デモ用の台本どおりに応答する Transport

pub mod http_transport;
pub mod scripted_transport;

// 主要な型を再エクスポート
pub use self::http_transport::HttpTransport;
pub use self::scripted_transport::ScriptedTransport;
