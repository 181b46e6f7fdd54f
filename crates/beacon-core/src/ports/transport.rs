//! Transport port - コントローラとの 1 往復
//!
//! beacon cycle ごとに 1 回だけ呼ばれます。接続プール・TLS・リトライなどは
//! 実装側の関心事で、コア側は「失敗したらそのサイクルを諦める」ことだけを決めます。

use async_trait::async_trait;

use crate::error::TransportError;

/// One request/response exchange with the controller.
///
/// # 実装
/// - **HttpTransport**: `POST /`（本番用）
/// - **ScriptedTransport**: 応答を事前に積んでおく（テスト用）
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `payload` and return the raw response body.
    async fn exchange(&self, payload: String) -> Result<String, TransportError>;
}
