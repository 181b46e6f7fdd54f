//! ScriptedTransport - テスト・デモ用の Transport
//!
//! 応答（または失敗）を FIFO で積んでおき、exchange ごとに 1 つ返します。
//! 積んだ分を使い切ったあとは空のバッチ `{}` を返し続けます。

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::TransportError;
use crate::ports::Transport;

#[derive(Debug, Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<String, String>>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response body for a later exchange.
    pub fn push_response(&self, body: impl Into<String>) {
        self.script.lock().push_back(Ok(body.into()));
    }

    /// Queue a transport failure for a later exchange.
    pub fn push_failure(&self, reason: impl Into<String>) {
        self.script.lock().push_back(Err(reason.into()));
    }

    /// Every payload received so far, oldest first.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn exchange(&self, payload: String) -> Result<String, TransportError> {
        self.requests.lock().push(payload);
        match self.script.lock().pop_front() {
            Some(Ok(body)) => Ok(body),
            Some(Err(reason)) => Err(TransportError::Unavailable(reason)),
            None => Ok("{}".to_string()),
        }
    }
}
