//! HttpTransport - `POST /` でコントローラと 1 往復する
//!
//! # 実装詳細
//! - reqwest::Client を使い回す（接続は `Connection: close` で都度閉じる）
//! - 2xx 以外は TransportError::Status
//! - タイムアウトは AgentConfig::request_timeout

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONNECTION, CONTENT_TYPE};
use tracing::debug;

use crate::config::Endpoint;
use crate::error::TransportError;
use crate::ports::Transport;

pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
}

impl HttpTransport {
    pub fn new(endpoint: &Endpoint, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: endpoint.url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn exchange(&self, payload: String) -> Result<String, TransportError> {
        debug!(url = %self.url, bytes = payload.len(), "posting results");
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(CONNECTION, "close")
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }
        Ok(response.text().await?)
    }
}
