//! ConfigState - beacon 全体で共有する設定
//!
//! # 学習ポイント
//! - `tokio::sync::watch` を「最新値スナップショット + 変更通知」として使う
//! - 書き込み経路は [`ConfigState::update`] だけ（configure タスク経由）
//! - 読み手は `(mean_dwell, running)` のペアを常に丸ごと見る

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use crate::domain::Configuration;

/// Process-wide, read-mostly beacon configuration.
///
/// Cloning is cheap and every clone observes the same state.
#[derive(Debug, Clone)]
pub struct ConfigState {
    tx: Arc<watch::Sender<Configuration>>,
}

impl ConfigState {
    pub fn new(initial: Configuration) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Replace the whole pair atomically.
    pub fn update(&self, configuration: Configuration) {
        let previous = self.tx.send_replace(configuration);
        info!(
            mean_dwell = configuration.mean_dwell(),
            running = configuration.running(),
            previous_mean_dwell = previous.mean_dwell(),
            previous_running = previous.running(),
            "beacon reconfigured"
        );
    }

    pub fn snapshot(&self) -> Configuration {
        *self.tx.borrow()
    }

    pub fn is_running(&self) -> bool {
        self.tx.borrow().running()
    }

    /// Receiver that sees every later update.
    pub fn subscribe(&self) -> watch::Receiver<Configuration> {
        self.tx.subscribe()
    }

    /// Resolves once `running` is false (immediately if it already is).
    pub async fn wait_stopped(&self) {
        let mut rx = self.subscribe();
        // self keeps the sender alive, so wait_for cannot see a closed channel
        let _ = rx.wait_for(|c| !c.running()).await;
    }
}

impl Default for ConfigState {
    fn default() -> Self {
        Self::new(Configuration::default())
    }
}
