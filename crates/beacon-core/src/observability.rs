//! Observability - beacon cycle ごとの集計
//!
//! 1 サイクルの結果を [`CycleReport`] にまとめ、ループが `info!` で出力します。
//! テストからも `run_cycle()` の戻り値としてそのまま検証できます。

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleOutcome {
    /// Results went out and the response was decoded (possibly with
    /// individual descriptors rejected).
    Completed,
    /// The exchange failed; drained results were put back.
    TransportFailed,
    /// The response body was not a task batch at all; nothing was enqueued.
    MalformedResponse,
}

impl fmt::Display for CycleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CycleOutcome::Completed => "completed",
            CycleOutcome::TransportFailed => "transport_failed",
            CycleOutcome::MalformedResponse => "malformed_response",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleReport {
    /// Results delivered to the controller.
    pub uploaded: usize,
    /// Tasks decoded and enqueued.
    pub received: usize,
    /// Descriptors skipped because they failed to decode.
    pub rejected: usize,
    pub outcome: CycleOutcome,
}

impl CycleReport {
    pub fn transport_failed() -> Self {
        Self {
            uploaded: 0,
            received: 0,
            rejected: 0,
            outcome: CycleOutcome::TransportFailed,
        }
    }

    pub fn malformed_response(uploaded: usize) -> Self {
        Self {
            uploaded,
            received: 0,
            rejected: 0,
            outcome: CycleOutcome::MalformedResponse,
        }
    }

    pub fn completed(uploaded: usize, received: usize, rejected: usize) -> Self {
        Self {
            uploaded,
            received,
            rejected,
            outcome: CycleOutcome::Completed,
        }
    }
}
