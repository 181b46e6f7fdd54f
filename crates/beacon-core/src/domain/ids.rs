//! Task identifiers.
//!
//! # コントローラ払い出しの UUID
//! タスク ID はコントローラが採番する UUID をそのまま使います。
//! agent 側で ID を生成するのはテスト用の [`TaskId::random`] だけです。
//!
//! ## 型を分ける理由
//! - 結果 (`TaskResult`) とタスクの対応付けを型で保証する
//! - wire 上の文字列表現（小文字・ハイフン区切り）を一箇所に閉じ込める

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifier of a Task (and of the single result it produces).
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// UUID から TaskId を作成
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// テスト・デモ用: ランダムな v4 UUID
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// 内部の UUID を取得
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for TaskId {
    fn from(uuid: Uuid) -> Self {
        Self::from_uuid(uuid)
    }
}

impl FromStr for TaskId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // hyphenated lowercase, same as the controller sends it
        self.0.hyphenated().fmt(f)
    }
}
