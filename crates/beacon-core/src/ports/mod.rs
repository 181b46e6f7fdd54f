//! Ports - 抽象化レイヤー
//!
//! コアが外部（コントローラ・乱数）に依存する箇所を trait で切り出します。
//! 実装は `impls` にあります。

pub mod dwell;
pub mod transport;

pub use self::dwell::{DwellSampler, ExponentialDwell, FixedDwell};
pub use self::transport::Transport;
