//! Codec - wire JSON と型付きモデルの相互変換
//!
//! - **task**: コントローラの task descriptor → [`Task`](crate::domain::Task)
//! - **result**: [`TaskResult`](crate::domain::TaskResult) → `"<id>.contents"` / `"<id>.success"` マップ
//!
//! JSON のパース自体は serde_json に任せ、ここではスキーマだけを扱います。

pub mod result;
pub mod task;

pub use self::result::{decode_results, encode_request_body, encode_results};
pub use self::task::{DecodedBatch, decode_batch, decode_task};
