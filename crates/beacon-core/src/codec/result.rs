//! Result map encoding.
//!
//! Wire shape: one flat JSON object, two keys per result:
//! `"<id>.contents": "<text>"` and `"<id>.success": <bool>`.

use std::collections::HashMap;

use serde_json::{Map, Value};

use super::task::json_kind;
use crate::domain::{TaskId, TaskResult};
use crate::error::DecodeError;

const CONTENTS_SUFFIX: &str = "contents";
const SUCCESS_SUFFIX: &str = "success";

/// Encode results into the wire map (empty map when there is nothing to send).
pub fn encode_results(results: &[TaskResult]) -> Map<String, Value> {
    let mut map = Map::with_capacity(results.len() * 2);
    for result in results {
        map.insert(
            format!("{}.{CONTENTS_SUFFIX}", result.id),
            Value::String(result.contents.clone()),
        );
        map.insert(
            format!("{}.{SUCCESS_SUFFIX}", result.id),
            Value::Bool(result.success),
        );
    }
    map
}

/// Request body for one beacon cycle.
pub fn encode_request_body(results: &[TaskResult]) -> String {
    Value::Object(encode_results(results)).to_string()
}

/// Inverse of [`encode_results`], for the controller side and for tests.
///
/// Results come back in the order their first key appears. Both halves of a
/// pair are required.
pub fn decode_results(map: &Map<String, Value>) -> Result<Vec<TaskResult>, DecodeError> {
    let mut order: Vec<TaskId> = Vec::new();
    let mut partial: HashMap<TaskId, (Option<String>, Option<bool>)> = HashMap::new();

    for (key, value) in map {
        let (raw_id, suffix) = key.rsplit_once('.').ok_or_else(|| DecodeError::InvalidField {
            field: "key",
            reason: format!("{key:?} is not <id>.contents or <id>.success"),
        })?;
        let id: TaskId = raw_id
            .parse()
            .map_err(|_| DecodeError::MalformedId(raw_id.to_string()))?;

        let entry = partial.entry(id).or_insert_with(|| {
            order.push(id);
            (None, None)
        });
        match suffix {
            CONTENTS_SUFFIX => {
                let text = value.as_str().ok_or_else(|| DecodeError::InvalidField {
                    field: "contents",
                    reason: format!("expected a string, got {}", json_kind(value)),
                })?;
                entry.0 = Some(text.to_string());
            }
            SUCCESS_SUFFIX => {
                let flag = match value {
                    Value::Bool(b) => *b,
                    Value::String(s) if s == "true" => true,
                    Value::String(s) if s == "false" => false,
                    other => {
                        return Err(DecodeError::InvalidField {
                            field: "success",
                            reason: format!("expected a boolean, got {}", json_kind(other)),
                        });
                    }
                };
                entry.1 = Some(flag);
            }
            other => {
                return Err(DecodeError::InvalidField {
                    field: "key",
                    reason: format!("unknown result field {other:?}"),
                });
            }
        }
    }

    order
        .into_iter()
        .map(|id| match partial.remove(&id) {
            Some((Some(contents), Some(success))) => Ok(TaskResult::new(id, contents, success)),
            Some((None, _)) => Err(DecodeError::MissingField("contents")),
            _ => Err(DecodeError::MissingField("success")),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_results_encode_to_empty_object() {
        assert_eq!(encode_request_body(&[]), "{}");
    }

    #[test]
    fn encodes_two_keys_per_result() {
        let id: TaskId = "3fa85f64-5717-4562-b3fc-2c963f66afa6".parse().unwrap();
        let map = encode_results(&[TaskResult::success(id, "hi")]);

        assert_eq!(map.len(), 2);
        assert_eq!(map["3fa85f64-5717-4562-b3fc-2c963f66afa6.contents"], json!("hi"));
        assert_eq!(map["3fa85f64-5717-4562-b3fc-2c963f66afa6.success"], json!(true));
    }

    #[test]
    fn results_survive_the_wire() {
        let results = vec![
            TaskResult::success(TaskId::random(), "line one\nline \"two\""),
            TaskResult::failure(TaskId::random(), "Couldn't open file."),
            TaskResult::success(TaskId::random(), ""),
        ];

        let body = encode_request_body(&results);
        let parsed: Value = serde_json::from_str(&body).unwrap();
        let decoded = decode_results(parsed.as_object().unwrap()).unwrap();

        assert_eq!(decoded, results);
    }

    #[test]
    fn stringified_success_is_accepted() {
        let id = TaskId::random();
        let mut map = Map::new();
        map.insert(format!("{id}.contents"), json!("ok"));
        map.insert(format!("{id}.success"), json!("true"));
        let decoded = decode_results(&map).unwrap();
        assert_eq!(decoded, vec![TaskResult::success(id, "ok")]);
    }

    #[test]
    fn half_a_pair_is_an_error() {
        let id = TaskId::random();
        let mut map = Map::new();
        map.insert(format!("{id}.contents"), json!("orphan"));
        assert!(matches!(
            decode_results(&map),
            Err(DecodeError::MissingField("success"))
        ));
    }

    #[test]
    fn unknown_suffix_is_an_error() {
        let id = TaskId::random();
        let mut map = Map::new();
        map.insert(format!("{id}.exit_code"), json!(0));
        assert!(matches!(
            decode_results(&map),
            Err(DecodeError::InvalidField { field: "key", .. })
        ));
    }
}
