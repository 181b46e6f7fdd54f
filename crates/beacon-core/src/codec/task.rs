//! Task descriptor decoding.
//!
//! # 寛容な scalar 読み取り
//! property-tree 系のコントローラは全ての値を文字列化して送ってくるため、
//! `depth` / `dwell` / `running` は JSON ネイティブ値でも文字列表現でも受け付けます。

use std::collections::HashSet;
use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::domain::{Configuration, Task, TaskId, TaskKind};
use crate::error::DecodeError;

type Object = Map<String, Value>;

/// Result of decoding one response body.
///
/// `rejected` keeps the position of each skipped descriptor so the caller
/// can log it; the accepted tasks stay in document order.
#[derive(Debug, Default)]
pub struct DecodedBatch {
    pub tasks: Vec<Task>,
    pub rejected: Vec<(usize, DecodeError)>,
}

/// Decode a single wire descriptor into a typed task.
pub fn decode_task(node: &Value) -> Result<Task, DecodeError> {
    let obj = node.as_object().ok_or(DecodeError::NotAnObject)?;

    let type_name = required_str(obj, "type")?;
    let raw_id = required_str(obj, "id")?;
    let id: TaskId = raw_id
        .parse()
        .map_err(|_| DecodeError::MalformedId(raw_id.to_string()))?;
    let kind = TaskKind::parse(type_name)
        .ok_or_else(|| DecodeError::UnknownTaskType(type_name.to_string()))?;

    let task = match kind {
        TaskKind::Get => Task::Get {
            id,
            path: required_path(obj)?,
        },
        TaskKind::Put => Task::Put {
            id,
            path: required_path(obj)?,
            contents: required_str(obj, "contents")?.to_string(),
        },
        TaskKind::List => Task::List {
            id,
            path: required_path(obj)?,
            depth: required_u8(obj, "depth")?,
        },
        TaskKind::Delete => Task::Delete {
            id,
            path: required_path(obj)?,
        },
        TaskKind::Execute => Task::Execute {
            id,
            command: required_str(obj, "command")?.to_string(),
        },
        TaskKind::Configure => {
            let dwell = required_f64(obj, "dwell")?;
            let running = required_bool(obj, "running")?;
            let configuration =
                Configuration::new(dwell, running).map_err(|e| invalid("dwell", e))?;
            Task::Configure { id, configuration }
        }
    };
    Ok(task)
}

/// Decode a whole response body.
///
/// The body is a JSON object whose values are descriptors (or an array of
/// descriptors); a blank body is an empty batch. Each descriptor is decoded
/// on its own, so one bad entry never drops its siblings. Only a body that
/// is not JSON at all fails the batch.
pub fn decode_batch(body: &str) -> Result<DecodedBatch, DecodeError> {
    if body.trim().is_empty() {
        return Ok(DecodedBatch::default());
    }

    let root: Value =
        serde_json::from_str(body).map_err(|e| DecodeError::MalformedBody(e.to_string()))?;
    let entries: Vec<&Value> = match &root {
        Value::Object(map) => map.values().collect(),
        Value::Array(items) => items.iter().collect(),
        other => {
            return Err(DecodeError::MalformedBody(format!(
                "expected an object or an array of tasks, got {}",
                json_kind(other)
            )));
        }
    };

    let mut batch = DecodedBatch::default();
    let mut seen = HashSet::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match decode_task(entry) {
            Ok(task) if !seen.insert(task.id()) => {
                batch
                    .rejected
                    .push((index, DecodeError::DuplicateId(task.id())));
            }
            Ok(task) => batch.tasks.push(task),
            Err(e) => batch.rejected.push((index, e)),
        }
    }
    Ok(batch)
}

fn required<'a>(obj: &'a Object, field: &'static str) -> Result<&'a Value, DecodeError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(DecodeError::MissingField(field)),
        Some(value) => Ok(value),
    }
}

fn required_str<'a>(obj: &'a Object, field: &'static str) -> Result<&'a str, DecodeError> {
    required(obj, field)?
        .as_str()
        .ok_or_else(|| invalid(field, "expected a string"))
}

fn required_path(obj: &Object) -> Result<PathBuf, DecodeError> {
    required_str(obj, "path").map(PathBuf::from)
}

fn required_u8(obj: &Object, field: &'static str) -> Result<u8, DecodeError> {
    match required(obj, field)? {
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| u8::try_from(n).ok())
            .ok_or_else(|| invalid(field, format!("{n} is not in 0..=255"))),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| invalid(field, format!("{s:?} is not in 0..=255"))),
        other => Err(invalid(field, format!("expected a number, got {}", json_kind(other)))),
    }
}

fn required_f64(obj: &Object, field: &'static str) -> Result<f64, DecodeError> {
    match required(obj, field)? {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| invalid(field, format!("{n} is not a float"))),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| invalid(field, format!("{s:?} is not a float"))),
        other => Err(invalid(field, format!("expected a number, got {}", json_kind(other)))),
    }
}

fn required_bool(obj: &Object, field: &'static str) -> Result<bool, DecodeError> {
    match required(obj, field)? {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => match s.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(invalid(field, format!("{s:?} is not a boolean"))),
        },
        other => Err(invalid(field, format!("expected a boolean, got {}", json_kind(other)))),
    }
}

fn invalid(field: &'static str, reason: impl ToString) -> DecodeError {
    DecodeError::InvalidField {
        field,
        reason: reason.to_string(),
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
