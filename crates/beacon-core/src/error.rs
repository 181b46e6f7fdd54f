use thiserror::Error;

use crate::domain::TaskId;

/// A task descriptor (or a whole response body) that could not be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("task descriptor is not a JSON object")]
    NotAnObject,

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` is invalid: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("malformed task id {0:?}")]
    MalformedId(String),

    #[error("unknown task type {0:?}")]
    UnknownTaskType(String),

    #[error("duplicate task id {0} in batch")]
    DuplicateId(TaskId),

    #[error("malformed response body: {0}")]
    MalformedBody(String),
}

/// One request/response exchange with the controller failed.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http exchange failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("controller answered with status {0}")]
    Status(u16),

    #[error("controller unavailable: {0}")]
    Unavailable(String),
}

/// Bootstrap configuration that cannot be used.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("a controller host is required")]
    EmptyHost,

    #[error("a controller service (http, https or a port) is required")]
    EmptyService,

    #[error("unknown service {0:?}: expected http, https or a port number")]
    UnknownService(String),

    #[error("mean dwell must be a positive number of seconds, got {0}")]
    InvalidDwell(f64),

    #[error("execution poll interval must be greater than zero")]
    InvalidPollInterval,
}

/// Failure of a running agent. Bad configuration is caught earlier, by
/// `AgentBuilder::build`.
#[derive(Debug, Error)]
pub enum BeaconError {
    #[error("execution loop aborted: {0}")]
    Join(#[from] tokio::task::JoinError),
}
