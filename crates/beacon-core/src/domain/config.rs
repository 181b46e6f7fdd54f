//! Beacon timing / run-state configuration carried by `configure` tasks.

use std::time::Duration;

use crate::error::ConfigError;

/// Mean dwell used until a controller says otherwise.
pub const DEFAULT_MEAN_DWELL_SECS: f64 = 1.0;

/// The `(mean_dwell, running)` pair.
///
/// Always valid once constructed: `mean_dwell` is a positive, finite number
/// of seconds. It is replaced as a whole, never field by field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Configuration {
    mean_dwell: f64,
    running: bool,
}

impl Configuration {
    pub fn new(mean_dwell: f64, running: bool) -> Result<Self, ConfigError> {
        if !mean_dwell.is_finite() || mean_dwell <= 0.0 {
            return Err(ConfigError::InvalidDwell(mean_dwell));
        }
        Ok(Self {
            mean_dwell,
            running,
        })
    }

    /// Mean dwell in seconds.
    pub fn mean_dwell(&self) -> f64 {
        self.mean_dwell
    }

    pub fn mean_dwell_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.mean_dwell).unwrap_or(Duration::MAX)
    }

    pub fn running(&self) -> bool {
        self.running
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            mean_dwell: DEFAULT_MEAN_DWELL_SECS,
            running: true,
        }
    }
}
