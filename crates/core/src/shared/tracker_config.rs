use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::control::domain::controller_state::{AngleBounds, ControllerState};
use crate::control::domain::pan_tilt_controller::AxisGain;
use crate::shared::constants::*;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActuatorConfig {
    pub host: String,
    pub port: u16,
    pub timeout_ms: u64,
    pub workers: usize,
    pub queue_capacity: usize,
}

impl Default for ActuatorConfig {
    fn default() -> Self {
        Self {
            host: ACTUATOR_HOST.to_string(),
            port: ACTUATOR_PORT,
            timeout_ms: ACTUATOR_TIMEOUT_MS,
            workers: ACTUATOR_WORKERS,
            queue_capacity: ACTUATOR_QUEUE_CAPACITY,
        }
    }
}

impl ActuatorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommanderConfig {
    pub host: String,
    pub port: u16,
    pub connect_timeout_ms: u64,
}

impl Default for CommanderConfig {
    fn default() -> Self {
        Self {
            host: COMMANDER_HOST.to_string(),
            port: COMMANDER_PORT,
            connect_timeout_ms: COMMANDER_CONNECT_TIMEOUT_MS,
        }
    }
}

impl CommanderConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

/// Everything the tracking loop needs that is fixed for a run.
///
/// Missing fields in a config file fall back to the rig defaults in
/// [`crate::shared::constants`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub detect_interval: u64,
    pub actuate_interval: u64,
    pub pan: AxisGain,
    pub tilt: AxisGain,
    pub start_pan: i32,
    pub start_tilt: i32,
    pub bounds: AngleBounds,
    pub facing_radius: f64,
    pub actuator: ActuatorConfig,
    pub commander: CommanderConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            detect_interval: DETECT_INTERVAL,
            actuate_interval: ACTUATE_INTERVAL,
            pan: AxisGain::new(PAN_PIXELS_PER_DEGREE, PAN_DEADBAND),
            tilt: AxisGain::new(TILT_PIXELS_PER_DEGREE, TILT_DEADBAND),
            start_pan: START_PAN,
            start_tilt: START_TILT,
            bounds: AngleBounds::new(MIN_ANGLE, MAX_ANGLE),
            facing_radius: FACING_RADIUS,
            actuator: ActuatorConfig::default(),
            commander: CommanderConfig::default(),
        }
    }
}

impl TrackerConfig {
    /// Reads and validates a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_str(&json).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn initial_state(&self) -> ControllerState {
        ControllerState::new(self.start_pan, self.start_tilt)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.detect_interval == 0 {
            return Err(invalid("detect_interval must be >= 1"));
        }
        if self.actuate_interval == 0 {
            return Err(invalid("actuate_interval must be >= 1"));
        }
        for (name, gain) in [("pan", &self.pan), ("tilt", &self.tilt)] {
            if !(gain.pixels_per_degree > 0.0) {
                return Err(invalid(&format!(
                    "{name}.pixels_per_degree must be positive, got {}",
                    gain.pixels_per_degree
                )));
            }
            if !(gain.deadband >= 0.0) {
                return Err(invalid(&format!(
                    "{name}.deadband must not be negative, got {}",
                    gain.deadband
                )));
            }
        }
        if self.bounds.min > self.bounds.max {
            return Err(invalid(&format!(
                "bounds.min ({}) must not exceed bounds.max ({})",
                self.bounds.min, self.bounds.max
            )));
        }
        for (name, angle) in [("start_pan", self.start_pan), ("start_tilt", self.start_tilt)] {
            if !self.bounds.contains(angle) {
                return Err(invalid(&format!(
                    "{name} ({angle}) is outside [{}, {}]",
                    self.bounds.min, self.bounds.max
                )));
            }
        }
        if !(self.facing_radius > 0.0) {
            return Err(invalid(&format!(
                "facing_radius must be positive, got {}",
                self.facing_radius
            )));
        }
        if self.actuator.workers == 0 {
            return Err(invalid("actuator.workers must be >= 1"));
        }
        if self.actuator.queue_capacity == 0 {
            return Err(invalid("actuator.queue_capacity must be >= 1"));
        }
        if self.actuator.timeout_ms == 0 {
            return Err(invalid("actuator.timeout_ms must be >= 1"));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::Invalid(message.to_string())
}
