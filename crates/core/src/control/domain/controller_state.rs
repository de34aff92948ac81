use serde::{Deserialize, Serialize};

/// Inclusive range of commandable servo angles, in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AngleBounds {
    pub min: i32,
    pub max: i32,
}

impl AngleBounds {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, angle: i32) -> bool {
        (self.min..=self.max).contains(&angle)
    }

    pub fn clamp(&self, angle: f64) -> f64 {
        angle.clamp(self.min as f64, self.max as f64)
    }
}

/// Current commanded pan/tilt pair, in whole degrees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerState {
    pub pan: i32,
    pub tilt: i32,
}

impl ControllerState {
    pub fn new(pan: i32, tilt: i32) -> Self {
        Self { pan, tilt }
    }
}

impl std::fmt::Display for ControllerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PAN: {} TILT: {}", self.pan, self.tilt)
    }
}
