//! Deadbanded proportional pan/tilt controller.
//!
//! Each axis converts its pixel offset to degrees with a fixed scale, drops
//! deltas inside the deadband, and steps the stored angle. Tilt steps
//! against the offset: a face below centre (positive `dy`) tilts the camera
//! down. No smoothing, integral or derivative term is applied.

use serde::{Deserialize, Serialize};

use super::controller_state::{AngleBounds, ControllerState};
use super::measurement::Measurement;
use crate::shared::tracker_config::TrackerConfig;

/// Pixel-to-degree scale and deadband for one axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisGain {
    pub pixels_per_degree: f64,
    /// Deltas with magnitude below this (degrees) are discarded.
    pub deadband: f64,
}

impl AxisGain {
    pub fn new(pixels_per_degree: f64, deadband: f64) -> Self {
        Self {
            pixels_per_degree,
            deadband,
        }
    }

    /// Angular delta for a pixel offset, or `None` inside the deadband.
    pub fn delta(&self, offset: i32) -> Option<f64> {
        let delta = offset as f64 / self.pixels_per_degree;
        if delta.abs() < self.deadband {
            None
        } else {
            Some(delta)
        }
    }
}

pub struct PanTiltController {
    pan: AxisGain,
    tilt: AxisGain,
    bounds: AngleBounds,
    state: ControllerState,
}

impl PanTiltController {
    pub fn new(pan: AxisGain, tilt: AxisGain, bounds: AngleBounds, initial: ControllerState) -> Self {
        let state = ControllerState::new(
            bounds.clamp(initial.pan as f64) as i32,
            bounds.clamp(initial.tilt as f64) as i32,
        );
        Self {
            pan,
            tilt,
            bounds,
            state,
        }
    }

    pub fn from_config(config: &TrackerConfig) -> Self {
        Self::new(config.pan, config.tilt, config.bounds, config.initial_state())
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Folds one measurement into the stored angles and returns the new pair.
    pub fn update(&mut self, measurement: Measurement) -> ControllerState {
        if let Some(delta) = self.pan.delta(measurement.dx) {
            self.state.pan = self.step("pan", self.state.pan, delta);
        }
        if let Some(delta) = self.tilt.delta(measurement.dy) {
            self.state.tilt = self.step("tilt", self.state.tilt, -delta);
        }
        self.state
    }

    /// Adds `delta`, clamps to bounds, and truncates to whole degrees.
    fn step(&self, axis: &str, current: i32, delta: f64) -> i32 {
        let target = current as f64 + delta;
        let clamped = self.bounds.clamp(target);
        if clamped != target {
            log::debug!("{axis} angle {target:.1} out of range, using {clamped}");
        }
        clamped as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn controller(pan: i32, tilt: i32) -> PanTiltController {
        PanTiltController::new(
            AxisGain::new(40.0, 3.0),
            AxisGain::new(60.0, 1.0),
            AngleBounds::new(0, 180),
            ControllerState::new(pan, tilt),
        )
    }

    const OFFSETS: [i32; 13] = [
        -100_000, -5000, -2000, -200, -120, -119, -61, 0, 61, 119, 120, 200, 100_000,
    ];

    #[test]
    fn test_scenario_moves_both_axes() {
        let mut c = controller(90, 25);
        let state = c.update(Measurement::new(200, -120));
        assert_eq!(state, ControllerState::new(95, 27));
        assert_eq!(c.state(), state);
    }

    #[test]
    fn test_scenario_clamps_pan_at_max() {
        let mut c = controller(178, 25);
        let state = c.update(Measurement::new(2000, 0));
        assert_eq!(state.pan, 180);
        assert_eq!(state.tilt, 25);
    }

    #[test]
    fn test_zero_offset_never_changes_state() {
        for (pan, tilt) in [(0, 0), (90, 25), (180, 180), (3, 177)] {
            let mut c = controller(pan, tilt);
            assert_eq!(c.update(Measurement::new(0, 0)), ControllerState::new(pan, tilt));
        }
    }

    #[rstest]
    #[case::just_inside_pan(119, 0)]
    #[case::just_inside_pan_negative(-119, 0)]
    #[case::inside_tilt(0, 59)]
    #[case::inside_tilt_negative(0, -59)]
    #[case::inside_both(100, 30)]
    fn test_deadband_holds_axis_still(#[case] dx: i32, #[case] dy: i32) {
        let mut c = controller(90, 25);
        assert_eq!(c.update(Measurement::new(dx, dy)), ControllerState::new(90, 25));
    }

    #[test]
    fn test_deadband_is_per_axis() {
        // dx inside pan deadband, dy outside tilt deadband
        let mut c = controller(90, 25);
        let state = c.update(Measurement::new(100, 120));
        assert_eq!(state.pan, 90);
        assert_eq!(state.tilt, 23);
    }

    #[test]
    fn test_deadband_boundary_applies() {
        // exactly 3 degrees of pan, exactly 1 degree of tilt
        let mut c = controller(90, 25);
        let state = c.update(Measurement::new(120, 60));
        assert_eq!(state, ControllerState::new(93, 24));
    }

    #[test]
    fn test_pan_inside_deadband_for_all_tilt_offsets() {
        for &dy in &OFFSETS {
            for dx in -119..=119 {
                let mut c = controller(90, 25);
                assert_eq!(c.update(Measurement::new(dx, dy)).pan, 90);
            }
        }
    }

    #[test]
    fn test_clamp_invariant_holds_for_extreme_inputs() {
        for &start in &[(0, 0), (90, 25), (180, 180), (1, 179)] {
            for &dx in &OFFSETS {
                for &dy in &OFFSETS {
                    let mut c = controller(start.0, start.1);
                    let state = c.update(Measurement::new(dx, dy));
                    assert!((0..=180).contains(&state.pan), "pan {} for {dx},{dy}", state.pan);
                    assert!((0..=180).contains(&state.tilt), "tilt {} for {dx},{dy}", state.tilt);
                }
            }
        }
    }

    #[test]
    fn test_clamp_invariant_holds_across_repeated_updates() {
        let mut c = controller(90, 25);
        for _ in 0..50 {
            let state = c.update(Measurement::new(100_000, 100_000));
            assert!((0..=180).contains(&state.pan));
            assert!((0..=180).contains(&state.tilt));
        }
        assert_eq!(c.state(), ControllerState::new(180, 0));
    }

    #[test]
    fn test_positive_dy_strictly_decreases_tilt() {
        for dy in [60, 61, 90, 120, 600] {
            let mut c = controller(90, 90);
            assert!(c.update(Measurement::new(0, dy)).tilt < 90, "dy={dy}");
        }
    }

    #[test]
    fn test_negative_dy_strictly_increases_tilt() {
        for dy in [-60, -61, -90, -120, -600] {
            let mut c = controller(90, 90);
            assert!(c.update(Measurement::new(0, dy)).tilt > 90, "dy={dy}");
        }
    }

    #[test]
    fn test_tilt_saturates_at_bounds() {
        let mut down = controller(90, 1);
        assert_eq!(down.update(Measurement::new(0, 6000)).tilt, 0);
        let mut up = controller(90, 179);
        assert_eq!(up.update(Measurement::new(0, -6000)).tilt, 180);
    }

    #[test]
    fn test_pan_follows_offset_sign() {
        let mut right = controller(90, 25);
        assert!(right.update(Measurement::new(400, 0)).pan > 90);
        let mut left = controller(90, 25);
        assert!(left.update(Measurement::new(-400, 0)).pan < 90);
    }

    #[test]
    fn test_fractional_step_truncates_toward_zero() {
        // -130 / 40 = -3.25 -> 86.75 -> 86
        let mut c = controller(90, 25);
        assert_eq!(c.update(Measurement::new(-130, 0)).pan, 86);
    }

    #[test]
    fn test_state_accumulates_across_updates() {
        let mut c = controller(90, 25);
        c.update(Measurement::new(200, 0));
        c.update(Measurement::new(200, 0));
        assert_eq!(c.state().pan, 100);
    }

    #[test]
    fn test_initial_state_is_clamped() {
        let c = controller(250, -5);
        assert_eq!(c.state(), ControllerState::new(180, 0));
    }

    #[test]
    fn test_from_config_uses_configured_start() {
        let c = PanTiltController::from_config(&TrackerConfig::default());
        assert_eq!(c.state(), ControllerState::new(90, 25));
    }

    #[test]
    fn test_axis_gain_delta() {
        let gain = AxisGain::new(40.0, 3.0);
        assert_eq!(gain.delta(200), Some(5.0));
        assert_eq!(gain.delta(-120), Some(-3.0));
        assert_eq!(gain.delta(119), None);
    }
}
