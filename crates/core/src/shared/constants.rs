//! Rig tuning defaults. Empirically tuned for one camera/servo mount; every
//! value here can be overridden through `TrackerConfig`.

/// Run the face detector every Nth frame.
pub const DETECT_INTERVAL: u64 = 2;
/// Send an actuation command every Nth frame.
pub const ACTUATE_INTERVAL: u64 = 4;

/// Pixels of horizontal offset per degree of pan.
pub const PAN_PIXELS_PER_DEGREE: f64 = 40.0;
/// Pixels of vertical offset per degree of tilt.
pub const TILT_PIXELS_PER_DEGREE: f64 = 60.0;

/// Pan deltas smaller than this (in degrees) are ignored.
pub const PAN_DEADBAND: f64 = 3.0;
/// Tilt deltas smaller than this (in degrees) are ignored.
pub const TILT_DEADBAND: f64 = 1.0;

pub const START_PAN: i32 = 90;
pub const START_TILT: i32 = 25;

pub const MIN_ANGLE: i32 = 0;
pub const MAX_ANGLE: i32 = 180;

/// Nose-projection distance (pixels) below which a face counts as facing the camera.
pub const FACING_RADIUS: f64 = 270.0;

pub const ACTUATOR_HOST: &str = "localhost";
pub const ACTUATOR_PORT: u16 = 5000;
pub const ACTUATOR_TIMEOUT_MS: u64 = 2000;
pub const ACTUATOR_WORKERS: usize = 2;
pub const ACTUATOR_QUEUE_CAPACITY: usize = 4;

pub const COMMANDER_HOST: &str = "10.18.244.167";
pub const COMMANDER_PORT: u16 = 26784;
pub const COMMANDER_CONNECT_TIMEOUT_MS: u64 = 3000;

/// Frames per frame-rate measurement window.
pub const FPS_WINDOW_FRAMES: usize = 100;
