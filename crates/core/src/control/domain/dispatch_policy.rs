use crate::shared::tracker_config::TrackerConfig;

/// Frame decimation for the two expensive per-frame operations.
///
/// Detection runs on frames where `index % detect_interval == 0`; actuation
/// commands go out where `index % actuate_interval == 0`. The frame counter
/// itself is owned by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DispatchPolicy {
    detect_interval: u64,
    actuate_interval: u64,
}

impl DispatchPolicy {
    pub fn new(detect_interval: u64, actuate_interval: u64) -> Result<Self, &'static str> {
        if detect_interval < 1 {
            return Err("detect_interval must be >= 1");
        }
        if actuate_interval < 1 {
            return Err("actuate_interval must be >= 1");
        }
        Ok(Self {
            detect_interval,
            actuate_interval,
        })
    }

    pub fn from_config(config: &TrackerConfig) -> Result<Self, &'static str> {
        Self::new(config.detect_interval, config.actuate_interval)
    }

    pub fn detect_interval(&self) -> u64 {
        self.detect_interval
    }

    pub fn actuate_interval(&self) -> u64 {
        self.actuate_interval
    }

    pub fn should_detect(&self, frame_index: u64) -> bool {
        frame_index % self.detect_interval == 0
    }

    pub fn should_actuate(&self, frame_index: u64) -> bool {
        frame_index % self.actuate_interval == 0
    }
}
