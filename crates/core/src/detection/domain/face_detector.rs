use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Finds face boxes in a frame.
///
/// The tracker only calls this on detection frames and reuses the last
/// result in between, so implementations should not assume they see every
/// frame.
pub trait FaceDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Region>, Box<dyn std::error::Error>>;
}
