use crate::shared::frame::Frame;
use crate::shared::point::Point;
use crate::shared::region::Region;

/// Head pose reduced to the two image points the tracker consumes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeadPose {
    /// Nose-tip landmark in frame pixels.
    pub nose_tip: Point,
    /// Projection of a point straight out along the nose direction.
    pub nose_end: Point,
}

impl HeadPose {
    pub fn new(nose_tip: Point, nose_end: Point) -> Self {
        Self { nose_tip, nose_end }
    }

    /// How far the projected nose direction lands from the nose tip.
    /// Small values mean the face points at the camera.
    pub fn facing_distance(&self) -> f64 {
        self.nose_tip.distance_to(&self.nose_end)
    }
}

/// Landmark prediction and pose solving for one detected face.
///
/// Runs on every frame, including frames where detection was skipped and
/// `face` comes from an earlier detection. Returns `None` when no pose can
/// be recovered for the face on this frame.
pub trait PoseEstimator: Send {
    fn estimate(
        &mut self,
        frame: &Frame,
        face: &Region,
    ) -> Result<Option<HeadPose>, Box<dyn std::error::Error>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_facing_distance() {
        let pose = HeadPose::new(Point::new(600.0, 300.0), Point::new(630.0, 340.0));
        assert_relative_eq!(pose.facing_distance(), 50.0);
    }

    #[test]
    fn test_facing_distance_zero_when_points_coincide() {
        let p = Point::new(12.0, 34.0);
        assert_relative_eq!(HeadPose::new(p, p).facing_distance(), 0.0);
    }
}
