use std::sync::Arc;

use crate::capture::infrastructure::recorded_session::RecordedSession;
use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Replays the face boxes recorded for each frame index.
pub struct RecordedFaceDetector {
    session: Arc<RecordedSession>,
}

impl RecordedFaceDetector {
    pub fn new(session: Arc<RecordedSession>) -> Self {
        Self { session }
    }
}

impl FaceDetector for RecordedFaceDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Region>, Box<dyn std::error::Error>> {
        Ok(self
            .session
            .faces(frame.index())
            .iter()
            .map(|face| face.bbox)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::infrastructure::recorded_session::{RecordedFace, RecordedFrame};
    use crate::shared::point::Point;

    fn face(x: i32) -> RecordedFace {
        RecordedFace {
            bbox: Region::new(x, 20, 50, 50),
            nose_tip: Point::new(x as f64 + 25.0, 45.0),
            nose_end: Point::new(x as f64 + 25.0, 45.0),
        }
    }

    fn detector() -> RecordedFaceDetector {
        RecordedFaceDetector::new(Arc::new(RecordedSession {
            width: 100,
            height: 100,
            frames: vec![
                RecordedFrame {
                    faces: vec![face(10), face(60)],
                },
                RecordedFrame::default(),
            ],
        }))
    }

    #[test]
    fn test_returns_recorded_boxes_for_frame() {
        let regions = detector().detect(&Frame::new(100, 100, 0)).unwrap();
        assert_eq!(regions, vec![Region::new(10, 20, 50, 50), Region::new(60, 20, 50, 50)]);
    }

    #[test]
    fn test_empty_frame_returns_no_faces() {
        let regions = detector().detect(&Frame::new(100, 100, 1)).unwrap();
        assert!(regions.is_empty());
    }

    #[test]
    fn test_unknown_frame_returns_no_faces() {
        let regions = detector().detect(&Frame::new(100, 100, 42)).unwrap();
        assert!(regions.is_empty());
    }
}
