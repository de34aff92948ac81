use std::sync::Arc;

use crate::capture::infrastructure::recorded_session::RecordedSession;
use crate::detection::domain::pose_estimator::{HeadPose, PoseEstimator};
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Looks up the recorded pose of a face on the current frame.
///
/// The queried box may come from an earlier detection frame, so the face
/// is re-associated by best box overlap. No overlap means the face was lost.
/// Each recorded face answers at most one query per frame, so two stale
/// boxes over the same face do not steer the mount twice.
pub struct RecordedPoseEstimator {
    session: Arc<RecordedSession>,
    claimed_frame: Option<usize>,
    claimed: Vec<bool>,
}

impl RecordedPoseEstimator {
    pub fn new(session: Arc<RecordedSession>) -> Self {
        Self {
            session,
            claimed_frame: None,
            claimed: Vec::new(),
        }
    }
}

impl PoseEstimator for RecordedPoseEstimator {
    fn estimate(
        &mut self,
        frame: &Frame,
        face: &Region,
    ) -> Result<Option<HeadPose>, Box<dyn std::error::Error>> {
        let recorded = self.session.faces(frame.index());
        if self.claimed_frame != Some(frame.index()) {
            self.claimed_frame = Some(frame.index());
            self.claimed.clear();
            self.claimed.resize(recorded.len(), false);
        }

        let best = recorded
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.claimed[*i])
            .map(|(i, candidate)| (i, candidate.bbox.iou(face)))
            .filter(|(_, iou)| *iou > 0.0)
            .max_by(|a, b| a.1.total_cmp(&b.1));

        Ok(best.map(|(i, _)| {
            self.claimed[i] = true;
            recorded[i].pose()
        }))
    }
}
