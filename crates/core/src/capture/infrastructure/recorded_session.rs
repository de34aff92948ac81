//! Recorded tracking sessions: per-frame face observations captured ahead
//! of time, replayed in place of a live camera, detector and pose solver.
//!
//! ```json
//! { "width": 1280, "height": 720,
//!   "frames": [ { "faces": [ { "bbox": [x, y, w, h],
//!                              "nose_tip": [x, y], "nose_end": [x, y] } ] } ] }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::detection::domain::pose_estimator::HeadPose;
use crate::shared::point::Point;
use crate::shared::region::Region;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("failed to read session {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse session {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid session: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordedFace {
    pub bbox: Region,
    pub nose_tip: Point,
    pub nose_end: Point,
}

impl RecordedFace {
    pub fn pose(&self) -> HeadPose {
        HeadPose::new(self.nose_tip, self.nose_end)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordedFrame {
    #[serde(default)]
    pub faces: Vec<RecordedFace>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordedSession {
    pub width: u32,
    pub height: u32,
    pub frames: Vec<RecordedFrame>,
}

impl RecordedSession {
    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let json = fs::read_to_string(path).map_err(|e| SessionError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let session: Self = serde_json::from_str(&json).map_err(|e| SessionError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        session.validate()?;
        log::info!(
            "Loaded session {}: {}x{}, {} frames",
            path.display(),
            session.width,
            session.height,
            session.frames.len()
        );
        Ok(session)
    }

    pub fn validate(&self) -> Result<(), SessionError> {
        if self.width == 0 || self.height == 0 {
            return Err(SessionError::Invalid(format!(
                "frame size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        for (index, frame) in self.frames.iter().enumerate() {
            if let Some(face) = frame
                .faces
                .iter()
                .find(|f| f.bbox.width <= 0 || f.bbox.height <= 0)
            {
                return Err(SessionError::Invalid(format!(
                    "frame {index}: face box must have positive size, got {}x{}",
                    face.bbox.width, face.bbox.height
                )));
            }
        }
        Ok(())
    }

    pub fn frame(&self, index: usize) -> Option<&RecordedFrame> {
        self.frames.get(index)
    }

    /// Faces recorded for a frame; empty past the end of the recording.
    pub fn faces(&self, index: usize) -> &[RecordedFace] {
        self.frame(index).map_or(&[], |f| f.faces.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    const SESSION_JSON: &str = r#"{
        "width": 1280,
        "height": 720,
        "frames": [
            { "faces": [ { "bbox": [600, 300, 80, 80], "nose_tip": [840, 240], "nose_end": [860, 250] } ] },
            {},
            { "faces": [] }
        ]
    }"#;

    fn write_session(dir: &TempDir, json: &str) -> PathBuf {
        let path = dir.path().join("session.json");
        fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn test_load_parses_frames_and_faces() {
        let tmp = TempDir::new().unwrap();
        let session = RecordedSession::load(&write_session(&tmp, SESSION_JSON)).unwrap();

        assert_eq!(session.width, 1280);
        assert_eq!(session.frames.len(), 3);
        let face = &session.faces(0)[0];
        assert_eq!(face.bbox, Region::new(600, 300, 80, 80));
        assert_eq!(face.pose().nose_tip, Point::new(840.0, 240.0));
        assert!(session.faces(1).is_empty());
        assert!(session.faces(2).is_empty());
    }

    #[test]
    fn test_faces_past_end_is_empty() {
        let tmp = TempDir::new().unwrap();
        let session = RecordedSession::load(&write_session(&tmp, SESSION_JSON)).unwrap();
        assert!(session.faces(99).is_empty());
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let tmp = TempDir::new().unwrap();
        let result = RecordedSession::load(&tmp.path().join("missing.json"));
        assert!(matches!(result, Err(SessionError::Read { .. })));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        let result = RecordedSession::load(&write_session(&tmp, r#"{ "width": 1 }"#));
        assert!(matches!(result, Err(SessionError::Parse { .. })));
    }

    #[test]
    fn test_zero_size_is_invalid() {
        let tmp = TempDir::new().unwrap();
        let json = r#"{ "width": 0, "height": 720, "frames": [] }"#;
        let result = RecordedSession::load(&write_session(&tmp, json));
        assert!(matches!(result, Err(SessionError::Invalid(_))));
    }

    #[rstest]
    #[case::zero_width("[600, 300, 0, 80]")]
    #[case::negative_height("[600, 300, 80, -5]")]
    #[case::negative_width_near_i32_max("[2147483000, 0, -1000, 10]")]
    fn test_face_box_without_positive_size_is_invalid(#[case] bbox: &str) {
        let tmp = TempDir::new().unwrap();
        let json = format!(
            r#"{{ "width": 1280, "height": 720, "frames": [ {{}}, {{ "faces": [ {{ "bbox": {bbox}, "nose_tip": [0, 0], "nose_end": [0, 0] }} ] }} ] }}"#
        );
        match RecordedSession::load(&write_session(&tmp, &json)) {
            Err(SessionError::Invalid(message)) => assert!(message.starts_with("frame 1:")),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }
}
