use std::sync::Arc;

use super::recorded_session::RecordedSession;
use crate::capture::domain::frame_source::{FrameSource, SourceMetadata};
use crate::shared::frame::Frame;

/// Replays a recorded session frame by frame, at the recorded frame size.
pub struct RecordedFrameSource {
    session: Arc<RecordedSession>,
    opened: bool,
}

impl RecordedFrameSource {
    pub fn new(session: Arc<RecordedSession>) -> Self {
        Self {
            session,
            opened: false,
        }
    }
}

impl FrameSource for RecordedFrameSource {
    fn open(&mut self) -> Result<SourceMetadata, Box<dyn std::error::Error>> {
        self.session.validate()?;
        self.opened = true;
        Ok(SourceMetadata {
            width: self.session.width,
            height: self.session.height,
            total_frames: Some(self.session.frames.len()),
        })
    }

    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
        if !self.opened {
            let not_opened: Result<Frame, Box<dyn std::error::Error>> =
                Err("Frame source not opened".into());
            return Box::new(std::iter::once(not_opened));
        }
        let (width, height) = (self.session.width, self.session.height);
        Box::new((0..self.session.frames.len()).map(
            move |i| -> Result<Frame, Box<dyn std::error::Error>> {
                Ok(Frame::new(width, height, i))
            },
        ))
    }

    fn close(&mut self) {
        self.opened = false;
    }
}
