use crate::shared::frame::Frame;

/// Geometry and length of an opened frame source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceMetadata {
    pub width: u32,
    pub height: u32,
    /// `None` for live sources with no known end.
    pub total_frames: Option<usize>,
}

/// Produces frames for the tracking loop.
///
/// Implementations handle capture details (camera pipeline, network
/// stream, recording) while the tracker works with the abstract `Frame`.
/// A source that cannot be opened is fatal to the run.
pub trait FrameSource: Send {
    fn open(&mut self) -> Result<SourceMetadata, Box<dyn std::error::Error>>;

    /// Returns an iterator over frames in capture order.
    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_>;

    fn close(&mut self);
}
