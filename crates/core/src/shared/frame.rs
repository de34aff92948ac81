/// One frame as seen by the control core: its geometry and its index.
///
/// Pixel data stays with the detector and pose collaborators; the core only
/// needs the centre to measure offsets and the index to drive cadences.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    index: usize,
}

impl Frame {
    pub fn new(width: u32, height: u32, index: usize) -> Self {
        Self {
            width,
            height,
            index,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Geometric centre in whole pixels (integer halves, rounded down).
    pub fn center(&self) -> (i32, i32) {
        ((self.width / 2) as i32, (self.height / 2) as i32)
    }
}
