use serde::{Deserialize, Serialize};

/// An axis-aligned face box in pixel coordinates, as returned by a detector.
///
/// Serialized as `[x, y, width, height]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(i32, i32, i32, i32)", into = "(i32, i32, i32, i32)")]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right and bottom edges, widened so boxes near `i32::MAX` cannot overflow.
    fn far_edges(&self) -> (i64, i64) {
        (
            self.x as i64 + self.width as i64,
            self.y as i64 + self.height as i64,
        )
    }

    pub fn iou(&self, other: &Region) -> f64 {
        let (ax2, ay2) = self.far_edges();
        let (bx2, by2) = other.far_edges();
        let ix1 = self.x.max(other.x) as i64;
        let iy1 = self.y.max(other.y) as i64;
        let ix2 = ax2.min(bx2);
        let iy2 = ay2.min(by2);

        let inter = (ix2 - ix1).max(0) as f64 * (iy2 - iy1).max(0) as f64;
        if inter == 0.0 {
            return 0.0;
        }

        let area_a = self.width as f64 * self.height as f64;
        let area_b = other.width as f64 * other.height as f64;
        inter / (area_a + area_b - inter)
    }
}

impl From<(i32, i32, i32, i32)> for Region {
    fn from((x, y, width, height): (i32, i32, i32, i32)) -> Self {
        Self::new(x, y, width, height)
    }
}

impl From<Region> for (i32, i32, i32, i32) {
    fn from(r: Region) -> Self {
        (r.x, r.y, r.width, r.height)
    }
}
