use crate::shared::point::Point;

/// Signed pixel offset of a face's reference point from the frame centre.
///
/// Positive `dx` is right of centre, positive `dy` is below centre.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Measurement {
    pub dx: i32,
    pub dy: i32,
}

impl Measurement {
    pub fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Offset of `point` from `center`, truncated toward zero.
    pub fn from_offset(point: Point, center: (i32, i32)) -> Self {
        Self {
            dx: (point.x - center.0 as f64) as i32,
            dy: (point.y - center.1 as f64) as i32,
        }
    }
}
