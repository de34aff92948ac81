use super::pose_estimator::HeadPose;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FacingState {
    Facing,
    NotFacing,
}

impl FacingState {
    /// A face is facing when its facing distance is strictly inside `radius`.
    pub fn classify(facing_distance: f64, radius: f64) -> Self {
        if facing_distance < radius {
            FacingState::Facing
        } else {
            FacingState::NotFacing
        }
    }

    /// Single ASCII byte sent to the commander.
    pub fn symbol(self) -> u8 {
        match self {
            FacingState::Facing => b'1',
            FacingState::NotFacing => b'0',
        }
    }

    pub fn is_facing(self) -> bool {
        self == FacingState::Facing
    }
}

/// Display-only classification of where a face is looking.
///
/// `None` is the state before a face is classified. `Up` and `Down` are
/// displayable but `classify` only resolves the lateral axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Left,
    Right,
    Up,
    Down,
    #[default]
    None,
}

impl Direction {
    /// Facing faces look forward; otherwise the side the nose points to.
    /// Only the lateral axis is classified.
    pub fn classify(pose: &HeadPose, facing: FacingState) -> Self {
        if facing.is_facing() {
            Direction::Forward
        } else if pose.nose_tip.x > pose.nose_end.x {
            Direction::Left
        } else {
            Direction::Right
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Forward => write!(f, "Forward"),
            Direction::Left => write!(f, "Left"),
            Direction::Right => write!(f, "Right"),
            Direction::Up => write!(f, "Up"),
            Direction::Down => write!(f, "Down"),
            Direction::None => write!(f, "None"),
        }
    }
}
