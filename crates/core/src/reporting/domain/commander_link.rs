use crate::detection::domain::facing::FacingState;

/// Best-effort channel reporting facing state to the remote commander.
///
/// `report` runs synchronously on the frame thread and never fails from the
/// caller's point of view: implementations log send errors and carry on.
pub trait CommanderLink: Send {
    fn report(&mut self, state: FacingState);
}

/// Link used in debug mode: nothing is connected and reports are discarded.
pub struct NullCommanderLink;

impl CommanderLink for NullCommanderLink {
    fn report(&mut self, _state: FacingState) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_link_accepts_reports() {
        let mut link = NullCommanderLink;
        link.report(FacingState::Facing);
        link.report(FacingState::NotFacing);
        // No panics = success
    }
}
