use crate::control::domain::controller_state::ControllerState;

/// Sends one pan/tilt command to the servo mount and returns its reply.
///
/// Called from dispatcher worker threads, possibly several at once, hence
/// `Send + Sync` and `&self`. Calls may block for as long as the transport
/// allows; callers must keep them off the frame path.
pub trait ServoActuator: Send + Sync {
    fn aim(&self, angles: ControllerState) -> Result<String, Box<dyn std::error::Error>>;
}
