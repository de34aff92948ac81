pub mod recorded_frame_source;
pub mod recorded_session;
