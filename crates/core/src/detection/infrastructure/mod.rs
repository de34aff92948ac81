pub mod recorded_face_detector;
pub mod recorded_pose_estimator;
