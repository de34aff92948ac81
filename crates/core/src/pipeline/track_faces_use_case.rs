use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::actuation::infrastructure::actuation_dispatcher::{
    ActuationDispatcher, DispatchOutcome, DispatchStats,
};
use crate::capture::domain::frame_source::FrameSource;
use crate::control::domain::controller_state::ControllerState;
use crate::control::domain::dispatch_policy::DispatchPolicy;
use crate::control::domain::measurement::Measurement;
use crate::control::domain::pan_tilt_controller::PanTiltController;
use crate::detection::domain::face_detector::FaceDetector;
use crate::detection::domain::facing::{Direction, FacingState};
use crate::detection::domain::pose_estimator::PoseEstimator;
use crate::pipeline::tracking_logger::TrackingLogger;
use crate::reporting::domain::commander_link::CommanderLink;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// What happened to one face on one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceReport {
    pub region: Region,
    pub measurement: Measurement,
    pub facing_distance: f64,
    pub facing: FacingState,
    pub direction: Direction,
    /// Controller output after folding in this face.
    pub angles: ControllerState,
    /// `None` on frames where no actuation command is due.
    pub actuation: Option<DispatchOutcome>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FrameReport {
    pub frame_count: u64,
    pub detected: bool,
    pub faces: Vec<FaceReport>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackingSummary {
    pub frames: u64,
    pub final_state: ControllerState,
    pub dispatch: DispatchStats,
}

/// Per-frame driver: detect (decimated), estimate pose, steer, report.
///
/// Owns the controller state and the frame counter; both live on the
/// caller's thread. Only actuation leaves this thread, as a copied angle
/// pair handed to the dispatcher. Each face is processed independently,
/// so with several faces in view the last one processed wins.
pub struct TrackFacesUseCase {
    detector: Box<dyn FaceDetector>,
    pose_estimator: Box<dyn PoseEstimator>,
    controller: PanTiltController,
    policy: DispatchPolicy,
    dispatcher: ActuationDispatcher,
    commander: Box<dyn CommanderLink>,
    logger: Box<dyn TrackingLogger>,
    facing_radius: f64,
    frame_count: u64,
    faces: Vec<Region>,
    cancelled: Arc<AtomicBool>,
}

impl TrackFacesUseCase {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        detector: Box<dyn FaceDetector>,
        pose_estimator: Box<dyn PoseEstimator>,
        controller: PanTiltController,
        policy: DispatchPolicy,
        dispatcher: ActuationDispatcher,
        commander: Box<dyn CommanderLink>,
        logger: Box<dyn TrackingLogger>,
        facing_radius: f64,
        cancelled: Option<Arc<AtomicBool>>,
    ) -> Self {
        Self {
            detector,
            pose_estimator,
            controller,
            policy,
            dispatcher,
            commander,
            logger,
            facing_radius,
            frame_count: 0,
            faces: Vec::new(),
            cancelled: cancelled.unwrap_or_else(|| Arc::new(AtomicBool::new(false))),
        }
    }

    pub fn state(&self) -> ControllerState {
        self.controller.state()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Runs the loop until the source is exhausted or the run is cancelled,
    /// then drains the actuation queue.
    ///
    /// Source, detector and pose errors end the run with that error.
    pub fn execute(
        mut self,
        mut source: Box<dyn FrameSource>,
    ) -> Result<TrackingSummary, Box<dyn std::error::Error>> {
        let metadata = source.open()?;
        self.logger.info(&format!(
            "Tracking {}x{} source (detect every {} frames, actuate every {})",
            metadata.width,
            metadata.height,
            self.policy.detect_interval(),
            self.policy.actuate_interval()
        ));

        let result = self.run_frames(source.as_mut());
        source.close();
        let summary = self.finish();
        result.map(|()| summary)
    }

    fn run_frames(
        &mut self,
        source: &mut dyn FrameSource,
    ) -> Result<(), Box<dyn std::error::Error>> {
        for frame_result in source.frames() {
            if self.cancelled.load(Ordering::Relaxed) {
                self.logger.info("Tracking cancelled");
                break;
            }
            let frame = frame_result?;
            self.process_frame(&frame)?;
        }
        Ok(())
    }

    /// Processes one frame and advances the frame counter.
    pub fn process_frame(
        &mut self,
        frame: &Frame,
    ) -> Result<FrameReport, Box<dyn std::error::Error>> {
        let frame_count = self.frame_count;
        let detected = self.policy.should_detect(frame_count);
        if detected {
            let start = Instant::now();
            self.faces = self.detector.detect(frame)?;
            self.logger
                .timing("detect", start.elapsed().as_secs_f64() * 1000.0);
        }

        let actuate = self.policy.should_actuate(frame_count);
        let center = frame.center();
        let faces = self.faces.clone();
        let mut reports = Vec::with_capacity(faces.len());

        let start = Instant::now();
        for region in faces {
            let Some(pose) = self.pose_estimator.estimate(frame, &region)? else {
                continue;
            };

            let measurement = Measurement::from_offset(pose.nose_tip, center);
            let facing_distance = pose.facing_distance();
            let facing = FacingState::classify(facing_distance, self.facing_radius);
            let direction = Direction::classify(&pose, facing);

            let angles = self.controller.update(measurement);
            log::debug!("Frame {frame_count}: {angles} (facing {direction})");

            let actuation = actuate.then(|| self.dispatcher.dispatch(angles));
            self.commander.report(facing);

            reports.push(FaceReport {
                region,
                measurement,
                facing_distance,
                facing,
                direction,
                angles,
                actuation,
            });
        }
        self.logger
            .timing("track", start.elapsed().as_secs_f64() * 1000.0);
        self.logger.metric("faces", reports.len() as f64);
        self.logger.frame(frame_count);

        self.frame_count += 1;

        Ok(FrameReport {
            frame_count,
            detected,
            faces: reports,
        })
    }

    /// Stops the actuation workers after they finish queued commands.
    pub fn finish(self) -> TrackingSummary {
        let final_state = self.controller.state();
        let frames = self.frame_count;
        let dispatch = self.dispatcher.shutdown();
        self.logger.summary();
        log::info!(
            "Tracked {frames} frames, final {final_state}, actuation: {} sent, {} dropped, {} failed",
            dispatch.succeeded,
            dispatch.dropped,
            dispatch.failed
        );
        TrackingSummary {
            frames,
            final_state,
            dispatch,
        }
    }
}
