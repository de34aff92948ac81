use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;

use facetrack_core::actuation::domain::servo_actuator::ServoActuator;
use facetrack_core::actuation::infrastructure::actuation_dispatcher::ActuationDispatcher;
use facetrack_core::actuation::infrastructure::http_servo_actuator::HttpServoActuator;
use facetrack_core::capture::infrastructure::recorded_frame_source::RecordedFrameSource;
use facetrack_core::capture::infrastructure::recorded_session::RecordedSession;
use facetrack_core::control::domain::dispatch_policy::DispatchPolicy;
use facetrack_core::control::domain::pan_tilt_controller::PanTiltController;
use facetrack_core::detection::infrastructure::recorded_face_detector::RecordedFaceDetector;
use facetrack_core::detection::infrastructure::recorded_pose_estimator::RecordedPoseEstimator;
use facetrack_core::pipeline::track_faces_use_case::TrackFacesUseCase;
use facetrack_core::pipeline::tracking_logger::StdoutTrackingLogger;
use facetrack_core::reporting::domain::commander_link::{CommanderLink, NullCommanderLink};
use facetrack_core::reporting::infrastructure::tcp_commander_link::TcpCommanderLink;
use facetrack_core::shared::tracker_config::TrackerConfig;

/// Steer a pan/tilt camera mount toward faces and report whether they face it.
#[derive(Parser)]
#[command(name = "facetrack")]
struct Cli {
    /// Recorded session (JSON) to replay.
    recording: PathBuf,

    /// JSON configuration file. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run without the commander link; facing reports are discarded.
    #[arg(long)]
    debug: bool,

    /// Host running the servo HTTP endpoint.
    #[arg(long)]
    actuator_host: Option<String>,

    #[arg(long)]
    actuator_port: Option<u16>,

    /// Host of the commander receiving facing bytes.
    #[arg(long)]
    commander_host: Option<String>,

    #[arg(long)]
    commander_port: Option<u16>,

    /// Run detection every Kth frame (1 = every frame).
    #[arg(long)]
    skip_frames: Option<u64>,

    /// Send an actuation command every Mth frame.
    #[arg(long)]
    actuate_every: Option<u64>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;
    let config = build_config(&cli)?;

    let session = RecordedSession::load(&cli.recording).map_err(|e| {
        format!(
            "{e}\nA recording is a JSON file with \"width\", \"height\" and a \"frames\" list; \
             check the path passed as RECORDING"
        )
    })?;
    let session = Arc::new(session);

    let actuator: Arc<dyn ServoActuator> = Arc::new(HttpServoActuator::new(
        &config.actuator.host,
        config.actuator.port,
        config.actuator.timeout(),
    )?);
    let dispatcher = ActuationDispatcher::new(
        actuator,
        config.actuator.workers,
        config.actuator.queue_capacity,
    )?;
    let commander = build_commander(&cli, &config)?;

    let use_case = TrackFacesUseCase::new(
        Box::new(RecordedFaceDetector::new(session.clone())),
        Box::new(RecordedPoseEstimator::new(session.clone())),
        PanTiltController::from_config(&config),
        DispatchPolicy::from_config(&config)?,
        dispatcher,
        commander,
        Box::new(StdoutTrackingLogger::default()),
        config.facing_radius,
        None,
    );
    let summary = use_case.execute(Box::new(RecordedFrameSource::new(session)))?;

    println!(
        "{} frames, final {}, actuation: {} queued, {} dropped, {} ok, {} failed",
        summary.frames,
        summary.final_state,
        summary.dispatch.queued,
        summary.dispatch.dropped,
        summary.dispatch.succeeded,
        summary.dispatch.failed
    );
    Ok(())
}

/// Defaults, then the config file, then command-line flags.
fn build_config(cli: &Cli) -> Result<TrackerConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => TrackerConfig::load(path)?,
        None => TrackerConfig::default(),
    };

    if let Some(host) = &cli.actuator_host {
        config.actuator.host = host.clone();
    }
    if let Some(port) = cli.actuator_port {
        config.actuator.port = port;
    }
    if let Some(host) = &cli.commander_host {
        config.commander.host = host.clone();
    }
    if let Some(port) = cli.commander_port {
        config.commander.port = port;
    }
    if let Some(k) = cli.skip_frames {
        config.detect_interval = k;
    }
    if let Some(m) = cli.actuate_every {
        config.actuate_interval = m;
    }

    config.validate()?;
    Ok(config)
}

fn build_commander(
    cli: &Cli,
    config: &TrackerConfig,
) -> Result<Box<dyn CommanderLink>, Box<dyn std::error::Error>> {
    if cli.debug {
        log::info!("Debug mode: commander link disabled");
        return Ok(Box::new(NullCommanderLink));
    }
    let link = TcpCommanderLink::connect(
        &config.commander.host,
        config.commander.port,
        config.commander.connect_timeout(),
    )?;
    Ok(Box::new(link))
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.recording.exists() {
        return Err(format!("Recording not found: {}", cli.recording.display()).into());
    }
    if let Some(path) = &cli.config {
        if !path.exists() {
            return Err(format!("Config file not found: {}", path.display()).into());
        }
    }
    if cli.skip_frames == Some(0) {
        return Err("--skip-frames must be at least 1".into());
    }
    if cli.actuate_every == Some(0) {
        return Err("--actuate-every must be at least 1".into());
    }
    Ok(())
}
