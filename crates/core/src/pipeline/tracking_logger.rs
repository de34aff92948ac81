use std::collections::HashMap;
use std::time::Instant;

use crate::shared::constants::FPS_WINDOW_FRAMES;

/// Cross-cutting observer for tracking-loop events.
///
/// Keeps the orchestrator free of output concerns so the CLI and tests can
/// watch the same loop differently.
pub trait TrackingLogger: Send {
    /// Called once per processed frame.
    fn frame(&mut self, index: u64);

    /// Record how long a named stage took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a point-in-time metric (e.g. faces per frame).
    fn metric(&mut self, name: &str, value: f64);

    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Discards all events.
pub struct NullTrackingLogger;

impl TrackingLogger for NullTrackingLogger {
    fn frame(&mut self, _index: u64) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Running total of one stage timing or metric. Constant size however long
/// the loop runs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunningStat {
    pub total: f64,
    pub count: u64,
}

impl RunningStat {
    fn record(&mut self, value: f64) {
        self.total += value;
        self.count += 1;
    }

    pub fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total / self.count as f64
        }
    }
}

/// Logs a frame rate every `window_frames` frames and keeps running
/// per-stage timings and metrics for an end-of-run summary.
pub struct StdoutTrackingLogger {
    window_frames: usize,
    window_start: Instant,
    window_count: usize,
    last_fps: Option<f64>,
    timings: HashMap<String, RunningStat>,
    metrics: HashMap<String, RunningStat>,
    start_time: Instant,
    total_frames: u64,
}

impl StdoutTrackingLogger {
    pub fn new(window_frames: usize) -> Self {
        let now = Instant::now();
        Self {
            window_frames: window_frames.max(1),
            window_start: now,
            window_count: 0,
            last_fps: None,
            timings: HashMap::new(),
            metrics: HashMap::new(),
            start_time: now,
            total_frames: 0,
        }
    }

    /// Frame rate over the most recently completed window.
    pub fn last_fps(&self) -> Option<f64> {
        self.last_fps
    }

    /// Returns the formatted summary string, or `None` if nothing was recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.total_frames == 0 && self.timings.is_empty() && self.metrics.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let frames = self.total_frames;
        let mut lines = vec![format!(
            "Tracking summary ({frames} frames, {:.1}s total):",
            elapsed_ms / 1000.0
        )];

        let mut stages: Vec<_> = self.timings.iter().collect();
        stages.sort_by(|a, b| a.0.cmp(b.0));
        for (stage, stat) in stages {
            lines.push(format!(
                "  {stage:12}: avg {:6.1}ms  total {:7.0}ms",
                stat.average(),
                stat.total
            ));
        }

        let mut names: Vec<_> = self.metrics.iter().collect();
        names.sort_by(|a, b| a.0.cmp(b.0));
        for (name, stat) in names {
            lines.push(format!("  {name}: avg {:.1}", stat.average()));
        }

        if frames > 0 && elapsed_ms > 0.0 {
            let fps = frames as f64 / (elapsed_ms / 1000.0);
            lines.push(format!("  Throughput: {fps:.1} fps"));
        }

        Some(lines.join("\n"))
    }

    pub fn timing_for(&self, stage: &str) -> Option<RunningStat> {
        self.timings.get(stage).copied()
    }

    pub fn metric_for(&self, name: &str) -> Option<RunningStat> {
        self.metrics.get(name).copied()
    }
}

impl Default for StdoutTrackingLogger {
    fn default() -> Self {
        Self::new(FPS_WINDOW_FRAMES)
    }
}

impl TrackingLogger for StdoutTrackingLogger {
    fn frame(&mut self, _index: u64) {
        self.total_frames += 1;
        self.window_count += 1;
        if self.window_count >= self.window_frames {
            let secs = self.window_start.elapsed().as_secs_f64();
            if secs > 0.0 {
                let fps = self.window_count as f64 / secs;
                self.last_fps = Some(fps);
                log::info!("Frame rate: {fps:.1} fps");
            }
            self.window_count = 0;
            self.window_start = Instant::now();
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .record(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics
            .entry(name.to_string())
            .or_default()
            .record(value);
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
