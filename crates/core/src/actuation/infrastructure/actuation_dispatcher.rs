use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::{Sender, TrySendError};

use crate::actuation::domain::servo_actuator::ServoActuator;
use crate::control::domain::controller_state::ControllerState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    Queued,
    /// The queue was full (or closed) and the command was discarded.
    Dropped,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub queued: u64,
    pub dropped: u64,
    pub succeeded: u64,
    pub failed: u64,
}

#[derive(Default)]
struct Counters {
    queued: AtomicU64,
    dropped: AtomicU64,
    succeeded: AtomicU64,
    failed: AtomicU64,
}

impl Counters {
    fn snapshot(&self) -> DispatchStats {
        DispatchStats {
            queued: self.queued.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            succeeded: self.succeeded.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

/// Runs actuation commands on a fixed worker pool, off the frame thread.
///
/// Layout: `frame thread → bounded queue → N workers → actuator`
///
/// `dispatch` never blocks. When the queue is full the command is dropped;
/// the next actuation frame carries the newer angles anyway. Failures are
/// logged by the workers and never retried. Commands may complete out of
/// order when more than one worker is running.
pub struct ActuationDispatcher {
    sender: Option<Sender<ControllerState>>,
    workers: Vec<JoinHandle<()>>,
    counters: Arc<Counters>,
}

impl ActuationDispatcher {
    pub fn new(
        actuator: Arc<dyn ServoActuator>,
        workers: usize,
        queue_capacity: usize,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        if workers < 1 {
            return Err("workers must be >= 1".into());
        }
        if queue_capacity < 1 {
            return Err("queue_capacity must be >= 1".into());
        }

        let (tx, rx) = crossbeam_channel::bounded::<ControllerState>(queue_capacity);
        let counters = Arc::new(Counters::default());

        let mut handles = Vec::with_capacity(workers);
        for i in 0..workers {
            let rx = rx.clone();
            let actuator = actuator.clone();
            let counters = counters.clone();
            let handle = std::thread::Builder::new()
                .name(format!("actuator-{i}"))
                .spawn(move || {
                    for angles in rx {
                        match actuator.aim(angles) {
                            Ok(body) => {
                                counters.succeeded.fetch_add(1, Ordering::Relaxed);
                                log::info!("Actuator replied to {angles}: {}", body.trim());
                            }
                            Err(e) => {
                                counters.failed.fetch_add(1, Ordering::Relaxed);
                                log::warn!("Actuation command {angles} failed: {e}");
                            }
                        }
                    }
                })?;
            handles.push(handle);
        }

        Ok(Self {
            sender: Some(tx),
            workers: handles,
            counters,
        })
    }

    /// Queues `angles` for sending, or drops them if the pool is backed up.
    pub fn dispatch(&self, angles: ControllerState) -> DispatchOutcome {
        let Some(sender) = self.sender.as_ref() else {
            self.counters.dropped.fetch_add(1, Ordering::Relaxed);
            return DispatchOutcome::Dropped;
        };

        match sender.try_send(angles) {
            Ok(()) => {
                self.counters.queued.fetch_add(1, Ordering::Relaxed);
                DispatchOutcome::Queued
            }
            Err(TrySendError::Full(_)) => {
                self.counters.dropped.fetch_add(1, Ordering::Relaxed);
                log::warn!("Actuation queue full, dropping command {angles}");
                DispatchOutcome::Dropped
            }
            Err(TrySendError::Disconnected(_)) => {
                self.counters.dropped.fetch_add(1, Ordering::Relaxed);
                log::warn!("Actuation workers gone, dropping command {angles}");
                DispatchOutcome::Dropped
            }
        }
    }

    pub fn stats(&self) -> DispatchStats {
        self.counters.snapshot()
    }

    /// Lets queued commands finish, stops the workers, and returns final counts.
    pub fn shutdown(mut self) -> DispatchStats {
        self.close();
        self.counters.snapshot()
    }

    fn close(&mut self) {
        drop(self.sender.take());
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                log::warn!("Actuation worker panicked");
            }
        }
    }
}

impl Drop for ActuationDispatcher {
    fn drop(&mut self) {
        self.close();
    }
}
