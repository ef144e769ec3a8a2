//! Recurring sweep runner with explicit start/stop control.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::sweeper::OverstaySweep;

/// Owns the background sweep task.
///
/// The handle belongs to whichever component manages the application
/// lifecycle. Start is a no-op while a task is running; stop signals the
/// watch channel, waits for the task to wind down, and clears the
/// handle, after which start works again. An in-flight cycle is allowed
/// to finish — per-booking writes are atomic on their own, so nothing is
/// torn by shutdown.
#[derive(Debug, Default)]
pub struct SweeperHandle {
    /// Cancellation signal for the running task.
    cancel: Option<watch::Sender<bool>>,
    /// The running task.
    task: Option<JoinHandle<()>>,
}

impl SweeperHandle {
    /// Creates an idle handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a sweep task is currently scheduled.
    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Start the recurring sweep. The first cycle runs immediately,
    /// then every `interval`. No-op when already running.
    pub fn start(&mut self, sweep: Arc<OverstaySweep>, interval: Duration) {
        if self.task.is_some() {
            debug!("Sweeper already running; start ignored");
            return;
        }

        let (tx, mut rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut ticker = time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    changed = rx.changed() => {
                        if changed.is_err() || *rx.borrow() {
                            break;
                        }
                    }
                    _ = ticker.tick() => {
                        if let Err(e) = sweep.run_once().await {
                            error!(error = %e, "Overstay sweep cycle failed");
                        }
                    }
                }
            }

            info!("Overstay sweeper stopped");
        });

        self.cancel = Some(tx);
        self.task = Some(task);
        info!(interval_seconds = interval.as_secs(), "Overstay sweeper started");
    }

    /// Stop scheduling future cycles and wait for the task to exit.
    /// No-op when not running.
    pub async fn stop(&mut self) {
        let Some(tx) = self.cancel.take() else {
            return;
        };
        let _ = tx.send(true);

        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}
