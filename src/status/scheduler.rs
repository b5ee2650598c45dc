//! Round scheduling.
//!
//! # Data Flow
//! ```text
//! start()
//!     → dependency gate (once)
//!         fail → UnbufferMissing, nothing scheduled
//!         pass → first round immediately
//!     → spawn loop: sleep(interval) → round → apply → sleep(interval) → ...
//! ```
//!
//! # Design Decisions
//! - Fixed interval; no backoff, no jitter
//! - The loop never exits on a failed round
//! - `cancel` stops the loop between rounds; an in-flight round completes
//!   and is discarded by the manager

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::lifecycle::shutdown::{triggered, Shutdown};
use crate::probe::runner::RoundRunner;
use crate::probe::traits::DependencyCheck;
use crate::status::manager::StatusManager;

/// Default delay between rounds.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Drives the dependency gate and the repeating round loop.
pub struct Scheduler {
    runner: Arc<RoundRunner>,
    dependency: Arc<dyn DependencyCheck>,
    interval: Duration,
    shutdown: Shutdown,
    started: AtomicBool,
    active: AtomicBool,
    next_round: Mutex<Option<JoinHandle<()>>>,
}

impl Scheduler {
    pub fn new(
        runner: RoundRunner,
        dependency: Arc<dyn DependencyCheck>,
        interval: Duration,
    ) -> Self {
        Self {
            runner: Arc::new(runner),
            dependency,
            interval,
            shutdown: Shutdown::new(),
            started: AtomicBool::new(false),
            active: AtomicBool::new(false),
            next_round: Mutex::new(None),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.shutdown.is_triggered()
    }

    /// Whether another round will run.
    ///
    /// True from the moment the dependency gate passes, including while the
    /// first round is in flight, until `cancel` or the loop exits.
    pub fn has_pending_round(&self) -> bool {
        if self.is_cancelled() || !self.active.load(Ordering::Acquire) {
            return false;
        }
        self.next_round
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map_or(true, |handle| !handle.is_finished())
    }

    /// Cancel the scheduled round, if any.
    pub fn cancel(&self) {
        self.shutdown.trigger();
        // Detach rather than abort: an in-flight round must complete.
        let handle = self
            .next_round
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if handle.is_some() {
            tracing::debug!("Cancelled scheduled round");
        }
    }

    pub(crate) async fn start(&self, manager: &Arc<StatusManager>) {
        if self.started.swap(true, Ordering::AcqRel) {
            tracing::warn!("Scheduler already started");
            return;
        }
        if self.is_cancelled() {
            tracing::debug!("Scheduler stopped before start");
            return;
        }

        if !self.dependency.is_satisfied().await {
            tracing::error!("Required dependency missing, connectivity probing disabled");
            manager.mark_dependency_missing();
            return;
        }
        if self.is_cancelled() {
            tracing::debug!("Scheduler stopped during dependency check");
            return;
        }
        self.active.store(true, Ordering::Release);

        tracing::info!(interval_secs = self.interval.as_secs(), "Running first probe round");
        let report = self.runner.run_round().await;
        if !manager.apply_round(&report) {
            return;
        }

        self.schedule(manager);
    }

    fn schedule(&self, manager: &Arc<StatusManager>) {
        let runner = Arc::clone(&self.runner);
        let interval = self.interval;
        let weak = Arc::downgrade(manager);
        let mut stop = self.shutdown.subscribe();

        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    _ = triggered(&mut stop) => break,
                    _ = tokio::time::sleep(interval) => {}
                }

                let Some(manager) = weak.upgrade() else {
                    break;
                };
                tracing::debug!("Running scheduled probe round");
                let report = runner.run_round().await;
                if !manager.apply_round(&report) {
                    break;
                }
            }
            tracing::debug!("Probe loop exited");
        });

        let mut slot = self
            .next_round
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if self.is_cancelled() {
            // Stopped while spawning; the loop observes the signal and exits.
            return;
        }
        *slot = Some(handle);
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("interval", &self.interval)
            .field("cancelled", &self.is_cancelled())
            .field("pending", &self.has_pending_round())
            .finish_non_exhaustive()
    }
}
