//! Status state machine.
//!
//! Holds the current [`Status`] and per-family support flags. Reads are
//! lock-free atomic loads; writers are serialised so a round finishing
//! concurrently with `stop` can never overwrite the final status.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::observability::metrics;
use crate::probe::runner::{RoundReport, RoundRunner};
use crate::probe::traits::DependencyCheck;
use crate::status::events::{EventSink, ProbeEvent};
use crate::status::scheduler::Scheduler;
use crate::status::state::{Status, SupportFlags};

/// Owner of the probe status and the round scheduler.
pub struct StatusManager {
    status: AtomicU8,
    ipv4_supported: AtomicBool,
    ipv6_supported: AtomicBool,
    writer: Mutex<()>,
    events: Arc<dyn EventSink>,
    scheduler: Scheduler,
}

impl StatusManager {
    pub fn new(
        runner: RoundRunner,
        dependency: Arc<dyn DependencyCheck>,
        events: Arc<dyn EventSink>,
        interval: Duration,
    ) -> Self {
        Self {
            status: AtomicU8::new(Status::Initializing as u8),
            ipv4_supported: AtomicBool::new(false),
            ipv6_supported: AtomicBool::new(false),
            writer: Mutex::new(()),
            events,
            scheduler: Scheduler::new(runner, dependency, interval),
        }
    }

    // --- Snapshot reads ---

    pub fn status(&self) -> Status {
        Status::from(self.status.load(Ordering::Acquire))
    }

    pub fn ipv4_supported(&self) -> bool {
        self.ipv4_supported.load(Ordering::Acquire)
    }

    pub fn ipv6_supported(&self) -> bool {
        self.ipv6_supported.load(Ordering::Acquire)
    }

    pub fn support_flags(&self) -> SupportFlags {
        SupportFlags {
            ipv4_supported: self.ipv4_supported(),
            ipv6_supported: self.ipv6_supported(),
        }
    }

    /// Whether a future round is scheduled.
    pub fn has_pending_round(&self) -> bool {
        self.scheduler.has_pending_round()
    }

    /// Whether `stop` has been called.
    pub fn is_stopped(&self) -> bool {
        self.scheduler.is_cancelled()
    }

    // --- Mutations ---

    /// Overwrite the status and notify. Any transition is accepted.
    pub fn update_status(&self, status: Status) {
        let _guard = self.lock_writer();
        self.set_status(status);
    }

    pub fn update_ipv4_supported(&self, supported: bool) {
        let _guard = self.lock_writer();
        self.set_ipv4_supported(supported);
    }

    pub fn update_ipv6_supported(&self, supported: bool) {
        let _guard = self.lock_writer();
        self.set_ipv6_supported(supported);
    }

    /// Set the final status and cancel any scheduled round.
    ///
    /// A round already in flight runs to completion and its result is
    /// discarded.
    pub fn stop(&self, final_status: Status) {
        let _guard = self.lock_writer();
        self.scheduler.cancel();
        tracing::info!(status = %final_status, "Stopping status manager");
        self.set_status(final_status);
    }

    /// Run the dependency gate and, if it passes, the first round followed
    /// by the repeating schedule.
    pub async fn start(self: &Arc<Self>) {
        self.scheduler.start(self).await;
    }

    /// Apply a finished round unless the manager was stopped meanwhile.
    ///
    /// Returns whether the report was applied.
    pub(crate) fn apply_round(&self, report: &RoundReport) -> bool {
        let _guard = self.lock_writer();
        if self.scheduler.is_cancelled() {
            tracing::info!("Discarding round result after stop");
            return false;
        }

        let status = if report.any_passed() {
            Status::Ready
        } else {
            tracing::warn!(
                ipv4_successes = report.ipv4.success_count,
                ipv6_successes = report.ipv6.success_count,
                "Ping test failed for both IPv4 and IPv6"
            );
            Status::PingTestFailed
        };

        self.set_status(status);
        self.set_ipv4_supported(report.ipv4.passed);
        self.set_ipv6_supported(report.ipv6.passed);
        metrics::record_round(report);
        true
    }

    /// Mark the dependency gate as failed unless already stopped.
    pub(crate) fn mark_dependency_missing(&self) {
        let _guard = self.lock_writer();
        if !self.scheduler.is_cancelled() {
            self.set_status(Status::UnbufferMissing);
        }
    }

    fn set_status(&self, status: Status) {
        self.status.store(status as u8, Ordering::Release);
        self.events.publish(ProbeEvent::Status(status));
    }

    fn set_ipv4_supported(&self, supported: bool) {
        self.ipv4_supported.store(supported, Ordering::Release);
        self.events.publish(ProbeEvent::Ipv4Supported(supported));
    }

    fn set_ipv6_supported(&self, supported: bool) {
        self.ipv6_supported.store(supported, Ordering::Release);
        self.events.publish(ProbeEvent::Ipv6Supported(supported));
    }

    fn lock_writer(&self) -> MutexGuard<'_, ()> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for StatusManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusManager")
            .field("status", &self.status())
            .field("flags", &self.support_flags())
            .field("scheduler", &self.scheduler)
            .finish_non_exhaustive()
    }
}
