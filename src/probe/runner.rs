//! Dual-stack round runner.
//!
//! # Data Flow
//! ```text
//! run_round
//!     ├─ evaluate(V4): probe × 3 (join_all) → classify → quorum
//!     └─ evaluate(V6): probe × 3 (join_all) → classify → quorum
//!     → RoundReport
//! ```
//!
//! Both families run concurrently and every probe is awaited; one failing
//! probe never cancels its siblings.

use std::sync::Arc;

use futures_util::future::join_all;

use crate::probe::classifier::classify_and_log;
use crate::probe::quorum::{self, RoundVerdict};
use crate::probe::traits::{OutputParser, ProbeExecutor};
use crate::probe::types::{IpVersion, ProbeOutcome, ProbeRequest, PROBE_TARGETS};
use crate::observability::metrics;

/// Result of one dual-stack round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundReport {
    pub ipv4: RoundVerdict,
    pub ipv6: RoundVerdict,
}

impl RoundReport {
    /// True when at least one family passed its quorum.
    pub fn any_passed(&self) -> bool {
        self.ipv4.passed || self.ipv6.passed
    }
}

/// Runs probe rounds against the fixed target set.
pub struct RoundRunner {
    executor: Arc<dyn ProbeExecutor>,
    parser: Arc<dyn OutputParser>,
    packets: u32,
}

impl RoundRunner {
    pub fn new(
        executor: Arc<dyn ProbeExecutor>,
        parser: Arc<dyn OutputParser>,
        packets: u32,
    ) -> Self {
        Self {
            executor,
            parser,
            packets,
        }
    }

    /// Run IPv4 and IPv6 evaluations concurrently.
    pub async fn run_round(&self) -> RoundReport {
        let (ipv4, ipv6) = tokio::join!(
            self.evaluate(IpVersion::V4),
            self.evaluate(IpVersion::V6)
        );

        if !ipv4.passed {
            tracing::warn!(
                successes = ipv4.success_count,
                required = quorum::QUORUM,
                "IPv4 ping test failed"
            );
        }
        if !ipv6.passed {
            tracing::warn!(
                successes = ipv6.success_count,
                required = quorum::QUORUM,
                "IPv6 ping test failed"
            );
        }

        RoundReport { ipv4, ipv6 }
    }

    /// Probe every target over one IP version and apply the quorum rule.
    pub async fn evaluate(&self, ip_version: IpVersion) -> RoundVerdict {
        let outcomes = join_all(
            PROBE_TARGETS
                .iter()
                .map(|target| self.probe(ip_version, target)),
        )
        .await;

        let verdicts: Vec<_> = outcomes
            .iter()
            .map(|outcome| {
                let verdict = classify_and_log(outcome);
                if !verdict.is_success() {
                    metrics::record_target_failure(ip_version, verdict.category());
                }
                verdict
            })
            .collect();

        quorum::evaluate(ip_version, &verdicts)
    }

    async fn probe(&self, ip_version: IpVersion, target: &str) -> ProbeOutcome {
        let request = ProbeRequest::ping(ip_version, target, self.packets);
        let result = self
            .executor
            .execute(request)
            .await
            .map(|raw| self.parser.parse(&raw));

        ProbeOutcome {
            target: target.to_string(),
            ip_version,
            result,
        }
    }
}
