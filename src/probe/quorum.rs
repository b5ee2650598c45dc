//! Majority quorum over per-target verdicts.

use crate::probe::classifier::Verdict;
use crate::probe::types::{IpVersion, PROBE_TARGETS};

/// Minimum number of successful targets for a family to pass.
pub const QUORUM: usize = 2;

/// Aggregated result of one IP version's evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundVerdict {
    pub ip_version: IpVersion,
    pub success_count: usize,
    pub passed: bool,
}

impl RoundVerdict {
    /// Build a verdict from a success count, clamped to the target set size.
    pub fn from_count(ip_version: IpVersion, success_count: usize) -> Self {
        let success_count = success_count.min(PROBE_TARGETS.len());
        Self {
            ip_version,
            success_count,
            passed: success_count >= QUORUM,
        }
    }
}

/// Evaluate a set of verdicts for one IP version.
pub fn evaluate(ip_version: IpVersion, verdicts: &[Verdict]) -> RoundVerdict {
    let successes = verdicts.iter().filter(|v| v.is_success()).count();
    RoundVerdict::from_count(ip_version, successes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdicts(successes: usize) -> Vec<Verdict> {
        (0..PROBE_TARGETS.len())
            .map(|i| {
                if i < successes {
                    Verdict::Success
                } else {
                    Verdict::NoExitCode
                }
            })
            .collect()
    }

    #[test]
    fn test_quorum_threshold() {
        assert!(!evaluate(IpVersion::V4, &verdicts(0)).passed);
        assert!(!evaluate(IpVersion::V4, &verdicts(1)).passed);
        assert!(evaluate(IpVersion::V4, &verdicts(2)).passed);
        assert!(evaluate(IpVersion::V4, &verdicts(3)).passed);
    }

    #[test]
    fn test_tolerates_one_bad_target() {
        let v = evaluate(
            IpVersion::V6,
            &[
                Verdict::Success,
                Verdict::PacketLoss {
                    status: "finished".into(),
                    loss: Some(100.0),
                },
                Verdict::Success,
            ],
        );
        assert_eq!(v.success_count, 2);
        assert!(v.passed);
    }

    #[test]
    fn test_count_is_clamped() {
        let v = RoundVerdict::from_count(IpVersion::V4, 7);
        assert_eq!(v.success_count, 3);
        assert!(v.passed);
    }
}
