//! Probe request, outcome and failure types.

use std::fmt;

use thiserror::Error;

/// Completion status reported by the parser for a clean run.
pub const STATUS_FINISHED: &str = "finished";

/// Targets probed every round, for both IP versions.
///
/// Root name servers publish both A and AAAA records and are expected to
/// answer ICMP from anywhere with working connectivity.
pub const PROBE_TARGETS: [&str; 3] = [
    "a.root-servers.net",
    "b.root-servers.net",
    "c.root-servers.net",
];

/// IP family a probe runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpVersion {
    V4,
    V6,
}

impl IpVersion {
    /// Numeric family (4 or 6).
    pub fn number(self) -> u8 {
        match self {
            IpVersion::V4 => 4,
            IpVersion::V6 => 6,
        }
    }

    /// Flag passed to `ping` to force the family.
    pub fn ping_flag(self) -> &'static str {
        match self {
            IpVersion::V4 => "-4",
            IpVersion::V6 => "-6",
        }
    }
}

impl fmt::Display for IpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IPv{}", self.number())
    }
}

/// Kind of probe to execute. Only ICMP ping is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeKind {
    Ping,
}

/// One request handed to the probe executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    pub kind: ProbeKind,
    pub ip_version: IpVersion,
    pub target: String,
    pub packets: u32,
    /// Streaming of partial output while the probe runs.
    pub in_progress_updates: bool,
}

impl ProbeRequest {
    /// Build a ping request with in-progress updates disabled.
    pub fn ping(ip_version: IpVersion, target: impl Into<String>, packets: u32) -> Self {
        Self {
            kind: ProbeKind::Ping,
            ip_version,
            target: target.into(),
            packets,
            in_progress_updates: false,
        }
    }
}

/// Process-level failure of a probe.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("probe failed (exit code: {exit_code:?})")]
pub struct ProbeFailure {
    /// Exit code, absent when the process never ran to completion.
    pub exit_code: Option<i32>,
    /// Captured stdout/stderr.
    pub output: String,
}

impl ProbeFailure {
    pub fn exited(code: i32, output: impl Into<String>) -> Self {
        Self {
            exit_code: Some(code),
            output: output.into(),
        }
    }

    pub fn no_exit_code(output: impl Into<String>) -> Self {
        Self {
            exit_code: None,
            output: output.into(),
        }
    }
}

/// Statistics extracted from probe output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeStats {
    /// Packet loss in percent.
    pub loss: f64,
}

/// Structured result produced by an [`OutputParser`](crate::probe::OutputParser).
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedProbe {
    pub status: String,
    pub stats: Option<ProbeStats>,
}

impl ParsedProbe {
    pub fn finished(loss: f64) -> Self {
        Self {
            status: STATUS_FINISHED.to_string(),
            stats: Some(ProbeStats { loss }),
        }
    }

    /// Reported loss, if the parser found one.
    pub fn loss(&self) -> Option<f64> {
        self.stats.map(|s| s.loss)
    }
}

/// Result of one probe against one target.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeOutcome {
    pub target: String,
    pub ip_version: IpVersion,
    pub result: Result<ParsedProbe, ProbeFailure>,
}
