//! Probe status values.
//!
//! # States
//! - Initializing: before the first round completes
//! - Ready / PingTestFailed: result of the latest round, oscillate freely
//! - UnbufferMissing: dependency gate failed, no rounds will run
//! - Sigterm: forced by `stop`, no rounds will run
//!
//! No transition is rejected; callers decide what a transition means.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Current probe status.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Initializing = 0,
    Ready = 1,
    UnbufferMissing = 2,
    PingTestFailed = 3,
    Sigterm = 4,
}

impl Status {
    /// Wire form used in events and the admin API.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Initializing => "initializing",
            Status::Ready => "ready",
            Status::UnbufferMissing => "unbuffer-missing",
            Status::PingTestFailed => "ping-test-failed",
            Status::Sigterm => "sigterm",
        }
    }
}

impl From<u8> for Status {
    fn from(val: u8) -> Self {
        match val {
            1 => Status::Ready,
            2 => Status::UnbufferMissing,
            3 => Status::PingTestFailed,
            4 => Status::Sigterm,
            _ => Status::Initializing,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "initializing" => Ok(Status::Initializing),
            "ready" => Ok(Status::Ready),
            "unbuffer-missing" => Ok(Status::UnbufferMissing),
            "ping-test-failed" => Ok(Status::PingTestFailed),
            "sigterm" => Ok(Status::Sigterm),
            other => Err(format!("unknown status: {other}")),
        }
    }
}

/// Per-family support flags from the latest round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SupportFlags {
    pub ipv4_supported: bool,
    pub ipv6_supported: bool,
}
