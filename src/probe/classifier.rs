//! Per-target outcome classification.
//!
//! # Rules
//! - Successful: parser reports `finished` and exactly 0% loss
//! - Everything else is unsuccessful, including transport failures
//!
//! The diagnostic category only drives logging and metrics; the pass/fail
//! decision uses [`Verdict::is_success`] alone.

use crate::probe::types::{ProbeOutcome, STATUS_FINISHED};

/// Verdict for a single probe outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Success,
    /// The process never produced an exit code (spawn error, timeout).
    NoExitCode,
    /// The process exited with a code; carries captured output.
    ExitedWithOutput { exit_code: i32, output: String },
    /// The process ran but the result was not a clean zero-loss finish.
    PacketLoss { status: String, loss: Option<f64> },
}

impl Verdict {
    pub fn is_success(&self) -> bool {
        matches!(self, Verdict::Success)
    }

    /// Short label used as a metrics dimension.
    pub fn category(&self) -> &'static str {
        match self {
            Verdict::Success => "success",
            Verdict::NoExitCode => "no_exit_code",
            Verdict::ExitedWithOutput { .. } => "exited_with_output",
            Verdict::PacketLoss { .. } => "packet_loss",
        }
    }
}

/// Classify one outcome.
pub fn classify(outcome: &ProbeOutcome) -> Verdict {
    match &outcome.result {
        Ok(parsed) => {
            let loss = parsed.loss();
            if parsed.status == STATUS_FINISHED && loss == Some(0.0) {
                Verdict::Success
            } else {
                Verdict::PacketLoss {
                    status: parsed.status.clone(),
                    loss,
                }
            }
        }
        Err(failure) => match failure.exit_code {
            None => Verdict::NoExitCode,
            Some(exit_code) => Verdict::ExitedWithOutput {
                exit_code,
                output: failure.output.clone(),
            },
        },
    }
}

/// Classify an outcome, logging the diagnostic category when unsuccessful.
pub fn classify_and_log(outcome: &ProbeOutcome) -> Verdict {
    let verdict = classify(outcome);
    let target = outcome.target.as_str();
    let ip_version = outcome.ip_version;

    match &verdict {
        Verdict::Success => {
            tracing::debug!(host = %target, ip_version = %ip_version, "Ping successful");
        }
        Verdict::NoExitCode => {
            tracing::warn!(
                host = %target,
                ip_version = %ip_version,
                "Ping unsuccessful: no exit code"
            );
        }
        Verdict::ExitedWithOutput { exit_code, output } => {
            tracing::warn!(
                host = %target,
                ip_version = %ip_version,
                exit_code = *exit_code,
                output = %output.trim(),
                "Ping unsuccessful: exited with output"
            );
        }
        Verdict::PacketLoss { status, loss } => {
            tracing::warn!(
                host = %target,
                ip_version = %ip_version,
                status = %status,
                loss = ?loss,
                "Ping unsuccessful: packet loss"
            );
        }
    }

    verdict
}
