//! Ping subprocess executor and output parser.
//!
//! # Responsibilities
//! - Spawn `unbuffer ping -4|-6 -c <packets> <target>` and capture output
//! - Bound every probe by a timeout
//! - Extract the packet-loss summary from the output

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;

use crate::config::ProbeSettings;
use crate::probe::traits::{OutputParser, ProbeExecutor};
use crate::probe::types::{ParsedProbe, ProbeFailure, ProbeRequest, ProbeStats, STATUS_FINISHED};

/// Status reported when no summary line is present.
pub const STATUS_FAILED: &str = "failed";

/// Executes ping requests as subprocesses.
#[derive(Debug, Clone)]
pub struct PingExecutor {
    ping_binary: String,
    unbuffer_binary: Option<String>,
    timeout: Duration,
}

impl PingExecutor {
    pub fn new(settings: &ProbeSettings) -> Self {
        Self {
            ping_binary: settings.ping_binary.clone(),
            unbuffer_binary: Some(settings.unbuffer_binary.clone()),
            timeout: Duration::from_secs(settings.timeout_secs),
        }
    }

    /// Run `ping` directly without the unbuffer wrapper.
    pub fn without_unbuffer(mut self) -> Self {
        self.unbuffer_binary = None;
        self
    }

    fn command(&self, request: &ProbeRequest) -> Command {
        let mut cmd = match &self.unbuffer_binary {
            Some(unbuffer) => {
                let mut cmd = Command::new(unbuffer);
                cmd.arg(&self.ping_binary);
                cmd
            }
            None => Command::new(&self.ping_binary),
        };
        cmd.arg(request.ip_version.ping_flag())
            .arg("-c")
            .arg(request.packets.to_string())
            .arg(&request.target)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl ProbeExecutor for PingExecutor {
    async fn execute(&self, request: ProbeRequest) -> Result<String, ProbeFailure> {
        tracing::debug!(
            host = %request.target,
            ip_version = %request.ip_version,
            packets = request.packets,
            "Running ping"
        );

        let output = match timeout(self.timeout, self.command(&request).output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => return Err(ProbeFailure::no_exit_code(e.to_string())),
            Err(_) => {
                return Err(ProbeFailure::no_exit_code(format!(
                    "timed out after {}s",
                    self.timeout.as_secs()
                )))
            }
        };

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        if output.status.success() {
            return Ok(text);
        }

        text.push_str(&String::from_utf8_lossy(&output.stderr));
        match output.status.code() {
            Some(code) => Err(ProbeFailure::exited(code, text)),
            // Killed by a signal.
            None => Err(ProbeFailure::no_exit_code(text)),
        }
    }
}

/// Parses iputils/busybox style ping summaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct PingOutputParser;

impl OutputParser for PingOutputParser {
    fn parse(&self, raw: &str) -> ParsedProbe {
        match raw.lines().find_map(parse_loss_line) {
            Some(loss) => ParsedProbe {
                status: STATUS_FINISHED.to_string(),
                stats: Some(ProbeStats { loss }),
            },
            None => ParsedProbe {
                status: STATUS_FAILED.to_string(),
                stats: None,
            },
        }
    }
}

/// Extract the loss percentage from a `... N% packet loss ...` line.
fn parse_loss_line(line: &str) -> Option<f64> {
    if !line.contains("packet loss") {
        return None;
    }
    line.split(|c: char| c == ',' || c.is_whitespace())
        .find_map(|token| token.strip_suffix('%'))
        .and_then(|n| n.parse::<f64>().ok())
}
