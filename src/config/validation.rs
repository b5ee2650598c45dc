//! Configuration validation.
//!
//! Serde handles syntax; this checks values. All problems are reported at
//! once.

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::ProbeConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ProbeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut fail = |field: &'static str, message: String| {
        errors.push(ValidationError { field, message });
    };

    if config.status.number_of_packets == 0 {
        fail("status.number_of_packets", "must be greater than 0".into());
    }
    if config.status.interval_secs == 0 {
        fail("status.interval_secs", "must be greater than 0".into());
    }
    if config.probe.timeout_secs == 0 {
        fail("probe.timeout_secs", "must be greater than 0".into());
    }
    // ping sends roughly one packet per second.
    if config.probe.timeout_secs > 0
        && u64::from(config.status.number_of_packets) >= config.probe.timeout_secs
    {
        fail(
            "probe.timeout_secs",
            format!(
                "must exceed status.number_of_packets ({}) so a clean ping can finish",
                config.status.number_of_packets
            ),
        );
    }
    if config.probe.ping_binary.trim().is_empty() {
        fail("probe.ping_binary", "must not be empty".into());
    }
    if config.probe.unbuffer_binary.trim().is_empty() {
        fail("probe.unbuffer_binary", "must not be empty".into());
    }
    if config.admin.enabled && config.admin.bind_address.parse::<SocketAddr>().is_err() {
        fail(
            "admin.bind_address",
            format!("invalid socket address '{}'", config.admin.bind_address),
        );
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        fail(
            "observability.metrics_address",
            format!(
                "invalid socket address '{}'",
                config.observability.metrics_address
            ),
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
