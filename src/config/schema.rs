//! Configuration schema definitions.
//!
//! All sections default, so an empty file (or no file) is a valid config.

use serde::{Deserialize, Serialize};

use crate::status::DEFAULT_INTERVAL;

/// Root configuration for the probe daemon.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProbeConfig {
    /// Round settings.
    pub status: StatusConfig,

    /// Probe executor settings.
    pub probe: ProbeSettings,

    /// Admin HTTP surface.
    pub admin: AdminConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Round settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StatusConfig {
    /// Packets sent per ping.
    pub number_of_packets: u32,

    /// Delay between rounds in seconds.
    pub interval_secs: u64,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            number_of_packets: 3,
            interval_secs: DEFAULT_INTERVAL.as_secs(),
        }
    }
}

/// Probe executor settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeSettings {
    /// `ping` binary name or path.
    pub ping_binary: String,

    /// `unbuffer` binary name or path; also the dependency gate target.
    pub unbuffer_binary: String,

    /// Per-probe timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            ping_binary: "ping".to_string(),
            unbuffer_binary: "unbuffer".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Admin HTTP configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Serve the admin endpoints.
    pub enabled: bool,

    /// Bind address.
    pub bind_address: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bind_address: "127.0.0.1:8085".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9095".to_string(),
        }
    }
}
