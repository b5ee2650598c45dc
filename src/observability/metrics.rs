//! Metrics collection and exposition.
//!
//! # Metrics
//! - `netprobe_rounds_total` (counter): rounds by result (ready, failed)
//! - `netprobe_target_failures_total` (counter): by ip_version, category
//! - `netprobe_ipv4_supported` / `netprobe_ipv6_supported` (gauge): 1 or 0
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::probe::runner::RoundReport;
use crate::probe::types::IpVersion;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_round(report: &RoundReport) {
    let result = if report.any_passed() { "ready" } else { "failed" };
    metrics::counter!("netprobe_rounds_total", "result" => result).increment(1);
    metrics::gauge!("netprobe_ipv4_supported").set(gauge_value(report.ipv4.passed));
    metrics::gauge!("netprobe_ipv6_supported").set(gauge_value(report.ipv6.passed));
}

pub fn record_target_failure(ip_version: IpVersion, category: &'static str) {
    metrics::counter!(
        "netprobe_target_failures_total",
        "ip_version" => ip_version.to_string(),
        "category" => category
    )
    .increment(1);
}

fn gauge_value(passed: bool) -> f64 {
    if passed {
        1.0
    } else {
        0.0
    }
}
