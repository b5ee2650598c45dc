//! Connectivity probe daemon.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌───────────────────────────────────────────────────────────────┐
//!   │                          netprobe                             │
//!   │                                                               │
//!   │  ┌───────────┐   ┌─────────────┐   ┌──────────────────────┐   │
//!   │  │ scheduler │──▶│ round runner│──▶│ ping × 3 (IPv4)      │   │
//!   │  │ (10 min)  │   │  join v4/v6 │   │ ping × 3 (IPv6)      │   │
//!   │  └─────▲─────┘   └──────┬──────┘   └──────────────────────┘   │
//!   │        │                ▼                                     │
//!   │        │         ┌─────────────┐   ┌──────────────────────┐   │
//!   │        └─────────│status state │──▶│ events / admin HTTP  │   │
//!   │                  │  machine    │   │ metrics              │   │
//!   │                  └─────────────┘   └──────────────────────┘   │
//!   └───────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use netprobe::admin;
use netprobe::config::{load_config, ProbeConfig};
use netprobe::lifecycle::{self, shutdown::triggered, Shutdown};
use netprobe::observability::{logging, metrics};
use netprobe::probe::dependency::BinaryOnPath;
use netprobe::probe::ping::{PingExecutor, PingOutputParser};
use netprobe::status::{events, EventBus, Status, StatusManager, StatusRegistry};
use netprobe::RoundRunner;

#[derive(Parser)]
#[command(name = "netprobe")]
#[command(about = "Dual-stack outbound connectivity probe", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProbeConfig::default(),
    };

    logging::init_logging(&config.observability.log_level);
    tracing::info!("netprobe v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        packets = config.status.number_of_packets,
        interval_secs = config.status.interval_secs,
        unbuffer = %config.probe.unbuffer_binary,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics exporter");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let bus = EventBus::default();
    tokio::spawn(events::log_events(bus.subscribe()));

    let runner = RoundRunner::new(
        Arc::new(PingExecutor::new(&config.probe)),
        Arc::new(PingOutputParser),
        config.status.number_of_packets,
    );
    let registry = Arc::new(StatusRegistry::new());
    let manager = registry.init(StatusManager::new(
        runner,
        Arc::new(BinaryOnPath::new(config.probe.unbuffer_binary.clone())),
        Arc::new(bus),
        Duration::from_secs(config.status.interval_secs),
    ))?;

    let server_stop = Arc::new(Shutdown::new());
    let admin_task = if config.admin.enabled {
        let addr = config.admin.bind_address.parse()?;
        let mut rx = server_stop.subscribe();
        let registry = Arc::clone(&registry);
        Some(tokio::spawn(async move {
            let stop = async move { triggered(&mut rx).await };
            if let Err(e) = admin::serve(addr, registry, stop).await {
                tracing::error!(error = %e, "Admin server failed");
            }
        }))
    } else {
        None
    };

    {
        let manager = Arc::clone(&manager);
        tokio::spawn(async move { manager.start().await });
    }

    lifecycle::signals::terminate().await;
    manager.stop(Status::Sigterm);
    server_stop.trigger();

    if let Some(task) = admin_task {
        let _ = task.await;
    }
    tracing::info!("Shutdown complete");
    Ok(())
}
