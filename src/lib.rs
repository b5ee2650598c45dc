//! Dual-stack outbound connectivity probe.
//!
//! Periodically pings a fixed set of targets over IPv4 and IPv6, applies a
//! 2-of-3 quorum per family and exposes the result as a small status state
//! machine for external orchestration.

pub mod admin;
pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod probe;
pub mod status;

pub use config::ProbeConfig;
pub use probe::RoundRunner;
pub use status::{Status, StatusManager, StatusRegistry};
