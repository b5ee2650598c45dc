//! Collaborator traits for the probing core.
//!
//! The round runner and scheduler only see these traits. Concrete
//! implementations live in [`crate::probe::ping`] and
//! [`crate::probe::dependency`]; tests substitute fakes.

use async_trait::async_trait;

use crate::probe::types::{ParsedProbe, ProbeFailure, ProbeRequest};

/// Runs one probe and returns its raw output.
#[async_trait]
pub trait ProbeExecutor: Send + Sync {
    async fn execute(&self, request: ProbeRequest) -> Result<String, ProbeFailure>;
}

/// Turns raw probe output into a structured result. Must be pure.
pub trait OutputParser: Send + Sync {
    fn parse(&self, raw: &str) -> ParsedProbe;
}

/// One-time check that the external tooling the executor needs is present.
#[async_trait]
pub trait DependencyCheck: Send + Sync {
    async fn is_satisfied(&self) -> bool;
}
