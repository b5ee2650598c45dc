//! Probing subsystem.
//!
//! # Data Flow
//! ```text
//! RoundRunner (runner.rs)
//!     → ProbeExecutor × 6 (ping.rs, 3 targets × 2 families)
//!     → OutputParser (ping.rs)
//!     → classifier.rs (success / diagnostic category)
//!     → quorum.rs (≥ 2 of 3 per family)
//!     → RoundReport
//! ```
//!
//! # Design Decisions
//! - Collaborators sit behind traits (traits.rs) so the core is testable
//! - Probe failures never propagate; they become unsuccessful verdicts
//! - Targets are fixed, see [`types::PROBE_TARGETS`]

pub mod classifier;
pub mod dependency;
pub mod ping;
pub mod quorum;
pub mod runner;
pub mod traits;
pub mod types;

pub use classifier::{classify, Verdict};
pub use quorum::RoundVerdict;
pub use runner::{RoundReport, RoundRunner};
pub use traits::{DependencyCheck, OutputParser, ProbeExecutor};
pub use types::{IpVersion, ParsedProbe, ProbeFailure, ProbeOutcome, ProbeRequest, ProbeStats};
