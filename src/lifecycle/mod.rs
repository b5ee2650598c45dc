//! Lifecycle management.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Build collaborators → Register manager → start()
//!
//! Shutdown:
//!     signals.rs (SIGTERM/SIGINT) → StatusManager::stop(Sigterm)
//!     → shutdown.rs signal → scheduler loop exits
//! ```
//!
//! # Design Decisions
//! - A round already in flight is not aborted; its result is discarded
//! - The stop signal is sticky so late subscribers still observe it

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
