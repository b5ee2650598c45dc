//! Status subsystem.
//!
//! # Data Flow
//! ```text
//! scheduler.rs
//!     → RoundRunner::run_round
//!     → manager.rs apply_round (Ready iff v4 or v6 passed)
//!     → events.rs (one event per mutation)
//!
//! registry.rs
//!     → the process's single StatusManager, passed by reference
//! ```

pub mod events;
pub mod manager;
pub mod registry;
pub mod scheduler;
pub mod state;

pub use events::{EventBus, EventSink, ProbeEvent};
pub use manager::StatusManager;
pub use registry::{StatusError, StatusRegistry};
pub use scheduler::DEFAULT_INTERVAL;
pub use state::{Status, SupportFlags};
