//! Explicit holder for the process's single status manager.
//!
//! The daemon creates one [`StatusRegistry`], initialises it once and passes
//! it by reference to every consumer. Reading it before initialisation is a
//! programmer error surfaced as [`StatusError::NotInitialized`].

use std::sync::{Arc, OnceLock};

use thiserror::Error;

use crate::status::manager::StatusManager;

/// Errors raised by the registry boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StatusError {
    #[error("status manager accessed before initialization")]
    NotInitialized,

    #[error("status manager already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Default)]
pub struct StatusRegistry {
    slot: OnceLock<Arc<StatusManager>>,
}

impl StatusRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the manager. Fails if one is already installed.
    pub fn init(&self, manager: StatusManager) -> Result<Arc<StatusManager>, StatusError> {
        let manager = Arc::new(manager);
        self.slot
            .set(Arc::clone(&manager))
            .map_err(|_| StatusError::AlreadyInitialized)?;
        Ok(manager)
    }

    /// The installed manager; the same instance on every call.
    pub fn get(&self) -> Result<Arc<StatusManager>, StatusError> {
        self.slot.get().cloned().ok_or(StatusError::NotInitialized)
    }

    pub fn is_initialized(&self) -> bool {
        self.slot.get().is_some()
    }
}
