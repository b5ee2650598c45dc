//! Dependency gate: is the required binary on `PATH`?

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::probe::traits::DependencyCheck;

/// Checks that a named executable can be found on a search path.
#[derive(Debug, Clone)]
pub struct BinaryOnPath {
    binary: String,
    search_path: Option<OsString>,
}

impl BinaryOnPath {
    /// Search the process `PATH` at check time.
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            search_path: None,
        }
    }

    /// Search an explicit `PATH`-style list instead of the environment.
    pub fn with_search_path(mut self, path: impl Into<OsString>) -> Self {
        self.search_path = Some(path.into());
        self
    }

    fn locate(&self) -> Option<PathBuf> {
        let candidate = Path::new(&self.binary);
        if candidate.components().count() > 1 {
            return is_executable(candidate).then(|| candidate.to_path_buf());
        }

        let search = self.search_path.clone().or_else(|| env::var_os("PATH"))?;
        env::split_paths(&search)
            .map(|dir| dir.join(&self.binary))
            .find(|p| is_executable(p))
    }
}

#[async_trait]
impl DependencyCheck for BinaryOnPath {
    async fn is_satisfied(&self) -> bool {
        match self.locate() {
            Some(path) => {
                tracing::info!(binary = %self.binary, path = %path.display(), "Dependency found");
                true
            }
            None => {
                tracing::error!(binary = %self.binary, "Dependency not found on PATH");
                false
            }
        }
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_binary() {
        let check = BinaryOnPath::new("netprobe-definitely-missing")
            .with_search_path("/nonexistent-dir");
        assert!(!check.is_satisfied().await);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_binary_found_on_search_path() {
        // `sh` lives in /bin on every unix we run on.
        let check = BinaryOnPath::new("sh").with_search_path("/nonexistent-dir:/bin");
        assert!(check.is_satisfied().await);
    }
}
