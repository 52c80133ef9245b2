//! Partially written outputs.
//!
//! Encoders write to `<stem>.part.mp4` next to the final path. The file is
//! renamed onto the final path only after a successful encode, and removed on
//! failure, on drop, or on Ctrl+C.

use crate::constants::PARTIAL_EXTENSION;
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// RAII guard for an output that is still being written.
#[derive(Debug)]
pub struct PartialOutput {
    partial_path: PathBuf,
    final_path: PathBuf,
}

impl PartialOutput {
    /// Reserve the partial path for `final_path` and register it for cleanup.
    ///
    /// A stale partial file left by an earlier crash is removed first.
    pub fn new(final_path: &Path) -> Result<Self> {
        let partial_path = Self::partial_path_for(final_path);
        if partial_path.exists() {
            debug!("Removing stale partial output {}", partial_path.display());
            fs::remove_file(&partial_path)?;
        }
        register_partial(&partial_path);
        Ok(Self {
            partial_path,
            final_path: final_path.to_path_buf(),
        })
    }

    /// Path the encoder should write to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.partial_path
    }

    /// Get the partial path for a final output path.
    #[must_use]
    pub fn partial_path_for(final_path: &Path) -> PathBuf {
        final_path.with_extension(PARTIAL_EXTENSION)
    }

    /// Move the finished file onto the final path.
    pub fn commit(self) -> Result<PathBuf> {
        fs::rename(&self.partial_path, &self.final_path)?;
        unregister_partial(&self.partial_path);
        Ok(self.final_path.clone())
    }
}

impl Drop for PartialOutput {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.partial_path);
        unregister_partial(&self.partial_path);
    }
}

/// Global registry of partial outputs for cleanup on signal.
static ACTIVE_PARTIALS: std::sync::LazyLock<std::sync::Mutex<Vec<PathBuf>>> =
    std::sync::LazyLock::new(|| std::sync::Mutex::new(Vec::new()));

fn register_partial(path: &Path) {
    if let Ok(mut partials) = ACTIVE_PARTIALS.lock() {
        partials.push(path.to_path_buf());
    }
}

fn unregister_partial(path: &Path) {
    if let Ok(mut partials) = ACTIVE_PARTIALS.lock() {
        partials.retain(|p| p != path);
    }
}

/// Remove all registered partial outputs. Called on signal.
pub fn cleanup_all_partials() {
    if let Ok(partials) = ACTIVE_PARTIALS.lock() {
        for path in partials.iter() {
            let _ = fs::remove_file(path);
        }
    }
}
