//! Error types for crucible-run.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for run operations.
pub type Result<T> = std::result::Result<T, RunError>;

/// Errors that can occur while executing a test binary.
#[derive(Error, Debug)]
pub enum RunError {
    /// The binary could not be spawned.
    #[error("Failed to spawn `{}`: {source}", .binary.display())]
    Spawn {
        binary: PathBuf,
        source: std::io::Error,
    },

    /// Waiting on the child process failed.
    #[error("Failed to wait on test process: {0}")]
    Wait(#[from] std::io::Error),
}
