//! Error types for crucible-build.

use thiserror::Error;

/// Result type for crucible-build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Errors that can occur while configuring, emitting, or compiling.
#[derive(Error, Debug)]
pub enum BuildError {
    /// Failed to read or write a harness file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// The external compiler could not be spawned.
    #[error("Failed to run compiler `{compiler}`: {source}")]
    CompilerSpawn {
        compiler: String,
        source: std::io::Error,
    },
}
