// src/errors.rs

//! Crate-wide error types and helpers.

use thiserror::Error;

/// Failure of a single privileged command invocation.
///
/// Every variant is terminal for that invocation; nothing is retried. The
/// batch layer converts these into `Error`-level summary items so one failing
/// service never aborts the services after it.
#[derive(Error, Debug)]
pub enum ExecError {
    #[error("failed to allocate pseudo-terminal: {0}")]
    PtyAllocationFailed(String),

    #[error("failed to spawn '{program}': {message}")]
    SpawnFailed { program: String, message: String },

    /// The elevation helper commonly stalls here waiting for a password or
    /// Touch ID confirmation that never comes, hence the hint.
    #[error("command timed out after {timeout_secs}s (sudo may be waiting for credential input)")]
    Timeout { timeout_secs: u64 },

    #[error("administrator privileges denied: {0}")]
    ElevationDenied(String),

    #[error("privilege bridge error: {0}")]
    Bridge(String),
}

#[derive(Error, Debug)]
pub enum RoutesplitError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Repository error: {0}")]
    RepoError(String),

    #[error("Invalid service name: {0}")]
    InvalidServiceName(String),

    /// Returned by the dispatcher when a batch is already in flight. The
    /// caller treats this as a no-op, not a failure of the running batch.
    #[error("a batch is already running")]
    BatchBusy,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, RoutesplitError>;
