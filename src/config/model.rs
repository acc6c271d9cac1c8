// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::types::AuthMode;

/// Restricted search path exported to every script invocation.
pub const DEFAULT_PATH_ENV: &str =
    "/usr/local/bin:/usr/bin:/bin:/usr/sbin:/sbin:/opt/homebrew/bin";

/// Default wall-clock timeout for the sudo/PTY path.
pub const DEFAULT_TIMEOUT_SECS: u64 = 90;

/// Settings as read from a TOML file, before validation.
///
/// ```toml
/// repo = "/Users/me/splitroute"
/// auth_mode = "touchid_sudo"
/// timeout_secs = 90
/// path_env = "/usr/local/bin:/usr/bin:/bin:/usr/sbin:/sbin"
/// ```
///
/// Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSettings {
    /// Root of the splitroute repository checkout.
    pub repo: Option<PathBuf>,

    /// `"touchid_sudo"` or `"password_prompt"`.
    pub auth_mode: Option<String>,

    /// Per-command timeout in seconds for the sudo/PTY path.
    pub timeout_secs: Option<u64>,

    /// `PATH` value exported to scripts.
    pub path_env: Option<String>,
}

/// Validated settings used by the rest of the application.
#[derive(Debug, Clone)]
pub struct Settings {
    pub repo: Option<PathBuf>,
    pub auth_mode: Option<AuthMode>,
    pub timeout_secs: u64,
    pub path_env: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            repo: None,
            auth_mode: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            path_env: DEFAULT_PATH_ENV.to_string(),
        }
    }
}

impl Settings {
    /// Used by `validate` once the raw values have been checked.
    pub(crate) fn new_unchecked(
        repo: Option<PathBuf>,
        auth_mode: Option<AuthMode>,
        timeout_secs: u64,
        path_env: String,
    ) -> Self {
        Self {
            repo,
            auth_mode,
            timeout_secs,
            path_env,
        }
    }
}
