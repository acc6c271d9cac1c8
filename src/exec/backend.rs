// src/exec/backend.rs

//! Pluggable privilege-elevation backends.
//!
//! The runner talks to an [`AuthBackend`] instead of spawning processes
//! directly. This makes it easy to swap in a fake backend in tests while
//! keeping the production implementations here.
//!
//! - [`SudoPtyBackend`] runs `sudo` on a pseudo-terminal so the PAM prompt
//!   (password or Touch ID) can render without a real terminal; it observes
//!   the script's real exit status.
//! - [`OsascriptBackend`] routes the command through the AppleScript bridge
//!   (`do shell script … with administrator privileges`), which shows the
//!   system password dialog. The bridge does not expose the script's exit
//!   status; bridge success is reported as exit 0 and script failures are
//!   only detectable from output markers.

use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::time::Duration;

use tokio::process::Command;
use tracing::debug;

use crate::errors::ExecError;
use crate::exec::escape::{bridge_command_line, bridge_source};
use crate::exec::pty::run_pty;
use crate::types::{AuthMode, CommandResult};

const SUDO_PROGRAM: &str = "/usr/bin/sudo";
const ENV_PROGRAM: &str = "/usr/bin/env";
const OSASCRIPT_PROGRAM: &str = "/usr/bin/osascript";

/// Trait abstracting how one elevated script invocation is executed.
///
/// Implementations must export a restricted `PATH` and the `SERVICE`
/// variable to the script and append `extra_args` verbatim after the script
/// path.
pub trait AuthBackend: Send + Sync {
    fn run(
        &self,
        script: &Path,
        service: &str,
        extra_args: &[String],
    ) -> Pin<Box<dyn Future<Output = Result<CommandResult, ExecError>> + Send + '_>>;
}

/// `sudo -- /usr/bin/env PATH=<p> SERVICE=<s> <script> <args…>` on a PTY.
pub struct SudoPtyBackend {
    path_env: String,
    timeout: Duration,
}

impl SudoPtyBackend {
    pub fn new(path_env: impl Into<String>, timeout: Duration) -> Self {
        Self {
            path_env: path_env.into(),
            timeout,
        }
    }
}

impl AuthBackend for SudoPtyBackend {
    fn run(
        &self,
        script: &Path,
        service: &str,
        extra_args: &[String],
    ) -> Pin<Box<dyn Future<Output = Result<CommandResult, ExecError>> + Send + '_>> {
        let mut args = vec![
            "--".to_string(),
            ENV_PROGRAM.to_string(),
            format!("PATH={}", self.path_env),
            format!("SERVICE={service}"),
            script.display().to_string(),
        ];
        args.extend_from_slice(extra_args);
        let timeout = self.timeout;
        let service = service.to_string();

        Box::pin(async move {
            debug!(service, "running via sudo on a PTY");
            run_pty(SUDO_PROGRAM, &args, timeout).await
        })
    }
}

/// AppleScript bridge backend.
pub struct OsascriptBackend {
    path_env: String,
}

impl OsascriptBackend {
    pub fn new(path_env: impl Into<String>) -> Self {
        Self {
            path_env: path_env.into(),
        }
    }
}

impl AuthBackend for OsascriptBackend {
    fn run(
        &self,
        script: &Path,
        service: &str,
        extra_args: &[String],
    ) -> Pin<Box<dyn Future<Output = Result<CommandResult, ExecError>> + Send + '_>> {
        let command_line = bridge_command_line(
            &self.path_env,
            service,
            &script.display().to_string(),
            extra_args,
        );
        let source = bridge_source(&command_line);
        let service = service.to_string();

        Box::pin(async move {
            debug!(service, "running via the AppleScript bridge");
            let output = Command::new(OSASCRIPT_PROGRAM)
                .arg("-e")
                .arg(&source)
                .output()
                .await
                .map_err(|e| ExecError::SpawnFailed {
                    program: OSASCRIPT_PROGRAM.to_string(),
                    message: e.to_string(),
                })?;

            if !output.status.success() {
                let message = String::from_utf8_lossy(&output.stderr).trim().to_string();
                // -128 is the AppleScript "User canceled" error code.
                if message.contains("User canceled") || message.contains("(-128)") {
                    return Err(ExecError::ElevationDenied(message));
                }
                return Err(ExecError::Bridge(message));
            }

            let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
            // osascript terminates its result with one newline of its own.
            if text.ends_with('\n') {
                text.pop();
            }

            // The bridge cannot report the script's exit status; success of
            // the bridge itself is all we get.
            Ok(CommandResult {
                exit_code: 0,
                output: text,
            })
        })
    }
}

/// Build the backend for a given auth mode.
pub fn backend_for_mode(
    mode: AuthMode,
    path_env: &str,
    timeout: Duration,
) -> Box<dyn AuthBackend> {
    match mode {
        AuthMode::TouchIdSudo => Box::new(SudoPtyBackend::new(path_env, timeout)),
        AuthMode::PasswordPrompt => Box::new(OsascriptBackend::new(path_env)),
    }
}

/// PAM configuration consulted for the default auth mode.
pub const SUDO_PAM_PATH: &str = "/etc/pam.d/sudo";

/// Default auth mode when none is configured: Touch ID sudo only if the
/// sudo PAM stack enables `pam_tid.so` on a non-comment line, else the
/// system password prompt. The path is a parameter so tests can point at a
/// fixture file.
pub fn default_auth_mode(pam_path: impl Into<PathBuf>) -> AuthMode {
    if sudo_pam_has_touch_id(&pam_path.into()) {
        AuthMode::TouchIdSudo
    } else {
        AuthMode::PasswordPrompt
    }
}

fn sudo_pam_has_touch_id(pam_path: &Path) -> bool {
    let Ok(text) = fs::read_to_string(pam_path) else {
        return false;
    };
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .any(|line| line.contains("pam_tid.so"))
}
