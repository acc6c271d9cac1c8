use std::str::FromStr;

use serde::Deserialize;

/// How administrator privileges are obtained for a script invocation.
///
/// - `TouchIdSudo`: run through `sudo` on a pseudo-terminal, so the PAM
///   prompt (password or Touch ID) can render even without a real terminal.
///   The real exit status of the script is observed.
/// - `PasswordPrompt`: run through the AppleScript bridge, which shows the
///   system administrator-password dialog. The bridge does not expose the
///   script's exit status; bridge success is reported as exit 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum AuthMode {
    #[serde(rename = "touchid_sudo")]
    TouchIdSudo,
    #[serde(rename = "password_prompt")]
    PasswordPrompt,
}

impl AuthMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMode::TouchIdSudo => "touchid_sudo",
            AuthMode::PasswordPrompt => "password_prompt",
        }
    }
}

impl FromStr for AuthMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "touchid_sudo" => Ok(AuthMode::TouchIdSudo),
            "password_prompt" => Ok(AuthMode::PasswordPrompt),
            other => Err(format!(
                "invalid auth mode: {other} (expected \"touchid_sudo\" or \"password_prompt\")"
            )),
        }
    }
}

/// What a batch asks the routing scripts to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Enable routing rules for each service.
    On,
    /// Disable routing rules for each service.
    Off,
    /// Re-run the enable script to renew host addresses.
    Refresh,
    /// Run the check script without curl probes.
    Status,
    /// Run the check script against a single primary host per service.
    Verify,
}

impl ActionKind {
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::On => "ON",
            ActionKind::Off => "OFF",
            ActionKind::Refresh => "REFRESH",
            ActionKind::Status => "STATUS",
            ActionKind::Verify => "VERIFY",
        }
    }

    /// Whether results of this action carry route-check output that should be
    /// classified, as opposed to a fixed per-action success message.
    pub fn is_check(&self) -> bool {
        matches!(self, ActionKind::Status | ActionKind::Verify)
    }
}

/// Health level of one service after a batch invocation.
///
/// Totally ordered: `Ok < Warn < Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SummaryLevel {
    Ok,
    Warn,
    Error,
}

impl SummaryLevel {
    pub fn label(&self) -> &'static str {
        match self {
            SummaryLevel::Ok => "OK",
            SummaryLevel::Warn => "WARNING",
            SummaryLevel::Error => "PROBLEM",
        }
    }
}

/// One classified result line, created once per service per batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryItem {
    pub service: String,
    pub level: SummaryLevel,
    pub message: String,
}

/// Captured outcome of one script invocation: the exit status and the full
/// combined stdout+stderr text. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub exit_code: i32,
    pub output: String,
}
