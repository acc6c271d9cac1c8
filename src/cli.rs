// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! NOTE: this expects `clap` to be built with the `derive` feature, e.g.:
//! `clap = { version = "4.5.53", features = ["derive"] }` in `Cargo.toml`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::types::AuthMode;

/// Command-line arguments for `routesplit`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "routesplit",
    version,
    about = "Toggle split-route rules for named services and report routing health.",
    long_about = None
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the splitroute repository (the checkout containing `scripts/`
    /// and `services/`).
    ///
    /// If omitted, `ROUTESPLIT_REPO`, the config file and finally an upward
    /// search from the current directory are tried, in that order.
    #[arg(long, global = true, value_name = "PATH")]
    pub repo: Option<PathBuf>,

    /// Path to the config file (TOML).
    ///
    /// Default: `Routesplit.toml` in the current working directory, if it
    /// exists.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// How to obtain administrator privileges.
    ///
    /// If omitted, the config file is consulted; failing that, Touch ID sudo
    /// is used when `/etc/pam.d/sudo` enables `pam_tid.so`, otherwise the
    /// system password prompt.
    #[arg(long, global = true, value_enum, value_name = "MODE")]
    pub auth: Option<AuthModeArg>,

    /// Per-command timeout in seconds for the Touch ID sudo path.
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `ROUTESPLIT_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Enable routing rules for the given services (default: all).
    On { services: Vec<String> },

    /// Disable routing rules for the given services (default: all).
    Off { services: Vec<String> },

    /// Re-run the enable script to renew host addresses.
    Refresh { services: Vec<String> },

    /// Check routing without curl probes.
    Status { services: Vec<String> },

    /// Check routing against one primary host per service.
    Verify { services: Vec<String> },

    /// List the services found in the repository.
    Services,

    /// Create a new service from a domain name.
    Add { domain: String },
}

/// Auth mode as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum AuthModeArg {
    /// `sudo` on a pseudo-terminal (supports Touch ID via pam_tid).
    TouchidSudo,
    /// System administrator-password dialog via the AppleScript bridge.
    PasswordPrompt,
}

impl From<AuthModeArg> for AuthMode {
    fn from(arg: AuthModeArg) -> Self {
        match arg {
            AuthModeArg::TouchidSudo => AuthMode::TouchIdSudo,
            AuthModeArg::PasswordPrompt => AuthMode::PasswordPrompt,
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
