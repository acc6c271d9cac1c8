// src/lib.rs

pub mod classify;
pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod repo;
pub mod report;
pub mod types;

use std::process::ExitCode;

use anyhow::{bail, Result};
use tracing::{debug, info};

use crate::cli::{CliArgs, Command};
use crate::config::{load_settings, Settings};
use crate::exec::backend::{backend_for_mode, default_auth_mode, SUDO_PAM_PATH};
use crate::exec::{BatchRequest, CommandRunner, Dispatcher};
use crate::exec::batch::BatchEntry;
use crate::repo::{create_service, discover_root, list_services, primary_host, RepoPaths};
use crate::types::{ActionKind, AuthMode};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - settings loading and CLI overrides
/// - repository discovery
/// - backend selection and the batch dispatcher
/// - report printing
pub async fn run(args: CliArgs) -> Result<ExitCode> {
    let mut settings = load_settings(args.config.as_deref())?;
    apply_cli_overrides(&mut settings, &args);

    match &args.command {
        Command::Services => {
            let paths = discover_root(args.repo.as_deref(), settings.repo.as_deref())?;
            let services = list_services(&paths)?;
            if services.is_empty() {
                println!("(no services found)");
            } else {
                for service in services {
                    println!("{service}");
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Add { domain } => {
            let paths = discover_root(args.repo.as_deref(), settings.repo.as_deref())?;
            let name = create_service(&paths, domain)?;
            println!("created service '{name}'");
            Ok(ExitCode::SUCCESS)
        }
        Command::On { services } => run_action(&args, &settings, ActionKind::On, services).await,
        Command::Off { services } => run_action(&args, &settings, ActionKind::Off, services).await,
        Command::Refresh { services } => {
            run_action(&args, &settings, ActionKind::Refresh, services).await
        }
        Command::Status { services } => {
            run_action(&args, &settings, ActionKind::Status, services).await
        }
        Command::Verify { services } => {
            run_action(&args, &settings, ActionKind::Verify, services).await
        }
    }
}

fn apply_cli_overrides(settings: &mut Settings, args: &CliArgs) {
    if let Some(mode) = args.auth {
        settings.auth_mode = Some(mode.into());
    }
    if let Some(secs) = args.timeout {
        settings.timeout_secs = secs;
    }
}

/// Auth mode: CLI/config override, else PAM inspection decides.
fn resolve_auth_mode(settings: &Settings) -> AuthMode {
    match settings.auth_mode {
        Some(mode) => mode,
        None => {
            let mode = default_auth_mode(SUDO_PAM_PATH);
            debug!(mode = mode.as_str(), "auth mode chosen from PAM inspection");
            mode
        }
    }
}

async fn run_action(
    args: &CliArgs,
    settings: &Settings,
    action: ActionKind,
    requested: &[String],
) -> Result<ExitCode> {
    let paths = discover_root(args.repo.as_deref(), settings.repo.as_deref())?;
    let services = resolve_services(&paths, requested)?;

    let request = build_request(&paths, action, &services)?;
    if request.is_empty() {
        bail!("no runnable services for {}", action.label());
    }

    let mode = resolve_auth_mode(settings);
    info!(
        action = action.label(),
        auth_mode = mode.as_str(),
        services = services.len(),
        "dispatching batch"
    );

    let timeout = std::time::Duration::from_secs(settings.timeout_secs);
    let backend = backend_for_mode(mode, &settings.path_env, timeout);
    let dispatcher = Dispatcher::new(CommandRunner::new(backend, paths));

    let outcome = dispatcher.run_batch(request).await?;

    println!("{}", report::title(action, &services));
    println!();
    println!("{}", report::render(&outcome));

    if report::has_errors(&outcome) {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// An empty request means "all services"; explicit names must exist.
fn resolve_services(paths: &RepoPaths, requested: &[String]) -> Result<Vec<String>> {
    let available = list_services(paths)?;
    if requested.is_empty() {
        if available.is_empty() {
            bail!(
                "no services found under {}",
                paths.services_dir().display()
            );
        }
        return Ok(available);
    }

    for service in requested {
        if !available.contains(service) {
            bail!(
                "unknown service '{service}' (known: {})",
                if available.is_empty() {
                    "none".to_string()
                } else {
                    available.join(", ")
                }
            );
        }
    }
    Ok(requested.to_vec())
}

/// Build the batch for an action.
///
/// VERIFY resolves one primary host per service and skips services without
/// one, noting them in the combined-output prefix. Every other action uses
/// the same arguments for each service.
fn build_request(
    paths: &RepoPaths,
    action: ActionKind,
    services: &[String],
) -> Result<BatchRequest> {
    match action {
        ActionKind::Verify => {
            let mut entries = Vec::new();
            let mut skipped = Vec::new();
            for service in services {
                match primary_host(paths, service) {
                    Some(host) => entries.push(BatchEntry {
                        service: service.clone(),
                        extra_args: vec![
                            "--no-curl".to_string(),
                            "--host".to_string(),
                            host,
                        ],
                    }),
                    None => skipped.push(service.clone()),
                }
            }

            if entries.is_empty() {
                bail!(
                    "no usable hosts found in dns_domains.txt or hosts.txt for: {}",
                    skipped.join(", ")
                );
            }

            let mut request = BatchRequest::from_entries(action, entries);
            if !skipped.is_empty() {
                request = request
                    .with_output_prefix(format!("SKIPPED (no hosts): {}\n\n", skipped.join(", ")));
            }
            Ok(request)
        }
        ActionKind::Status => Ok(BatchRequest::new(
            action,
            services.to_vec(),
            vec!["--no-curl".to_string()],
        )),
        ActionKind::On | ActionKind::Off | ActionKind::Refresh => {
            Ok(BatchRequest::new(action, services.to_vec(), Vec::new()))
        }
    }
}
