// src/classify/summary.rs

use crate::classify::analysis::analyze_check_output;
use crate::errors::ExecError;
use crate::types::{ActionKind, CommandResult, SummaryItem, SummaryLevel};

/// Known failure markers the scripts print, matched case-insensitively
/// against the whole output. A hit overrides a zero exit code — the
/// password-prompt bridge cannot report real exit status, so marker sniffing
/// is the only failure signal on that path.
const FAILURE_MARKERS: &[(&str, &str)] = &[
    (
        "missing hosts file",
        "No hosts.txt for this service. Check the services/<name> directory.",
    ),
    (
        "no ipv4 gateway",
        "No hotspot gateway. Connect to the Wi-Fi hotspot and try again.",
    ),
    ("run with sudo", "Administrator privileges (sudo) missing."),
    ("invalid service name", "Invalid service name."),
    ("unknown command", "Script did not recognize the command."),
];

/// Classify one service's result into a summary line.
///
/// Order of precedence:
/// 1. hard execution failure (the command never produced a result)
/// 2. non-zero exit code or a recognized failure marker in the output
/// 3. for STATUS/VERIFY, route-table classification of the output
/// 4. otherwise, the fixed per-action success message
pub fn summarize_result(
    action: ActionKind,
    service: &str,
    extra_args: &[String],
    result: &Result<CommandResult, ExecError>,
) -> SummaryItem {
    let res = match result {
        Err(err) => {
            return SummaryItem {
                service: service.to_string(),
                level: SummaryLevel::Error,
                message: format!("Command failed to run: {err}"),
            };
        }
        Ok(res) => res,
    };

    if res.exit_code != 0 || output_indicates_failure(&res.output) {
        let message = failure_message(&res.output)
            .unwrap_or("Command exited with an error.")
            .to_string();
        return SummaryItem {
            service: service.to_string(),
            level: SummaryLevel::Error,
            message,
        };
    }

    if action.is_check() {
        let (level, message) = summarize_check_output(&res.output);
        let message = match extract_host(extra_args) {
            Some(host) => format!("Checked: {host}. {message}"),
            None => message,
        };
        return SummaryItem {
            service: service.to_string(),
            level,
            message,
        };
    }

    let message = match action {
        ActionKind::On => "Rules enabled (this service's traffic should go through the hotspot).",
        ActionKind::Off => "Rules disabled (traffic returns to the default route).",
        ActionKind::Refresh => "Rules refreshed (host addresses renewed).",
        ActionKind::Status | ActionKind::Verify => "Status checked.",
    };
    SummaryItem {
        service: service.to_string(),
        level: SummaryLevel::Ok,
        message: message.to_string(),
    }
}

fn output_indicates_failure(output: &str) -> bool {
    let lower = output.to_lowercase();
    FAILURE_MARKERS
        .iter()
        .any(|(marker, _)| lower.contains(marker))
}

fn failure_message(output: &str) -> Option<&'static str> {
    let lower = output.to_lowercase();
    FAILURE_MARKERS
        .iter()
        .find(|(marker, _)| lower.contains(marker))
        .map(|(_, message)| *message)
}

/// Aggregate a scraped check output into a level and message.
///
/// Priority order, first match wins:
/// 1. no route rows at all: hotspot message if the side signals say the
///    hotspot is down, else "could not read"
/// 2. hotspot down
/// 3. any `NO_DNS` row
/// 4. any `NOT_*` row
/// 5. at least one `OK` row (noting IPv6 loss when `NO_V6_ON_*` rows exist)
/// 6. only `NO_V6_ON_*` rows
/// 7. nothing conclusive
fn summarize_check_output(output: &str) -> (SummaryLevel, String) {
    let analysis = analyze_check_output(output);
    let hotspot_down = analysis.hotspot_down();

    let (level, message): (SummaryLevel, &str) = if analysis.total_routes == 0 {
        if hotspot_down {
            (SummaryLevel::Error, "The Wi-Fi hotspot is not connected.")
        } else {
            (SummaryLevel::Warn, "Could not read the test result.")
        }
    } else if hotspot_down {
        (SummaryLevel::Error, "The Wi-Fi hotspot is not connected.")
    } else if analysis.no_dns_count > 0 {
        (
            SummaryLevel::Error,
            "Could not resolve this service's addresses.",
        )
    } else if analysis.not_wifi_count > 0 {
        (
            SummaryLevel::Error,
            "Traffic is not routed through the hotspot.",
        )
    } else if analysis.ok_count > 0 {
        if analysis.no_v6_count > 0 {
            (SummaryLevel::Ok, "Working (IPv4). IPv6 unavailable.")
        } else {
            (SummaryLevel::Ok, "Working.")
        }
    } else if analysis.no_v6_count > 0 {
        (SummaryLevel::Warn, "IPv6 unavailable, no IPv4 confirmed.")
    } else {
        (SummaryLevel::Warn, "No reliable routing data.")
    };

    (level, message.to_string())
}

/// Pull the `--host <value>` argument back out of a VERIFY invocation.
fn extract_host(args: &[String]) -> Option<&str> {
    let idx = args.iter().position(|a| a == "--host")?;
    args.get(idx + 1).map(String::as_str)
}
