// src/classify/analysis.rs

use std::collections::BTreeMap;

use crate::classify::sanitize::sanitize_line;

/// Wi-Fi state token reported by the check script for a usable hotspot link.
pub const WIFI_ACTIVE: &str = "active";

/// Counters and signals scraped from one check-script output.
///
/// Derived, never persisted. Route rows are only counted inside the
/// route-table section; the Wi-Fi and gateway lines are recognized anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckAnalysis {
    pub wifi_if: Option<String>,
    pub wifi_status: Option<String>,
    pub wifi_status_line_seen: bool,
    pub gw4: Option<String>,
    pub gw4_line_seen: bool,
    pub gw4_missing: bool,
    pub total_routes: usize,
    pub ok_count: usize,
    pub not_wifi_count: usize,
    pub no_dns_count: usize,
    pub no_v6_count: usize,
    pub hotspot_down_count: usize,
    /// Unrecognized status codes, kept for diagnostics only.
    pub other_statuses: BTreeMap<String, usize>,
}

impl CheckAnalysis {
    /// Hotspot considered down when any row says so, or the gateway line was
    /// present but empty, or the Wi-Fi status line was present with a
    /// non-active state.
    pub fn hotspot_down(&self) -> bool {
        self.hotspot_down_count > 0
            || (self.gw4_line_seen && self.gw4_missing)
            || (self.wifi_status.is_some() && self.wifi_status.as_deref() != Some(WIFI_ACTIVE))
    }
}

#[derive(PartialEq)]
enum Section {
    Route,
    Other,
}

/// Scrape one script output into a [`CheckAnalysis`].
///
/// Line-oriented, two concerns per line: section-independent signal lines
/// (`WIFI_IF=`, `GW4(`) and, inside the route-table section only, data rows
/// whose last whitespace-separated field is the status code. Rows need at
/// least 6 fields; the literal column header `status` is skipped.
pub fn analyze_check_output(output: &str) -> CheckAnalysis {
    let mut analysis = CheckAnalysis::default();
    let mut section = Section::Other;

    for raw_line in output.split('\n') {
        let line = sanitize_line(raw_line);

        if line.starts_with("== ") {
            section = if line.contains("Route table check") {
                Section::Route
            } else {
                Section::Other
            };
            continue;
        }

        if let Some(rest) = line.strip_prefix("WIFI_IF=") {
            analysis.wifi_status_line_seen = true;
            analysis.wifi_if = rest.split(' ').next().map(str::to_string);
            if let Some(idx) = line.find("status: ") {
                let after = &line[idx + "status: ".len()..];
                if let Some(end) = after.find(')') {
                    analysis.wifi_status = Some(after[..end].to_string());
                }
            }
        }

        if line.starts_with("GW4(") {
            analysis.gw4_line_seen = true;
            if let Some(eq) = line.find('=') {
                let gw = line[eq + 1..].trim();
                if gw.is_empty() || gw == "none" || gw == "<none>" {
                    analysis.gw4_missing = true;
                } else {
                    analysis.gw4 = Some(gw.to_string());
                }
            }
        }

        if section != Section::Route {
            continue;
        }
        let parts: Vec<&str> = line
            .split(|c| c == '\t' || c == ' ')
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() < 6 {
            continue;
        }
        let Some(status) = parts.last() else { continue };
        if *status == "status" {
            continue;
        }

        analysis.total_routes += 1;
        if *status == "OK" {
            analysis.ok_count += 1;
        } else if *status == "NO_DNS" {
            analysis.no_dns_count += 1;
        } else if *status == "HOTSPOT_DOWN" {
            analysis.hotspot_down_count += 1;
        } else if status.starts_with("NO_V6_ON_") {
            analysis.no_v6_count += 1;
        } else if status.starts_with("NOT_") {
            analysis.not_wifi_count += 1;
        } else {
            *analysis
                .other_statuses
                .entry((*status).to_string())
                .or_insert(0) += 1;
        }
    }

    analysis
}
