// src/report.rs

//! Plain-text rendering of a batch outcome.

use crate::exec::BatchOutcome;
use crate::types::{ActionKind, SummaryLevel};

/// Title line: `ON — example.com` for one service, `ON — 3 services` for
/// more.
pub fn title(action: ActionKind, services: &[String]) -> String {
    match services {
        [only] => format!("{} — {}", action.label(), only),
        _ => format!("{} — {} services", action.label(), services.len()),
    }
}

/// SUMMARY block followed by the combined raw output under DETAILS.
pub fn render(outcome: &BatchOutcome) -> String {
    let mut out = String::from("SUMMARY\n");
    if outcome.summaries.is_empty() {
        out.push_str("No data.\n");
    } else {
        for item in &outcome.summaries {
            out.push_str(&format!(
                "- {}: {} - {}\n",
                item.service,
                item.level.label(),
                item.message
            ));
        }
    }

    out.push_str("\nDETAILS\n");
    if outcome.combined.is_empty() {
        out.push_str("(no output)");
    } else {
        out.push_str(&outcome.combined);
    }
    out
}

/// Whether the outcome should fail the process.
pub fn has_errors(outcome: &BatchOutcome) -> bool {
    outcome
        .summaries
        .iter()
        .any(|item| item.level == SummaryLevel::Error)
}
