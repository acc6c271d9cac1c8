//! Plain-text report rendering.

use routesplit::exec::BatchOutcome;
use routesplit::report;
use routesplit::types::{ActionKind, SummaryItem, SummaryLevel};

fn outcome() -> BatchOutcome {
    BatchOutcome {
        combined: "===== a.com =====\nraw text".to_string(),
        summaries: vec![
            SummaryItem {
                service: "a.com".to_string(),
                level: SummaryLevel::Ok,
                message: "Working.".to_string(),
            },
            SummaryItem {
                service: "b.com".to_string(),
                level: SummaryLevel::Error,
                message: "The Wi-Fi hotspot is not connected.".to_string(),
            },
        ],
    }
}

#[test]
fn summary_block_lists_services_in_order_with_labels() {
    let text = report::render(&outcome());
    let summary_idx = text.find("- a.com: OK - Working.").unwrap();
    let error_idx = text
        .find("- b.com: PROBLEM - The Wi-Fi hotspot is not connected.")
        .unwrap();
    assert!(summary_idx < error_idx);
    assert!(text.starts_with("SUMMARY\n"));
    assert!(text.contains("\nDETAILS\n===== a.com =====\nraw text"));
}

#[test]
fn empty_outcome_renders_placeholders() {
    let empty = BatchOutcome {
        combined: String::new(),
        summaries: Vec::new(),
    };
    let text = report::render(&empty);
    assert!(text.contains("No data."));
    assert!(text.ends_with("DETAILS\n(no output)"));
}

#[test]
fn title_names_a_single_service_but_counts_many() {
    assert_eq!(
        report::title(ActionKind::On, &["a.com".to_string()]),
        "ON — a.com"
    );
    assert_eq!(
        report::title(
            ActionKind::Verify,
            &["a.com".to_string(), "b.com".to_string()]
        ),
        "VERIFY — 2 services"
    );
}

#[test]
fn errors_fail_the_batch() {
    assert!(report::has_errors(&outcome()));
    let ok_only = BatchOutcome {
        combined: String::new(),
        summaries: vec![SummaryItem {
            service: "a.com".to_string(),
            level: SummaryLevel::Warn,
            message: "No reliable routing data.".to_string(),
        }],
    };
    assert!(!report::has_errors(&ok_only));
}
