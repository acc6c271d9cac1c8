// src/classify/mod.rs

//! Classification of raw script output into per-service summaries.
//!
//! Script output arrives as free-form text from a terminal-oriented shell
//! script, contaminated with carriage returns and ANSI colour codes. This
//! module turns one service's output into a `(SummaryLevel, message)` pair:
//!
//! - [`sanitize`] strips `\r` and ANSI CSI sequences per line.
//! - [`analysis`] scrapes route-table rows and Wi-Fi/gateway signals into a
//!   [`CheckAnalysis`].
//! - [`summary`] applies failure markers, the exit code and the priority
//!   aggregation rules to produce the final [`SummaryItem`].

pub mod analysis;
pub mod sanitize;
pub mod summary;

pub use analysis::{analyze_check_output, CheckAnalysis};
pub use sanitize::sanitize_line;
pub use summary::summarize_result;
