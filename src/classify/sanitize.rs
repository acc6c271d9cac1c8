// src/classify/sanitize.rs

use std::sync::LazyLock;

use regex::Regex;

/// ANSI CSI sequence: ESC `[` parameters, one final letter.
static ANSI_CSI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("\u{1b}\\[[0-9;]*[A-Za-z]").expect("static pattern"));

/// Strip carriage returns and ANSI CSI sequences from one line of output.
pub fn sanitize_line(line: &str) -> String {
    let without_cr = line.replace('\r', "");
    ANSI_CSI.replace_all(&without_cr, "").into_owned()
}
