// src/exec/escape.rs

//! The two escaping layers between us and the AppleScript bridge.
//!
//! The bridge receives an AppleScript *source string* whose payload is a
//! *shell command line*. Each token is first shell-escaped, then the joined
//! command line is escaped again for the AppleScript string literal. The
//! layers are independent; applying them in the wrong order breaks on inputs
//! mixing quotes and backslashes.

/// Single-quote shell escaping: wrap in `'...'`, embedded `'` becomes
/// `'\''` (close quote, escaped quote, reopen quote).
pub fn shell_escape(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

/// Escape for an AppleScript double-quoted string literal: backslash, quote
/// and newline. Backslashes first, so later replacements don't double up.
pub fn applescript_escape(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Build the one-line shell command the bridge runs for one service:
/// `PATH=<p> SERVICE=<s> <script> <args…> 2>&1`, every value shell-escaped.
///
/// stderr is folded into stdout because the bridge only returns one stream.
pub fn bridge_command_line(
    path_env: &str,
    service: &str,
    script: &str,
    extra_args: &[String],
) -> String {
    let mut tokens = vec![
        format!("PATH={}", shell_escape(path_env)),
        format!("SERVICE={}", shell_escape(service)),
        shell_escape(script),
    ];
    tokens.extend(extra_args.iter().map(|a| shell_escape(a)));
    tokens.push("2>&1".to_string());
    tokens.join(" ")
}

/// Full AppleScript source requesting elevated execution of `command_line`.
pub fn bridge_source(command_line: &str) -> String {
    format!(
        "do shell script \"{}\" with administrator privileges",
        applescript_escape(command_line)
    )
}
