//! Helpers that keep player-typed text on a single log line.

use std::fmt::Write;

/// Longest preview written to the log before truncating.
const MAX_PREVIEW: usize = 200;

/// Escape backslashes and control characters so arbitrary player input or
/// world text cannot split or spoof log lines. Long strings end in `…`.
pub fn escape_log(s: &str) -> String {
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 4);
    for (count, ch) in s.chars().enumerate() {
        if count == MAX_PREVIEW {
            out.push('…');
            break;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}
