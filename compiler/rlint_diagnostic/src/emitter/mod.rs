//! Output formats for lint.
//!
//! [`TerminalEmitter`] writes `path:row:col: kind: message` lines for people;
//! [`JsonEmitter`] writes the array editors read. Both sit behind
//! [`LintEmitter`] so the CLI picks one at startup.

mod json;
mod terminal;

pub use json::JsonEmitter;
pub use terminal::{ColorMode, TerminalEmitter};

use std::fmt::Write;

use crate::LintItem;

/// A sink for lint items.
///
/// Write errors are dropped: output goes to stdout, and a closed pipe must
/// not abort a lint run.
pub trait LintEmitter {
    fn emit(&mut self, path: &str, lint: &LintItem);

    /// Every item found in one file, in order.
    fn emit_all(&mut self, path: &str, lints: &[LintItem]) {
        lints.iter().for_each(|lint| self.emit(path, lint));
    }

    fn flush(&mut self);

    /// Closing line for a run. Formats without one ignore it.
    fn emit_summary(&mut self, error_count: usize, warning_count: usize);
}

/// Body of a JSON string literal holding `text`.
pub(crate) fn escape_json(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    for ch in text.chars() {
        let replacement = match ch {
            '"' => "\\\"",
            '\\' => "\\\\",
            '\n' => "\\n",
            '\r' => "\\r",
            '\t' => "\\t",
            ch if ch.is_control() => {
                let _ = write!(escaped, "\\u{:04x}", u32::from(ch));
                continue;
            }
            ch => {
                escaped.push(ch);
                continue;
            }
        };
        escaped.push_str(replacement);
    }
    escaped
}
