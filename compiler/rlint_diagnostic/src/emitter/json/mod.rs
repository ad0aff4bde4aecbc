//! Machine-readable lint output: one JSON array per run.
//!
//! Items keep the shape editor overlays consume: dotted range keys, `type`,
//! and the message twice, as `text` and `raw`. Rows and columns stay
//! zero-based.

use std::io::Write;

use crate::LintItem;

use super::{escape_json, LintEmitter};

pub struct JsonEmitter<W: Write> {
    out: W,
    /// Items written so far; every item after the first needs a separator.
    written: usize,
}

impl<W: Write> JsonEmitter<W> {
    pub fn new(out: W) -> Self {
        JsonEmitter { out, written: 0 }
    }

    /// Open the array. Call once, before the first item.
    pub fn begin(&mut self) {
        let _ = self.out.write_all(b"[\n");
    }

    /// Close the array opened by [`JsonEmitter::begin`].
    pub fn end(&mut self) {
        let _ = self.out.write_all(b"\n]\n");
    }
}

impl<W: Write> LintEmitter for JsonEmitter<W> {
    fn emit(&mut self, path: &str, lint: &LintItem) {
        let separator = if self.written == 0 { "" } else { ",\n" };
        self.written += 1;

        let message = escape_json(&lint.message);
        let fields = [
            ("file", format!("\"{}\"", escape_json(path))),
            ("start.row", lint.start_row.to_string()),
            ("start.column", lint.start_column.to_string()),
            ("end.row", lint.end_row.to_string()),
            ("end.column", lint.end_column.to_string()),
            ("type", format!("\"{}\"", lint.kind.as_str())),
            ("text", format!("\"{message}\"")),
            ("raw", format!("\"{message}\"")),
        ];
        let body = fields
            .iter()
            .map(|(key, value)| format!("    \"{key}\": {value}"))
            .collect::<Vec<_>>()
            .join(",\n");

        let _ = write!(self.out, "{separator}  {{\n{body}\n  }}");
    }

    fn flush(&mut self) {
        let _ = self.out.flush();
    }

    fn emit_summary(&mut self, _error_count: usize, _warning_count: usize) {}
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
