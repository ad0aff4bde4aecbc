//! Terminal output: one `path:row:col: kind: message` line per lint item,
//! rows and columns one-based, with ANSI colors when enabled.

use std::io::{self, Write};

use crate::{LintItem, LintKind};

use super::LintEmitter;

mod colors {
    pub const ERROR: &str = "\x1b[1;31m";
    pub const WARNING: &str = "\x1b[1;33m";
    pub const INFO: &str = "\x1b[1;36m";
    pub const STYLE: &str = "\x1b[1;32m";
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

/// `"1 error"`, `"3 warnings"`.
fn counted(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// When to color output (`--color=auto|always|never`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Color only when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }

    /// `is_tty` only matters for [`ColorMode::Auto`].
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Line-oriented emitter for people reading a terminal.
pub struct TerminalEmitter<W: Write> {
    out: W,
    use_color: bool,
}

impl<W: Write> TerminalEmitter<W> {
    /// `is_tty` tells [`ColorMode::Auto`] whether `out` is a terminal.
    pub fn with_color_mode(out: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            out,
            use_color: mode.should_use_colors(is_tty),
        }
    }

    fn paint(&mut self, text: &str, color: &str) {
        let _ = if self.use_color {
            write!(self.out, "{color}{text}{}", colors::RESET)
        } else {
            self.out.write_all(text.as_bytes())
        };
    }

    fn kind_color(kind: LintKind) -> &'static str {
        match kind {
            LintKind::Error => colors::ERROR,
            LintKind::Warning => colors::WARNING,
            LintKind::Info => colors::INFO,
            LintKind::Style => colors::STYLE,
        }
    }
}

impl TerminalEmitter<io::Stdout> {
    pub fn stdout(mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::with_color_mode(io::stdout(), mode, is_tty)
    }
}

impl<W: Write> LintEmitter for TerminalEmitter<W> {
    fn emit(&mut self, path: &str, lint: &LintItem) {
        let location = format!(
            "{path}:{}:{}",
            u64::from(lint.start_row) + 1,
            u64::from(lint.start_column) + 1
        );
        self.paint(&location, colors::BOLD);
        let _ = self.out.write_all(b": ");
        self.paint(lint.kind.as_str(), Self::kind_color(lint.kind));
        let _ = writeln!(self.out, ": {}", lint.message);
    }

    fn flush(&mut self) {
        let _ = self.out.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        let (label, color, counts) = match (error_count, warning_count) {
            (0, 0) => return,
            (0, w) => ("warning", colors::WARNING, counted(w, "warning")),
            (e, 0) => ("error", colors::ERROR, counted(e, "error")),
            (e, w) => (
                "error",
                colors::ERROR,
                format!("{} and {}", counted(e, "error"), counted(w, "warning")),
            ),
        };
        self.paint(label, color);
        let _ = writeln!(self.out, ": {counts} emitted");
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
