//! File-local lint directives.
//!
//! A comment line of the form `# !diagnostics <command>` adjusts the
//! options for the document it appears in:
//!
//! ```text
//! # !diagnostics off
//! # !diagnostics suppress=shiny_input, output
//! # !diagnostics style=false, level=core
//! ```

use std::collections::BTreeSet;

use tracing::debug;

use crate::options::{LintFlags, ParseOptions};

const MARKER: &str = "!diagnostics";

/// Directives collected from one document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Directives {
    /// `off` was given: the document is not linted.
    pub off: bool,
    /// Names from `suppress=`; treated as globals.
    pub suppressed: BTreeSet<String>,
    /// `key=value` settings, in order of appearance.
    pub settings: Vec<(String, String)>,
}

impl Directives {
    /// Scan `source` for directive comments.
    pub fn parse(source: &str) -> Self {
        let mut directives = Directives::default();
        for command in source.lines().filter_map(directive_command) {
            debug!(command, "lint directive");
            if command == "off" {
                directives.off = true;
                return directives;
            }
            directives.add_command(command);
        }
        directives
    }

    fn add_command(&mut self, command: &str) {
        if let Some(names) = strip_key(command, "suppress") {
            self.suppressed.extend(
                names
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string),
            );
            return;
        }

        for entry in command.split(',') {
            if let Some((key, value)) = entry.split_once('=') {
                self.settings
                    .push((key.trim().to_string(), value.trim().to_string()));
            }
        }
    }

    /// `options` with these directives applied. Unknown keys and values
    /// are ignored.
    pub fn apply(&self, options: &ParseOptions) -> ParseOptions {
        let mut options = options.clone();
        options.globals.extend(self.suppressed.iter().cloned());

        for (key, value) in &self.settings {
            match key.as_str() {
                "style" => options.flags.set(LintFlags::RECORD_STYLE, is_truthy(value)),
                "level" => {
                    let style = options.has(LintFlags::RECORD_STYLE);
                    match value.as_str() {
                        "syntax" => {
                            options.flags =
                                ParseOptions::syntax_only().flags | style_flag(style);
                        }
                        "core" => options.flags = ParseOptions::core().flags | style_flag(style),
                        "all" => options.flags = ParseOptions::all().flags,
                        _ => {}
                    }
                }
                _ => {}
            }
        }
        options
    }
}

/// The command of a `#+ <space> !diagnostics <command>` line.
fn directive_command(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('#')?.trim_start_matches('#');
    let trimmed = rest.trim_start();
    if trimmed.len() == rest.len() {
        return None;
    }
    trimmed.strip_prefix(MARKER).map(str::trim)
}

/// The value of `key = value` when `command` starts with `key`.
fn strip_key<'c>(command: &'c str, key: &str) -> Option<&'c str> {
    command
        .strip_prefix(key)?
        .trim_start()
        .strip_prefix('=')
}

/// `y`, `yes`, `t`, `true` (any case) are true; everything else is false.
fn is_truthy(value: &str) -> bool {
    matches!(
        value.chars().next().map(|c| c.to_ascii_lowercase()),
        Some('y' | 't')
    )
}

fn style_flag(enabled: bool) -> LintFlags {
    if enabled {
        LintFlags::RECORD_STYLE
    } else {
        LintFlags::empty()
    }
}

#[cfg(test)]
mod tests;
