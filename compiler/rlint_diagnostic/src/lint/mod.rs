//! Lint items and the append-only lint collector.
//!
//! Defines [`LintKind`], [`LintItem`] and [`LintItems`]. The collector keeps
//! items in insertion order, which for a single-pass parser is roughly the
//! order they appear in the source.

use std::fmt;

use rlint_lexer::{Position, TokenRef};

use crate::LintConfig;

/// Severity of a lint item.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum LintKind {
    Style,
    Info,
    Warning,
    Error,
}

impl LintKind {
    /// Wire name, as used by editors keying off the lint type.
    pub const fn as_str(self) -> &'static str {
        match self {
            LintKind::Style => "style",
            LintKind::Info => "info",
            LintKind::Warning => "warning",
            LintKind::Error => "error",
        }
    }
}

impl fmt::Display for LintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single diagnostic with a zero-based source range.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LintItem {
    pub start_row: u32,
    pub start_column: u32,
    pub end_row: u32,
    pub end_column: u32,
    pub kind: LintKind,
    pub message: String,
}

impl LintItem {
    pub fn new(start: Position, end: Position, kind: LintKind, message: impl Into<String>) -> Self {
        LintItem {
            start_row: start.row,
            start_column: start.column,
            end_row: end.row,
            end_column: end.column,
            kind,
            message: message.into(),
        }
    }

    /// Lint spanning `token` on its first row.
    pub fn at_token(token: &TokenRef<'_>, kind: LintKind, message: impl Into<String>) -> Self {
        LintItem::new(token.position, token.end_position(), kind, message)
    }

    /// Lint spanning `symbol` starting at `position`.
    pub fn at_symbol(
        symbol: &str,
        position: Position,
        kind: LintKind,
        message: impl Into<String>,
    ) -> Self {
        LintItem::new(position, symbol_end(symbol, position), kind, message)
    }

    pub fn start(&self) -> Position {
        Position::new(self.start_row, self.start_column)
    }

    pub fn end(&self) -> Position {
        Position::new(self.end_row, self.end_column)
    }

    pub fn is_error(&self) -> bool {
        self.kind == LintKind::Error
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "symbol lengths are bounded by the u32 source length"
)]
fn symbol_end(symbol: &str, position: Position) -> Position {
    Position::new(position.row, position.column + symbol.chars().count() as u32)
}

/// Append-only collection of lint items with an error count.
///
/// Style lint helpers are no-ops unless the config records style lint, so
/// the parser can report style issues unconditionally.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LintItems {
    items: Vec<LintItem>,
    error_count: usize,
    config: LintConfig,
}

impl LintItems {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LintConfig) -> Self {
        LintItems {
            items: Vec::new(),
            error_count: 0,
            config,
        }
    }

    pub fn config(&self) -> &LintConfig {
        &self.config
    }

    pub fn records_style(&self) -> bool {
        self.config.record_style
    }

    /// Whether the configured error limit has been hit.
    pub fn limit_reached(&self) -> bool {
        self.config.limit_reached(self.error_count)
    }

    /// Append an item. Error items count towards the error limit.
    pub fn push(&mut self, item: LintItem) {
        if item.is_error() {
            self.error_count += 1;
        }
        self.items.push(item);
    }

    pub fn add(
        &mut self,
        start: Position,
        end: Position,
        kind: LintKind,
        message: impl Into<String>,
    ) {
        self.push(LintItem::new(start, end, kind, message));
    }

    fn style(&mut self, item: LintItem) {
        if self.config.record_style {
            self.push(item);
        }
    }

    // ─── Structural errors ───

    /// `unexpected token '<text>'[, expected <expected>]`
    ///
    /// A token is reported at most once in a row: when the last item is the
    /// same lint on the same token, nothing is added.
    pub fn unexpected_token(&mut self, token: &TokenRef<'_>, expected: Option<&str>) {
        let mut message = format!("unexpected token '{}'", token.text);
        if let Some(expected) = expected {
            message.push_str(", expected ");
            message.push_str(expected);
        }
        let item = LintItem::at_token(token, LintKind::Error, message);
        if self.items.last() == Some(&item) {
            return;
        }
        self.push(item);
    }

    /// Closing bracket with no matching opener. When an opener of another
    /// flavour is still pending, a companion info lint marks it.
    pub fn unexpected_closing_bracket(
        &mut self,
        token: &TokenRef<'_>,
        unmatched: Option<(&str, Position)>,
    ) {
        self.push(LintItem::at_token(
            token,
            LintKind::Error,
            format!("unexpected closing bracket '{}'", token.text),
        ));
        if let Some((symbol, position)) = unmatched {
            self.unmatched_bracket(symbol, position);
        }
    }

    /// Info lint marking an opening bracket that was never closed.
    pub fn unmatched_bracket(&mut self, symbol: &str, position: Position) {
        self.push(LintItem::at_symbol(
            symbol,
            position,
            LintKind::Info,
            format!("unmatched bracket '{symbol}' here"),
        ));
    }

    /// Zero-width lint just past `token`, the last token the parser saw.
    pub fn unexpected_end_of_document(&mut self, token: &TokenRef<'_>) {
        let end = token.end_position();
        self.push(LintItem::new(
            end,
            end,
            LintKind::Error,
            "unexpected end of document",
        ));
    }

    pub fn expected_comma_following_token(&mut self, token: &TokenRef<'_>) {
        self.push(LintItem::at_token(
            token,
            LintKind::Error,
            format!("expected ',' after '{}'", token.text),
        ));
    }

    pub fn too_many_errors(&mut self, position: Position) {
        self.push(LintItem::new(
            position,
            position,
            LintKind::Error,
            "too many errors emitted; stopping now",
        ));
    }

    // ─── Semantic warnings ───

    /// `no symbol named '<s>' in scope[; did you mean '<c>'?]`
    pub fn no_symbol_named(&mut self, symbol: &str, position: Position, candidate: Option<&str>) {
        let mut message = format!("no symbol named '{symbol}' in scope");
        if let Some(candidate) = candidate {
            message.push_str("; did you mean '");
            message.push_str(candidate);
            message.push_str("'?");
        }
        self.push(LintItem::at_symbol(symbol, position, LintKind::Warning, message));
    }

    /// Info lint at the definition site of a symbol used before it.
    pub fn symbol_defined_after_usage(&mut self, symbol: &str, definition: Position) {
        self.push(LintItem::at_symbol(
            symbol,
            definition,
            LintKind::Info,
            format!("'{symbol}' is defined after it is used"),
        ));
    }

    pub fn symbol_defined_but_not_used(&mut self, symbol: &str, definition: Position) {
        self.push(LintItem::at_symbol(
            symbol,
            definition,
            LintKind::Info,
            format!("'{symbol}' is defined but not used"),
        ));
    }

    pub fn no_existing_definition_for_parent_assignment(&mut self, token: &TokenRef<'_>) {
        self.push(LintItem::at_token(
            token,
            LintKind::Warning,
            format!("no existing definition for '{}' in parent scope", token.text),
        ));
    }

    /// `x == NULL` and friends. `check` names the predicate to use
    /// (`is.null`), `literal` the compared constant.
    pub fn incorrect_equality_comparison(
        &mut self,
        start: Position,
        end: Position,
        check: &str,
        literal: &str,
    ) {
        self.push(LintItem::new(
            start,
            end,
            LintKind::Warning,
            format!("use '{check}()' to check whether expression evaluates to {literal}"),
        ));
    }

    // ─── Style ───

    pub fn expected_whitespace(&mut self, token: &TokenRef<'_>) {
        self.style(LintItem::new(
            token.position,
            token.position,
            LintKind::Style,
            "expected whitespace",
        ));
    }

    pub fn unnecessary_whitespace(&mut self, token: &TokenRef<'_>) {
        self.style(LintItem::at_token(
            token,
            LintKind::Style,
            "unnecessary whitespace",
        ));
    }

    pub fn unexpected_whitespace_around_operator(&mut self, token: &TokenRef<'_>) {
        self.style(LintItem::at_token(
            token,
            LintKind::Style,
            "unexpected whitespace around extraction operator",
        ));
    }

    pub fn expected_whitespace_around_operator(&mut self, token: &TokenRef<'_>) {
        self.style(LintItem::at_token(
            token,
            LintKind::Style,
            "expected whitespace around binary operator",
        ));
    }

    pub fn inconsistent_whitespace_around_operator(&mut self, token: &TokenRef<'_>) {
        self.style(LintItem::at_token(
            token,
            LintKind::Style,
            "inconsistent whitespace around operator",
        ));
    }

    pub fn missing_argument_to_function_call(&mut self, token: &TokenRef<'_>) {
        self.style(LintItem::at_token(
            token,
            LintKind::Style,
            "missing argument to function call",
        ));
    }

    // ─── Access ───

    pub fn items(&self) -> &[LintItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<LintItem> {
        self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LintItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn count_of(&self, kind: LintKind) -> usize {
        self.items.iter().filter(|item| item.kind == kind).count()
    }
}

impl<'a> IntoIterator for &'a LintItems {
    type Item = &'a LintItem;
    type IntoIter = std::slice::Iter<'a, LintItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests;
