//! Resolution passes over a finished scope tree.
//!
//! These run after the parse and never look at tokens. A reference at
//! position `P` in scope `S` resolves against a definition in `S` at or
//! before `P`, or against any definition in an ancestor of `S`.

use std::collections::BTreeSet;

use rlint_diagnostic::LintItems;
use rlint_lexer::Position;
use tracing::debug;

use crate::known_symbols::is_known_symbol;
use crate::scope::{ParseItem, ScopeId, ScopeTree};

/// References with no visible definition, scope by scope in depth-first
/// order and by position within each scope.
pub fn unresolved_references(tree: &ScopeTree) -> Vec<ParseItem> {
    let mut unresolved = Vec::new();
    for (_, id) in tree.walk() {
        let start = unresolved.len();
        for (symbol, positions) in tree.get(id).referenced_symbols() {
            for position in positions {
                if !tree.is_defined(id, symbol, *position) {
                    unresolved.push(ParseItem::new(symbol.as_str(), *position, id));
                }
            }
        }
        unresolved[start..].sort();
    }
    unresolved
}

/// A definition visible from `item` whose name differs from it only in
/// case and which precedes the usage. The usage's own scope is searched
/// first, then each ancestor outwards.
pub fn suggest_symbol<'t>(tree: &'t ScopeTree, item: &ParseItem) -> Option<&'t str> {
    let wanted = item.symbol.to_lowercase();
    tree.ancestors(item.scope).find_map(|id| {
        tree.get(id)
            .defined_symbols()
            .iter()
            .find(|(symbol, positions)| {
                symbol.to_lowercase() == wanted && positions.iter().any(|p| *p < item.position)
            })
            .map(|(symbol, _)| symbol.as_str())
    })
}

/// Report every unresolved reference that is not a known symbol or one of
/// `is_global`.
///
/// A symbol defined later in the same scope gets an info lint at each
/// such definition instead of an unresolved-symbol warning.
pub fn report_unresolved(tree: &ScopeTree, is_global: impl Fn(&str) -> bool, lint: &mut LintItems) {
    let mut defined_later: BTreeSet<(String, Position)> = BTreeSet::new();

    for item in unresolved_references(tree) {
        if is_known_symbol(&item.symbol) || is_global(&item.symbol) {
            continue;
        }

        let node = tree.get(item.scope);
        if let Some(positions) = node.defined_symbols().get(&item.symbol) {
            for position in positions.iter().filter(|p| **p > item.position) {
                if defined_later.insert((item.symbol.clone(), *position)) {
                    lint.symbol_defined_after_usage(&item.symbol, *position);
                }
            }
            continue;
        }

        let suggestion = suggest_symbol(tree, &item);
        debug!(
            symbol = item.symbol.as_str(),
            row = item.position.row,
            column = item.position.column,
            suggestion,
            "unresolved reference"
        );
        lint.no_symbol_named(&item.symbol, item.position, suggestion);
    }
}

/// Report definitions inside function scopes that nothing reads.
///
/// A definition counts as used when the symbol is referenced in its scope
/// or any descendant at a position other than its own definition sites.
/// Formals, known symbols and globals are exempt.
pub fn report_unused(tree: &ScopeTree, is_global: impl Fn(&str) -> bool, lint: &mut LintItems) {
    for (_, id) in tree.walk() {
        let node = tree.get(id);
        if node.is_root() {
            continue;
        }
        for (symbol, definitions) in node.defined_symbols() {
            let is_formal = node.formals().iter().any(|formal| &formal.name == symbol);
            if is_formal || is_known_symbol(symbol) || is_global(symbol) {
                continue;
            }
            if !is_used(tree, id, symbol, definitions) {
                if let Some(first) = definitions.first() {
                    lint.symbol_defined_but_not_used(symbol, *first);
                }
            }
        }
    }
}

fn is_used(tree: &ScopeTree, scope: ScopeId, symbol: &str, definitions: &[Position]) -> bool {
    let mut stack = vec![scope];
    while let Some(id) = stack.pop() {
        let node = tree.get(id);
        let read = [node.referenced_symbols(), node.nse_referenced_symbols()]
            .into_iter()
            .filter_map(|references| references.get(symbol))
            .flatten()
            .any(|position| id != scope || !definitions.contains(position));
        if read {
            return true;
        }
        stack.extend_from_slice(node.children());
    }
    false
}

#[cfg(test)]
mod tests;
