use super::*;
use pretty_assertions::assert_eq;
use rlint_diagnostic::LintKind;

fn pos(row: u32, column: u32) -> Position {
    Position::new(row, column)
}

fn messages(lint: &LintItems) -> Vec<&str> {
    lint.iter().map(|item| item.message.as_str()).collect()
}

// === Unresolved references ===

#[test]
fn test_same_scope_definition_must_precede() {
    let mut tree = ScopeTree::new();
    tree.reference(ScopeId::ROOT, "x", pos(0, 0));
    tree.define(ScopeId::ROOT, "x", pos(1, 0));
    tree.reference(ScopeId::ROOT, "x", pos(2, 0));

    let unresolved = unresolved_references(&tree);
    assert_eq!(unresolved, vec![ParseItem::new("x", pos(0, 0), ScopeId::ROOT)]);
}

#[test]
fn test_ancestor_definitions_ignore_position() {
    let mut tree = ScopeTree::new();
    let f = tree.add_child(ScopeId::ROOT, "f", pos(0, 0));
    tree.reference(f, "helper", pos(1, 2));
    tree.define(ScopeId::ROOT, "helper", pos(5, 0));

    assert!(unresolved_references(&tree).is_empty());
}

#[test]
fn test_unresolved_order_is_depth_first_then_position() {
    let mut tree = ScopeTree::new();
    let f = tree.add_child(ScopeId::ROOT, "f", pos(0, 0));
    let g = tree.add_child(ScopeId::ROOT, "g", pos(3, 0));
    tree.reference(g, "b", pos(4, 0));
    tree.reference(f, "z", pos(2, 0));
    tree.reference(f, "a", pos(1, 0));
    tree.reference(ScopeId::ROOT, "r", pos(9, 0));

    let symbols: Vec<_> = unresolved_references(&tree)
        .into_iter()
        .map(|item| item.symbol)
        .collect();
    assert_eq!(symbols, vec!["r", "a", "z", "b"]);
}

#[test]
fn test_nse_references_are_not_resolved() {
    let mut tree = ScopeTree::new();
    tree.reference_nse(ScopeId::ROOT, "column", pos(0, 7));
    assert!(unresolved_references(&tree).is_empty());
}

// === Suggestions ===

#[test]
fn test_suggestion_is_case_insensitive() {
    let mut tree = ScopeTree::new();
    tree.define(ScopeId::ROOT, "value", pos(0, 2));
    let item = ParseItem::new("Value", pos(0, 20), ScopeId::ROOT);
    assert_eq!(suggest_symbol(&tree, &item), Some("value"));
}

#[test]
fn test_suggestion_ignores_later_same_scope_definitions() {
    let mut tree = ScopeTree::new();
    tree.define(ScopeId::ROOT, "value", pos(3, 0));
    let item = ParseItem::new("Value", pos(0, 0), ScopeId::ROOT);
    assert_eq!(suggest_symbol(&tree, &item), None);
}

#[test]
fn test_suggestion_from_ancestor() {
    let mut tree = ScopeTree::new();
    tree.define(ScopeId::ROOT, "Data", pos(0, 0));
    let f = tree.add_child(ScopeId::ROOT, "f", pos(1, 0));
    let item = ParseItem::new("data", pos(2, 4), f);
    assert_eq!(suggest_symbol(&tree, &item), Some("Data"));
}

#[test]
fn test_suggestion_ignores_later_ancestor_definitions() {
    let mut tree = ScopeTree::new();
    let f = tree.add_child(ScopeId::ROOT, "f", pos(0, 0));
    tree.define(ScopeId::ROOT, "Data", pos(8, 0));
    let item = ParseItem::new("data", pos(1, 4), f);
    assert_eq!(suggest_symbol(&tree, &item), None);
}

// === Reporting ===

#[test]
fn test_report_unresolved_with_suggestion() {
    let mut tree = ScopeTree::new();
    tree.define(ScopeId::ROOT, "value", pos(0, 2));
    tree.reference(ScopeId::ROOT, "value", pos(0, 2));
    tree.reference(ScopeId::ROOT, "retrun", pos(0, 14));
    tree.reference(ScopeId::ROOT, "Value", pos(0, 21));

    let mut lint = LintItems::new();
    report_unresolved(&tree, |_| false, &mut lint);
    assert_eq!(
        messages(&lint),
        vec![
            "no symbol named 'retrun' in scope",
            "no symbol named 'Value' in scope; did you mean 'value'?",
        ]
    );
    assert_eq!(lint.count_of(LintKind::Warning), 2);
}

#[test]
fn test_report_defined_after_usage() {
    let mut tree = ScopeTree::new();
    tree.reference(ScopeId::ROOT, "z", pos(0, 8));
    tree.reference(ScopeId::ROOT, "z", pos(0, 11));
    tree.define(ScopeId::ROOT, "z", pos(1, 0));

    let mut lint = LintItems::new();
    report_unresolved(&tree, |_| false, &mut lint);
    assert_eq!(messages(&lint), vec!["'z' is defined after it is used"]);
    assert_eq!(lint.items()[0].start(), pos(1, 0));
    assert_eq!(lint.items()[0].kind, LintKind::Info);
}

#[test]
fn test_report_skips_known_and_global_symbols() {
    let mut tree = ScopeTree::new();
    tree.reference(ScopeId::ROOT, "print", pos(0, 0));
    tree.reference(ScopeId::ROOT, "TRUE", pos(0, 6));
    tree.reference(ScopeId::ROOT, "shiny_input", pos(0, 12));

    let mut lint = LintItems::new();
    report_unresolved(&tree, |name| name == "shiny_input", &mut lint);
    assert!(lint.is_empty());
}

// === Unused definitions ===

#[test]
fn test_unused_definition_in_function() {
    let mut tree = ScopeTree::new();
    let f = tree.add_child(ScopeId::ROOT, "f", pos(0, 0));
    tree.define(f, "tmp", pos(1, 2));
    tree.reference(f, "tmp", pos(1, 2));

    let mut lint = LintItems::new();
    report_unused(&tree, |_| false, &mut lint);
    assert_eq!(messages(&lint), vec!["'tmp' is defined but not used"]);
}

#[test]
fn test_use_in_nested_function_counts() {
    let mut tree = ScopeTree::new();
    let f = tree.add_child(ScopeId::ROOT, "f", pos(0, 0));
    tree.define(f, "counter", pos(1, 2));
    let g = tree.add_child(f, "g", pos(2, 2));
    tree.reference(g, "counter", pos(3, 4));

    let mut lint = LintItems::new();
    report_unused(&tree, |_| false, &mut lint);
    assert!(lint.is_empty());
}

#[test]
fn test_formals_and_top_level_are_exempt() {
    let mut tree = ScopeTree::new();
    tree.define(ScopeId::ROOT, "unused_global", pos(0, 0));
    let f = tree.add_child(ScopeId::ROOT, "f", pos(1, 0));
    tree.define(f, "x", pos(1, 0));
    tree.add_formal(f, crate::scope::Formal::new("x", false));

    let mut lint = LintItems::new();
    report_unused(&tree, |_| false, &mut lint);
    assert!(lint.is_empty());
}
