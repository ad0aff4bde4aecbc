use super::*;
use pretty_assertions::assert_eq;

fn pos(row: u32, column: u32) -> Position {
    Position::new(row, column)
}

#[test]
fn test_root_scope() {
    let tree = ScopeTree::new();
    assert_eq!(tree.len(), 1);
    assert!(tree.is_empty());
    assert_eq!(tree.root().name(), "<root>");
    assert_eq!(tree.root().position(), pos(0, 0));
    assert!(tree.root().parent().is_none());
    assert!(tree.root().is_root());
}

#[test]
fn test_empty_until_something_is_recorded() {
    let mut referenced = ScopeTree::new();
    referenced.reference(ScopeId::ROOT, "x", pos(0, 0));
    assert!(!referenced.is_empty());
    assert_eq!(referenced.len(), 1);

    let mut used = ScopeTree::new();
    used.add_exported(ScopeId::ROOT, "stats", "median");
    assert!(!used.is_empty());

    let mut nested = ScopeTree::new();
    nested.add_child(ScopeId::ROOT, "f", pos(0, 0));
    assert!(!nested.is_empty());
}

#[test]
fn test_children_and_parents() {
    let mut tree = ScopeTree::new();
    let f = tree.add_child(ScopeId::ROOT, "f", pos(0, 0));
    let g = tree.add_child(f, "g", pos(1, 2));
    let h = tree.add_child(ScopeId::ROOT, UNKNOWN_FUNCTION, pos(5, 0));

    assert_eq!(tree.root().children(), &[f, h]);
    assert_eq!(tree.get(g).parent(), Some(f));
    assert_eq!(tree.ancestors(g).collect::<Vec<_>>(), vec![g, f, ScopeId::ROOT]);
    assert_eq!(
        tree.walk(),
        vec![(0, ScopeId::ROOT), (1, f), (2, g), (1, h)]
    );
}

#[test]
fn test_positions_are_sorted_and_deduplicated() {
    let mut tree = ScopeTree::new();
    tree.define(ScopeId::ROOT, "x", pos(3, 0));
    tree.define(ScopeId::ROOT, "x", pos(1, 0));
    tree.define(ScopeId::ROOT, "x", pos(3, 0));
    assert_eq!(
        tree.root().defined_symbols().get("x"),
        Some(&vec![pos(1, 0), pos(3, 0)])
    );
}

#[test]
fn test_same_scope_resolution_is_positional() {
    let mut tree = ScopeTree::new();
    tree.define(ScopeId::ROOT, "z", pos(0, 12));
    assert!(!tree.is_defined(ScopeId::ROOT, "z", pos(0, 8)));
    assert!(tree.is_defined(ScopeId::ROOT, "z", pos(0, 12)));
    assert!(tree.is_defined(ScopeId::ROOT, "z", pos(2, 0)));
}

#[test]
fn test_ancestor_resolution_ignores_position() {
    let mut tree = ScopeTree::new();
    let f = tree.add_child(ScopeId::ROOT, "f", pos(0, 0));
    tree.define(ScopeId::ROOT, "counter", pos(9, 0));
    assert!(tree.is_defined(f, "counter", pos(1, 0)));
    assert!(!tree.is_defined(f, "missing", pos(1, 0)));

    tree.define(f, "local", pos(1, 0));
    assert!(!tree.is_defined(ScopeId::ROOT, "local", pos(2, 0)));
}

#[test]
fn test_package_caches() {
    let mut tree = ScopeTree::new();
    tree.add_exported(ScopeId::ROOT, "dplyr", "filter");
    tree.add_exported(ScopeId::ROOT, "dplyr", "mutate");
    tree.add_internal(ScopeId::ROOT, "stats", "C_cor");

    let exported = tree.root().exported_symbols();
    assert_eq!(exported.get("dplyr").map(BTreeSet::len), Some(2));
    assert!(tree.root().internal_symbols()["stats"].contains("C_cor"));
}

#[test]
fn test_find_function_prefers_latest_prior_definition() {
    let mut tree = ScopeTree::new();
    let first = tree.add_child(ScopeId::ROOT, "f", pos(0, 0));
    let second = tree.add_child(ScopeId::ROOT, "f", pos(4, 0));
    let inner = tree.add_child(second, "g", pos(5, 0));

    assert_eq!(tree.find_function(ScopeId::ROOT, "f", pos(2, 0)), Some(first));
    assert_eq!(tree.find_function(ScopeId::ROOT, "f", pos(9, 0)), Some(second));
    assert_eq!(tree.find_function(inner, "f", pos(9, 0)), Some(second));
    assert_eq!(tree.find_function(ScopeId::ROOT, "f", pos(0, 0)), None);
    assert_eq!(tree.find_function(ScopeId::ROOT, "g", pos(9, 0)), None);
}

#[test]
fn test_missingness_marks_nearest_formal() {
    let mut tree = ScopeTree::new();
    let f = tree.add_child(ScopeId::ROOT, "f", pos(0, 0));
    tree.add_formal(f, Formal::new("x", false));
    tree.add_formal(f, Formal::new("y", true));
    let inner = tree.add_child(f, UNKNOWN_FUNCTION, pos(1, 0));

    tree.mark_missingness_handled(inner, "x");
    assert!(tree.get(f).formals()[0].missingness_handled);
    assert!(!tree.get(f).formals()[1].missingness_handled);
}

#[test]
fn test_parse_items_order_by_position() {
    let mut items = vec![
        ParseItem::new("b", pos(2, 0), ScopeId::ROOT),
        ParseItem::new("a", pos(0, 4), ScopeId::ROOT),
        ParseItem::new("c", pos(0, 1), ScopeId::ROOT),
    ];
    items.sort();
    let symbols: Vec<_> = items.iter().map(|item| item.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["c", "a", "b"]);
}
