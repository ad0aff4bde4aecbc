use super::*;
use pretty_assertions::assert_eq;
use rlint_lexer::{tokenize, AnnotatedTokens};

fn annotated(source: &str) -> AnnotatedTokens {
    AnnotatedTokens::new(&tokenize(source))
}

fn messages(lint: &LintItems) -> Vec<(LintKind, &str)> {
    lint.iter()
        .map(|item| (item.kind, item.message.as_str()))
        .collect()
}

// === Structural errors ===

#[test]
fn unexpected_token_spans_token() {
    let tokens = annotated("x <- ]");
    let mut lint = LintItems::new();
    lint.unexpected_token(&tokens.at(4), None);
    lint.unexpected_token(&tokens.at(4), Some("')'"));

    assert_eq!(
        messages(&lint),
        vec![
            (LintKind::Error, "unexpected token ']'"),
            (LintKind::Error, "unexpected token ']', expected ')'"),
        ]
    );
    assert_eq!(lint.items()[0].start(), Position::new(0, 5));
    assert_eq!(lint.items()[0].end(), Position::new(0, 6));
    assert_eq!(lint.error_count(), 2);
}

#[test]
fn repeated_unexpected_token_is_reported_once() {
    let tokens = annotated("x <- 'abc");
    let mut lint = LintItems::new();
    lint.unexpected_token(&tokens.at(4), None);
    lint.unexpected_token(&tokens.at(4), None);

    assert_eq!(messages(&lint), vec![(LintKind::Error, "unexpected token ''abc'")]);
    assert_eq!(lint.error_count(), 1);
}

#[test]
fn closing_bracket_marks_pending_opener() {
    let tokens = annotated("(\n]");
    let mut lint = LintItems::new();
    lint.unexpected_closing_bracket(&tokens.at(2), Some(("(", Position::new(0, 0))));

    assert_eq!(
        messages(&lint),
        vec![
            (LintKind::Error, "unexpected closing bracket ']'"),
            (LintKind::Info, "unmatched bracket '(' here"),
        ]
    );
    assert_eq!(lint.items()[1].end(), Position::new(0, 1));
    assert_eq!(lint.error_count(), 1);
}

#[test]
fn unmatched_bracket_is_info_at_opener() {
    let mut lint = LintItems::new();
    lint.unmatched_bracket("[[", Position::new(3, 2));

    let item = &lint.items()[0];
    assert_eq!(item.kind, LintKind::Info);
    assert_eq!(item.start(), Position::new(3, 2));
    assert_eq!(item.end(), Position::new(3, 4));
    assert_eq!(item.message, "unmatched bracket '[[' here");
    assert!(!lint.has_errors());
}

#[test]
fn end_of_document_is_zero_width_after_token() {
    let tokens = annotated("f(x");
    let mut lint = LintItems::new();
    lint.unexpected_end_of_document(&tokens.at(2));

    let item = &lint.items()[0];
    assert_eq!(item.start(), Position::new(0, 3));
    assert_eq!(item.end(), Position::new(0, 3));
    assert_eq!(item.message, "unexpected end of document");
}

#[test]
fn error_limit() {
    let mut lint = LintItems::with_config(LintConfig {
        error_limit: 2,
        record_style: false,
    });
    lint.too_many_errors(Position::new(0, 0));
    assert!(!lint.limit_reached());
    lint.add(
        Position::new(1, 0),
        Position::new(1, 1),
        LintKind::Error,
        "boom",
    );
    assert!(lint.limit_reached());

    let mut unlimited = LintItems::with_config(LintConfig::unlimited());
    for _ in 0..1000 {
        unlimited.too_many_errors(Position::new(0, 0));
    }
    assert!(!unlimited.limit_reached());
}

// === Semantic warnings ===

#[test]
fn no_symbol_named_with_and_without_candidate() {
    let mut lint = LintItems::new();
    lint.no_symbol_named("Value", Position::new(2, 4), Some("value"));
    lint.no_symbol_named("zz", Position::new(0, 0), None);

    assert_eq!(
        messages(&lint),
        vec![
            (
                LintKind::Warning,
                "no symbol named 'Value' in scope; did you mean 'value'?"
            ),
            (LintKind::Warning, "no symbol named 'zz' in scope"),
        ]
    );
    assert_eq!(lint.items()[0].end(), Position::new(2, 9));
    assert!(!lint.has_errors());
}

#[test]
fn defined_after_usage_points_at_definition() {
    let mut lint = LintItems::new();
    lint.symbol_defined_after_usage("z", Position::new(0, 12));
    let item = &lint.items()[0];
    assert_eq!(item.kind, LintKind::Info);
    assert_eq!(item.message, "'z' is defined after it is used");
    assert_eq!(item.start(), Position::new(0, 12));
    assert_eq!(item.end(), Position::new(0, 13));
}

#[test]
fn equality_comparison_names_predicate() {
    let mut lint = LintItems::new();
    lint.incorrect_equality_comparison(
        Position::new(0, 0),
        Position::new(0, 9),
        "is.null",
        "NULL",
    );
    assert_eq!(
        lint.items()[0].message,
        "use 'is.null()' to check whether expression evaluates to NULL"
    );
}

// === Style ===

#[test]
fn style_lint_is_dropped_unless_enabled() {
    let tokens = annotated("a$b");
    let mut quiet = LintItems::new();
    quiet.unexpected_whitespace_around_operator(&tokens.at(1));
    quiet.expected_whitespace(&tokens.at(1));
    assert!(quiet.is_empty());

    let mut loud = LintItems::with_config(LintConfig::default().with_style(true));
    loud.unexpected_whitespace_around_operator(&tokens.at(1));
    loud.expected_whitespace(&tokens.at(1));
    assert_eq!(
        messages(&loud),
        vec![
            (
                LintKind::Style,
                "unexpected whitespace around extraction operator"
            ),
            (LintKind::Style, "expected whitespace"),
        ]
    );
    assert_eq!(loud.items()[1].start(), loud.items()[1].end());
    assert_eq!(loud.count_of(LintKind::Style), 2);
}

#[test]
fn kinds_render_wire_names() {
    let names: Vec<String> = [
        LintKind::Style,
        LintKind::Info,
        LintKind::Warning,
        LintKind::Error,
    ]
    .iter()
    .map(ToString::to_string)
    .collect();
    assert_eq!(names, vec!["style", "info", "warning", "error"]);
}
