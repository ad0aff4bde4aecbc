use pretty_assertions::assert_eq;
use rlint_diagnostic::{LintItems, LintKind};
use rlint_lexer::Position;

use crate::{check, parse, ParseOptions, ScopeId};

fn messages(lint: &LintItems) -> Vec<&str> {
    lint.iter().map(|item| item.message.as_str()).collect()
}

fn parse_messages(source: &str) -> Vec<String> {
    let results = parse(source, &ParseOptions::core());
    messages(results.lint()).into_iter().map(str::to_string).collect()
}

fn check_messages(source: &str, options: &ParseOptions) -> Vec<String> {
    let results = check(source, options);
    messages(results.lint()).into_iter().map(str::to_string).collect()
}

fn style_messages(source: &str) -> Vec<String> {
    let results = parse(source, &ParseOptions::core().with_style(true));
    results
        .lint()
        .iter()
        .filter(|item| item.kind == LintKind::Style)
        .map(|item| item.message.clone())
        .collect()
}

fn has(messages: &[String], wanted: &str) -> bool {
    messages.iter().any(|message| message == wanted)
}

// === Definitions and scopes ===

#[test]
fn test_assignment_defines_and_references() {
    let results = parse("x <- 1", &ParseOptions::core());
    let root = results.tree().root();
    assert!(root.defines("x"));
    assert!(root.referenced_symbols().contains_key("x"));
    assert!(results.lint().is_empty());
}

#[test]
fn test_right_assignment_and_strings() {
    let results = parse("1 -> y\n'z' <- 2", &ParseOptions::core());
    let root = results.tree().root();
    assert!(root.defines("y"));
    assert!(root.defines("z"));
    assert!(!root.referenced_symbols().contains_key("z"));
}

#[test]
fn test_function_scope() {
    let results = parse(
        "f <- function(x) { y <- x + 1; y }",
        &ParseOptions::core(),
    );
    let tree = results.tree();
    assert!(tree.root().defines("f"));
    assert_eq!(tree.root().children().len(), 1);

    let f = tree.get(tree.root().children()[0]);
    assert_eq!(f.name(), "f");
    assert_eq!(f.parent(), Some(ScopeId::ROOT));
    assert!(f.defines("x"));
    assert!(f.defines("y"));
    assert!(f.referenced_symbols().contains_key("x"));
    assert!(f.referenced_symbols().contains_key("y"));
    assert!(!tree.root().defines("y"));
    assert!(results.lint().is_empty());
}

#[test]
fn test_formals_are_recorded() {
    let results = parse("g <- function(a, b = 2, ...) a", &ParseOptions::core());
    let tree = results.tree();
    let g = tree.get(tree.root().children()[0]);
    let formals: Vec<_> = g
        .formals()
        .iter()
        .map(|formal| (formal.name.as_str(), formal.has_default))
        .collect();
    assert_eq!(formals, vec![("a", false), ("b", true), ("...", false)]);
    assert!(g.defines_at_or_before("a", g.position()));
}

#[test]
fn test_anonymous_function_scope() {
    let results = parse("lapply(xs, function(x) x)", &ParseOptions::core());
    let tree = results.tree();
    let anonymous = tree.get(tree.root().children()[0]);
    assert_eq!(anonymous.name(), crate::UNKNOWN_FUNCTION);
    assert!(anonymous.defines("x"));
    assert!(results.lint().is_empty());
}

#[test]
fn test_backslash_lambda_opens_scope() {
    let results = parse("sq <- \\(v) v * v", &ParseOptions::core());
    let tree = results.tree();
    let sq = tree.get(tree.root().children()[0]);
    assert_eq!(sq.name(), "sq");
    assert!(sq.defines("v"));
}

#[test]
fn test_for_variable_is_defined() {
    let results = parse("for (i in 1:10) print(i)", &ParseOptions::core());
    assert!(results.tree().root().defines("i"));
    assert!(results.lint().is_empty());
}

#[test]
fn test_extraction_operands_are_not_symbols() {
    let results = parse("a$b\nc@d", &ParseOptions::core());
    let root = results.tree().root();
    assert!(root.referenced_symbols().contains_key("a"));
    assert!(!root.referenced_symbols().contains_key("b"));
    assert!(!root.referenced_symbols().contains_key("d"));
}

#[test]
fn test_namespace_lookups_are_cached() {
    let results = parse("dplyr::filter(x)\nutils:::head", &ParseOptions::core());
    let root = results.tree().root();
    assert!(root.exported_symbols()["dplyr"].contains("filter"));
    assert!(root.internal_symbols()["utils"].contains("head"));
    assert!(!root.referenced_symbols().contains_key("dplyr"));
    assert!(!root.referenced_symbols().contains_key("filter"));
}

#[test]
fn test_nse_call_references() {
    let results = parse("subset(df, value > 1)", &ParseOptions::core());
    let root = results.tree().root();
    assert!(root.nse_referenced_symbols().contains_key("value"));
    assert!(!root.referenced_symbols().contains_key("value"));
}

#[test]
fn test_data_call_defines_its_argument() {
    let results = parse("data(mtcars)", &ParseOptions::core());
    assert!(results.tree().root().defines("mtcars"));
}

#[test]
fn test_formula_symbols_are_skipped() {
    let results = parse("fit <- lm(y ~ x + z)", &ParseOptions::core());
    let root = results.tree().root();
    assert!(root.defines("fit"));
    assert!(!root.referenced_symbols().contains_key("y"));
    assert!(!root.referenced_symbols().contains_key("x"));
    assert!(results.lint().is_empty());
}

// === Structural lint ===

#[test]
fn test_balanced_input_is_clean() {
    for source in [
        "f(a, b[[1]], {c})",
        "x[1, 2]",
        "if (a) b else c",
        "{\nif (a) b\nelse c\n}",
        "if (a) if (b) if (c) d\ne",
        "while (TRUE) {\n  x <- 1\n  break\n}",
        "repeat { break }",
        "f <- function(a = 1, b) {\n  a + b\n}",
        "x <- -1\ny <- !x",
        "x\n-1",
    ] {
        assert_eq!(parse_messages(source), Vec::<String>::new(), "{source:?}");
    }
}

#[test]
fn test_unclosed_function_body() {
    let results = parse("f <- function(x) { x", &ParseOptions::core());
    assert!(results.lint().has_errors());
    let tree = results.tree();
    let f = tree.get(tree.root().children()[0]);
    assert!(f.defines("x"));
    assert!(has(
        &messages(results.lint())
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>(),
        "unmatched bracket '{' here"
    ));
}

#[test]
fn test_mismatched_closing_bracket() {
    let lint = parse_messages("f(x]");
    assert!(has(&lint, "unexpected closing bracket ']'"));
    assert!(has(&lint, "unmatched bracket '(' here"));
}

#[test]
fn test_identifier_after_identifier() {
    assert_eq!(parse_messages("a b"), vec!["unexpected token 'b'".to_string()]);
}

#[test]
fn test_bad_token_after_operator_is_reported_once() {
    let results = check("x <- 'abc", &ParseOptions::core());
    assert_eq!(messages(results.lint()), vec!["unexpected token ''abc'"]);
    assert_eq!(results.lint().error_count(), 1);

    let lint = parse_messages("x <- \0y");
    let nul = lint
        .iter()
        .filter(|m| m.as_str() == "unexpected token '\0'")
        .count();
    assert_eq!(nul, 1);
}

#[test]
fn test_top_level_else_on_new_line() {
    assert_eq!(
        parse_messages("if (a) b\nelse c"),
        vec!["unexpected token 'else'".to_string()]
    );
}

#[test]
fn test_missing_comma_across_lines() {
    assert!(has(&parse_messages("f(a\n b)"), "expected ',' after 'a'"));
}

#[test]
fn test_stray_closing_paren_at_top_level() {
    let results = parse("x)", &ParseOptions::core());
    assert!(results.lint().has_errors());
}

#[test]
fn test_error_limit_stops_parse() {
    let results = parse(")))))", &ParseOptions::core().with_error_limit(2));
    let lint = messages(results.lint());
    assert_eq!(lint.iter().filter(|m| m.starts_with("unexpected token")).count(), 2);
    assert_eq!(lint.last(), Some(&"too many errors emitted; stopping now"));
}

#[test]
fn test_empty_and_blank_documents() {
    for source in ["", "   \n\t\n", "# only a comment\n"] {
        let results = parse(source, &ParseOptions::core());
        assert!(results.lint().is_empty(), "{source:?}");
        assert_eq!(results.tree().len(), 1);
    }
}

// === Style lint ===

#[test]
fn test_extraction_whitespace() {
    assert_eq!(style_messages("a$b"), Vec::<String>::new());
    assert_eq!(
        style_messages("a $ b"),
        vec!["unexpected whitespace around extraction operator".to_string()]
    );
}

#[test]
fn test_binary_operator_whitespace() {
    assert_eq!(
        style_messages("a+b"),
        vec!["expected whitespace around binary operator".to_string()]
    );
    assert_eq!(style_messages("a + b"), Vec::<String>::new());
    assert_eq!(style_messages("a*b"), Vec::<String>::new());
    assert_eq!(
        style_messages("a *b"),
        vec!["inconsistent whitespace around operator".to_string()]
    );
}

#[test]
fn test_style_lint_is_off_by_default() {
    assert_eq!(parse_messages("a+b"), Vec::<String>::new());
}

#[test]
fn test_missing_argument_style() {
    assert!(has(
        &style_messages("f(a, , b)"),
        "missing argument to function call"
    ));
    assert!(has(
        &style_messages("f(a, )"),
        "missing argument to function call"
    ));
}

// === Semantic checks ===

#[test]
fn test_defined_after_usage() {
    assert_eq!(
        check_messages("{ print(z); z <- 1 }", &ParseOptions::core()),
        vec!["'z' is defined after it is used".to_string()]
    );
}

#[test]
fn test_suggestion_for_misspelled_symbol() {
    let lint = check_messages("{ value <- 1; retrun(Value) }", &ParseOptions::core());
    assert!(has(&lint, "no symbol named 'retrun' in scope"));
    assert!(has(
        &lint,
        "no symbol named 'Value' in scope; did you mean 'value'?"
    ));
}

#[test]
fn test_no_suggestion_from_later_definition() {
    let lint = check_messages("f <- function() Value\nvalue <- 1", &ParseOptions::core());
    assert_eq!(lint, vec!["no symbol named 'Value' in scope".to_string()]);
}

#[test]
fn test_self_referencing_assignment() {
    assert_eq!(
        check_messages("x <- x + 1", &ParseOptions::core()),
        vec!["no symbol named 'x' in scope".to_string()]
    );
    assert_eq!(
        check_messages("foo <- foo()", &ParseOptions::core()),
        Vec::<String>::new()
    );
}

#[test]
fn test_parent_assignment_without_definition() {
    let lint = check_messages(
        "f <- function() { counter <<- 1 }",
        &ParseOptions::core(),
    );
    assert!(has(
        &lint,
        "no existing definition for 'counter' in parent scope"
    ));
}

#[test]
fn test_incorrect_comparison() {
    let results = check("x <- 1\nif (x == NULL) 1", &ParseOptions::core());
    let item = results
        .lint()
        .iter()
        .find(|item| item.message.starts_with("use 'is.null()'"));
    assert!(item.is_some());
    if let Some(item) = item {
        assert_eq!(
            item.message,
            "use 'is.null()' to check whether expression evaluates to NULL"
        );
        assert_eq!(item.start(), Position::new(1, 4));
        assert_eq!(item.end(), Position::new(1, 13));
    }
}

#[test]
fn test_unused_definition() {
    let lint = check_messages(
        "f <- function() {\n  tmp <- 1\n  2\n}",
        &ParseOptions::all(),
    );
    assert!(has(&lint, "'tmp' is defined but not used"));
}

#[test]
fn test_directives_suppress_and_disable() {
    let options = ParseOptions::core();
    assert_eq!(
        check_messages("# !diagnostics suppress=input\nprint(input)", &options),
        Vec::<String>::new()
    );
    assert_eq!(
        check_messages("# !diagnostics off\na b c )", &options),
        Vec::<String>::new()
    );
}

// === Call validation ===

#[test]
fn test_too_many_arguments() {
    let lint = check_messages(
        "f <- function(a, b) a + b\nf(1, 2, 3)",
        &ParseOptions::core(),
    );
    assert!(has(&lint, "too many arguments in call to 'f'"));
}

#[test]
fn test_missing_argument_without_default() {
    let lint = check_messages(
        "f <- function(a, b) a\nf(1)",
        &ParseOptions::core(),
    );
    assert!(has(&lint, "argument 'b' is missing, with no default"));
}

#[test]
fn test_missingness_handled_in_body() {
    let lint = check_messages(
        "f <- function(a, b) if (missing(b)) a else b\nf(1)",
        &ParseOptions::core(),
    );
    assert_eq!(lint, Vec::<String>::new());
}

#[test]
fn test_partial_argument_match() {
    let lint = check_messages(
        "f <- function(alpha, beta = 2) alpha\nf(al = 1)",
        &ParseOptions::core(),
    );
    assert!(has(&lint, "partially matched argument: ['al' -> 'alpha']"));
}

#[test]
fn test_unmatched_argument() {
    let lint = check_messages(
        "f <- function(a) a\nf(1, zz = 2)",
        &ParseOptions::core(),
    );
    assert!(has(&lint, "unmatched argument: 'zz'"));
}

#[test]
fn test_argument_checks_can_be_disabled() {
    let options = ParseOptions::core().with_flag(crate::LintFlags::CHECK_ARGUMENTS, false);
    let lint = check_messages("f <- function(a, b) a\nf(1)", &options);
    assert_eq!(lint, Vec::<String>::new());
}
