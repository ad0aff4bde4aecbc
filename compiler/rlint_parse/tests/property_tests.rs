//! Property-based tests for the parser.
//!
//! The parser must accept anything: arbitrary text and random soups of R
//! tokens both have to finish with a well-formed scope tree.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use proptest::prelude::*;
use rlint_parse::{check, parse, ParseOptions, ScopeId, ScopeTree};

// -- Strategies --

/// Fragments that push the parser through most of its states.
const FRAGMENTS: &[&str] = &[
    "x", "y1", ".z", "`odd name`", "'s'", "\"t\"", "1", "2L", "0x1F", "TRUE", "NULL", "NA",
    "<-", "<<-", "->", "=", "==", "!=", "+", "-", "*", "/", "^", "~", "!", "?", "$", "@",
    "::", ":::", "%>%", "|>", ":", "(", ")", "{", "}", "[", "]", "[[", "]]", ",", ";",
    "function", "\\", "if", "else", "for", "in", "while", "repeat", "break", "next",
    "missing", "library", "...", " ", "  ", "\n", "\n  ", "# note\n",
];

fn fragment_soup() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS), 0..80)
        .prop_map(|fragments| fragments.join(" "))
}

fn dense_soup() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS), 0..80)
        .prop_map(|fragments| fragments.concat())
}

// -- Invariants --

/// Root has no parent, every other scope's parent lists it as a child and
/// a depth-first walk reaches every scope once.
fn assert_well_formed(tree: &ScopeTree) {
    assert_eq!(tree.root().parent(), None);

    let walked = tree.walk();
    assert_eq!(walked.len(), tree.len());
    assert_eq!(walked.first().map(|(_, id)| *id), Some(ScopeId::ROOT));

    for (depth, id) in walked {
        let ancestors = tree.ancestors(id).count();
        assert_eq!(ancestors, depth + 1);
        if let Some(parent) = tree.get(id).parent() {
            assert!(tree.get(parent).children().contains(&id));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn parse_accepts_arbitrary_text(source in "\\PC{0,200}") {
        let results = parse(&source, &ParseOptions::all());
        assert_well_formed(results.tree());
    }

    #[test]
    fn parse_accepts_token_soup(source in fragment_soup()) {
        let results = parse(&source, &ParseOptions::all());
        assert_well_formed(results.tree());
    }

    #[test]
    fn check_accepts_dense_token_soup(source in dense_soup()) {
        let results = check(&source, &ParseOptions::all());
        assert_well_formed(results.tree());
    }

    #[test]
    fn error_limit_is_respected(source in fragment_soup(), limit in 1usize..8) {
        let options = ParseOptions::default().with_error_limit(limit);
        let results = parse(&source, &options);
        // The step that crosses the limit and the end-of-document check may
        // add a few more.
        prop_assert!(results.lint().error_count() <= limit + 8);
    }

    #[test]
    fn lint_ranges_are_ordered(source in fragment_soup()) {
        let results = check(&source, &ParseOptions::all());
        for item in results.lint().iter() {
            prop_assert!(item.start() <= item.end(), "{:?}", item);
        }
    }
}
