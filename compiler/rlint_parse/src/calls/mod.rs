//! Call validation against in-document function definitions.
//!
//! When a call's callee resolves to a function literal defined earlier in
//! the document, the supplied arguments are matched to its formals the way
//! the language does it: exact names first, then unique name prefixes,
//! then positions, then defaults. Leftovers and gaps become lint.

use std::collections::BTreeMap;

use rlint_diagnostic::LintKind;
use rlint_lexer::{Position, TokenKind};
use tracing::debug;

use crate::cursor::TokenCursor;
use crate::scope::Formal;
use crate::status::ParseStatus;
use crate::token_class::is_pipe_operator;

/// Name of the formal that swallows extra arguments.
const DOTS: &str = "...";

/// Arguments supplied at a call site, as source text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallArguments {
    /// Keyed by argument name, in name order.
    pub named: BTreeMap<String, String>,
    pub unnamed: Vec<String>,
}

impl CallArguments {
    /// Collect the arguments of the call whose `(` is under `open`.
    pub fn collect(open: TokenCursor<'_>) -> Self {
        let mut arguments = CallArguments::default();
        let mut cursor = open;
        if !cursor.is_type(TokenKind::LParen) || !cursor.move_to_next_significant_token() {
            return arguments;
        }
        if cursor.is_type(TokenKind::RParen) {
            return arguments;
        }

        // `f(,)` passes two empty arguments.
        if cursor.is_type(TokenKind::Comma)
            && cursor.next_significant_token(1).kind == TokenKind::RParen
        {
            arguments.unnamed.push(String::new());
            arguments.unnamed.push(String::new());
            return arguments;
        }

        loop {
            let mut name = None;
            if cursor.is_looking_at_named_argument_in_function_call() {
                name = Some(symbol_name(cursor.current_token().text).to_string());
                if !(cursor.move_to_next_significant_token()
                    && cursor.move_to_next_significant_token())
                {
                    return arguments;
                }
            }

            let begin = cursor.current_token();
            let mut end = None;
            loop {
                let token = cursor.current_token();
                if token.kind == TokenKind::Comma || token.kind.is_right_bracket() {
                    break;
                }
                cursor.fwd_to_matching_token();
                end = Some(cursor.current_token());
                if !cursor.move_to_next_significant_token() {
                    break;
                }
            }

            let text = end.map_or("", |end| {
                let start = begin.offset as usize;
                let stop = end.offset as usize + end.text.len();
                cursor.tokens().source().get(start..stop).unwrap_or_default()
            });

            match name {
                Some(name) => {
                    arguments.named.insert(name, text.to_string());
                }
                None => arguments.unnamed.push(text.to_string()),
            }

            if !(cursor.is_type(TokenKind::Comma) && cursor.move_to_next_significant_token()) {
                break;
            }
        }
        arguments
    }

    fn passes_dots(&self) -> bool {
        self.unnamed.iter().any(|argument| argument == DOTS)
    }
}

/// Strip the quotes or backticks from a quoted name.
pub(crate) fn symbol_name(text: &str) -> &str {
    let bytes = text.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(open @ (b'"' | b'\'' | b'`')), Some(close)) if text.len() >= 2 && open == close => {
            &text[1..text.len() - 1]
        }
        _ => text,
    }
}

/// Result of matching a call's arguments to a formal list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchedCall {
    /// Formal name to the supplied argument text (`None` when unfilled).
    pub matched: BTreeMap<String, Option<String>>,
    /// `(supplied, formal)` pairs matched by prefix.
    pub prefix_matches: Vec<(String, String)>,
    /// Named arguments that match no formal.
    pub unmatched: Vec<String>,
}

impl MatchedCall {
    pub fn new(formals: &[Formal], arguments: &CallArguments) -> Self {
        let mut call = MatchedCall::default();
        let mut remaining: Vec<&Formal> = formals.iter().collect();
        let mut names: Vec<&str> = arguments.named.keys().map(String::as_str).collect();

        // Exact names.
        names.retain(|name| {
            let Some(index) = remaining.iter().position(|formal| formal.name == *name) else {
                return true;
            };
            let formal = remaining.remove(index);
            call.matched
                .insert(formal.name.clone(), arguments.named.get(*name).cloned());
            false
        });

        // Unique prefixes. An ambiguous prefix stays unmatched.
        names.retain(|name| {
            let mut candidates = remaining
                .iter()
                .enumerate()
                .filter(|(_, formal)| formal.name.starts_with(*name));
            let (Some((index, _)), None) = (candidates.next(), candidates.next()) else {
                return true;
            };
            let formal = remaining.remove(index);
            call.matched
                .insert(formal.name.clone(), arguments.named.get(*name).cloned());
            call.prefix_matches
                .push(((*name).to_string(), formal.name.clone()));
            false
        });

        // Positions.
        let positional = remaining.len().min(arguments.unnamed.len());
        for (formal, argument) in remaining.drain(..positional).zip(&arguments.unnamed) {
            call.matched.insert(formal.name.clone(), Some(argument.clone()));
        }

        for formal in remaining {
            call.matched.insert(formal.name.clone(), None);
        }

        call.unmatched = names.into_iter().map(str::to_string).collect();
        call
    }

    fn is_filled(&self, formal: &str) -> bool {
        self.matched.get(formal).is_some_and(Option::is_some)
    }
}

/// Validate the call whose `(` is under `open` against the function it
/// names, when that function is defined earlier in the document.
pub(crate) fn validate_call(open: TokenCursor<'_>, status: &mut ParseStatus<'_>) {
    if !open.is_type(TokenKind::LParen) {
        return;
    }
    let mut end = open;
    end.fwd_to_matching_token();

    let mut callee = open;
    if !callee.move_to_previous_significant_token() {
        return;
    }
    if !matches!(
        callee.current_token().kind,
        TokenKind::Identifier | TokenKind::String
    ) {
        return;
    }
    let mut start = callee;
    start.move_to_start_of_evaluation();

    let name = callee.evaluation_associated_with_call();
    let tree = status.tree();
    let Some(function) = tree.find_function(status.scope(), name, callee.position()) else {
        return;
    };
    let formals = tree.get(function).formals().to_vec();
    if formals.is_empty() || formals.iter().any(|formal| formal.name == DOTS) {
        return;
    }

    let mut arguments = CallArguments::collect(open);
    if is_pipe_operator(&callee.previous_significant_token(1)) {
        let head = callee.head_of_pipe_chain();
        if !head.is_empty() {
            arguments.unnamed.insert(0, head.to_string());
        }
    }

    let call = MatchedCall::new(&formals, &arguments);
    debug!(
        callee = name,
        named = arguments.named.len(),
        unnamed = arguments.unnamed.len(),
        "validate call"
    );

    let range = (start.position(), end.end_position());
    report(status, range, name, &formals, &arguments, &call);
}

fn report(
    status: &mut ParseStatus<'_>,
    (start, end): (Position, Position),
    name: &str,
    formals: &[Formal],
    arguments: &CallArguments,
    call: &MatchedCall,
) {
    let lint = status.lint();

    if !call.prefix_matches.is_empty() {
        let pairs = call
            .prefix_matches
            .iter()
            .map(|(supplied, formal)| format!("'{supplied}' -> '{formal}'"))
            .collect::<Vec<_>>()
            .join(", ");
        let noun = if call.prefix_matches.len() == 1 {
            "argument"
        } else {
            "arguments"
        };
        lint.add(
            start,
            end,
            LintKind::Warning,
            format!("partially matched {noun}: [{pairs}]"),
        );
    }

    let supplied = arguments.named.len() + arguments.unnamed.len()
        - usize::from(arguments.passes_dots());
    if supplied > formals.len() {
        lint.add(
            start,
            end,
            LintKind::Error,
            format!("too many arguments in call to '{name}'"),
        );
    }

    if !arguments.passes_dots() {
        for formal in formals {
            if !call.is_filled(&formal.name) && !formal.has_default && !formal.missingness_handled
            {
                lint.add(
                    start,
                    end,
                    LintKind::Warning,
                    format!("argument '{}' is missing, with no default", formal.name),
                );
            }
        }
    }

    if !call.unmatched.is_empty() {
        let noun = if call.unmatched.len() == 1 {
            "argument"
        } else {
            "arguments"
        };
        let names = call.unmatched.join("', '");
        lint.add(
            start,
            end,
            LintKind::Error,
            format!("unmatched {noun}: '{names}'"),
        );
    }
}
