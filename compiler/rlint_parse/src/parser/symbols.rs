//! Symbol bookkeeping: definitions, references and function scopes.

use rlint_lexer::TokenKind;
use tracing::debug;

use super::Parser;
use crate::calls::symbol_name;
use crate::cursor::TokenCursor;
use crate::known_symbols::is_known_symbol;
use crate::options::LintFlags;
use crate::scope::{Formal, UNKNOWN_FUNCTION};
use crate::token_class::{
    is_binary_op, is_extraction_operator, is_left_assign, is_namespace_extraction_operator,
    is_parent_left_assign, is_right_assign,
};

impl Parser<'_, '_> {
    /// Record what the identifier or string under the cursor does to the
    /// current scope.
    pub(super) fn handle_identifier(&mut self) {
        let token = self.cursor.current_token();
        let previous = self.cursor.previous_significant_token(1);
        let next = self.cursor.next_significant_token(1);

        // `pkg::name` and `pkg:::name`
        if is_namespace_extraction_operator(&previous) {
            let package = self.cursor.previous_significant_token(2);
            if matches!(package.kind, TokenKind::Identifier | TokenKind::String) {
                let scope = self.status.scope();
                let package = symbol_name(package.text);
                let symbol = symbol_name(token.text);
                if previous.text == "::" {
                    self.status.tree_mut().add_exported(scope, package, symbol);
                } else {
                    self.status.tree_mut().add_internal(scope, package, symbol);
                }
            }
            return;
        }
        if is_extraction_operator(&previous) || is_namespace_extraction_operator(&next) {
            return;
        }

        // `data(foo)` brings `foo` into scope.
        if previous.kind == TokenKind::LParen {
            let callee = self.cursor.previous_significant_token(2);
            if callee.kind == TokenKind::Identifier && callee.text == "data" {
                self.status.define(symbol_name(token.text), token.position);
            }
        }

        // `.` in arguments is almost always a pipe placeholder.
        if self.status.is_in_argument_list() && token.text == "." {
            return;
        }

        let symbol = symbol_name(token.text);
        let skip_reference_checks = self.status.is_in_argument_list()
            && !self.status.options().has(LintFlags::LINT_R_FUNCTIONS);

        if self.status.options().has(LintFlags::WARN_NO_SUCH_VARIABLE)
            && !skip_reference_checks
            && is_left_assign(&next)
            && !self.status.has_definition_in_tree(symbol, token.position)
            && !is_known_symbol(symbol)
            && !self.status.options().is_global(symbol)
        {
            let mut lookahead = self.cursor;
            if lookahead.move_to_next_significant_token()
                && lookahead.move_to_next_significant_token()
                && !lookahead.is_at_end_of_statement(self.status.is_in_parenthetical_scope())
            {
                self.warn_on_usages_ahead(symbol, lookahead);
            }
        }

        if is_parent_left_assign(&next) && !self.status.has_definition_in_tree(symbol, token.position)
        {
            self.status
                .lint()
                .no_existing_definition_for_parent_assignment(&token);
        }

        if is_left_assign(&next) || is_right_assign(&previous) {
            self.status.define(symbol, token.position);
        }

        if token.kind == TokenKind::Identifier {
            if self.status.is_within_nse_call() {
                self.status.reference_nse(symbol, token.position);
            } else {
                self.status.reference(symbol, token.position);
            }
        }
    }

    /// `x <- x + 1` with no prior `x`: flag the uses of `symbol` on the
    /// right-hand side that starts at `cursor`.
    ///
    /// Function bodies and `for` headers are skipped; a call to `symbol`
    /// may resolve to a function on the search path.
    fn warn_on_usages_ahead(&mut self, symbol: &str, mut cursor: TokenCursor<'_>) {
        let mut balance: isize = 0;
        loop {
            let token = cursor.current_token();

            if token.kind == TokenKind::Identifier && token.text == "for" {
                if !(cursor.move_to_next_significant_token() && cursor.fwd_to_matching_token()) {
                    return;
                }
            } else if token.kind == TokenKind::Identifier && matches!(token.text, "function" | "\\") {
                if !(cursor.move_to_next_significant_token()
                    && cursor.fwd_to_matching_token()
                    && cursor.move_to_next_significant_token())
                {
                    return;
                }
                let in_parens = self.status.is_in_parenthetical_scope();
                let skipped = if cursor.is_type(TokenKind::LBrace) {
                    cursor.fwd_to_matching_token()
                } else {
                    cursor.move_to_end_of_statement(in_parens)
                };
                if !skipped || cursor.is_at_end_of_statement(in_parens) {
                    return;
                }
            } else {
                let previous = cursor.previous_significant_token(1);
                let next = cursor.next_significant_token(1);
                if token.kind == TokenKind::Identifier
                    && symbol_name(token.text) == symbol
                    && !is_right_assign(&previous)
                    && !is_left_assign(&next)
                    && !next.kind.is_left_bracket()
                    && !is_extraction_operator(&previous)
                    && !is_extraction_operator(&next)
                {
                    self.status
                        .lint()
                        .no_symbol_named(symbol, token.position, None);
                }

                if token.kind.is_left_bracket() {
                    balance += 1;
                }
                let mut continues = false;
                if token.kind.is_right_bracket() {
                    balance -= 1;
                    if is_binary_op(&next) {
                        if !cursor.move_to_next_significant_token() {
                            return;
                        }
                        continues = true;
                    } else if balance <= 0 {
                        return;
                    }
                }
                if !continues && cursor.is_at_end_of_statement(false) {
                    return;
                }
            }

            if !cursor.move_to_next_significant_token() {
                return;
            }
        }
    }

    /// On the `(` after `function`: open the function's scope, named after
    /// the left-hand side of `name <- function(...)` when there is one.
    pub(super) fn enter_function_scope(&mut self) {
        let open = self.cursor.current_token();
        let mut name = UNKNOWN_FUNCTION;
        let mut position = open.position;

        let mut cursor = self.cursor;
        if cursor.move_to_previous_significant_token()
            && (cursor.content_equals("function") || cursor.content_equals("\\"))
            && cursor.move_to_previous_significant_token()
            && is_left_assign(&cursor.current_token())
            && cursor.move_to_previous_significant_token()
        {
            name = symbol_name(cursor.evaluation_associated_with_call());
            position = cursor.position();
        }

        debug!(name, "function definition");
        self.status.enter_function_scope(name, position);
    }

    /// Declare a formal of the function scope being parsed. Formals are
    /// defined at the scope's own position so that they are visible to the
    /// whole body.
    pub(super) fn define_formal(&mut self, name: &str, has_default: bool) {
        let scope = self.status.scope();
        let position = self.status.tree().get(scope).position();
        self.status.define(name, position);
        self.status
            .tree_mut()
            .add_formal(scope, Formal::new(name, has_default));
    }
}
