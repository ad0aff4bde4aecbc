//! Local checks run by the parser at specific tokens.

use rlint_lexer::TokenKind;
use tracing::trace;

use super::{Parser, Step};
use crate::token_class::{
    is_binary_op, is_equality_comparison, is_extraction_operator, is_left_assign,
    is_na_keyword, is_right_assign, is_valid_as_identifier, is_valid_as_unary_operator,
    is_whitespace,
};

impl Parser<'_, '_> {
    /// When the next significant token is `else`, close the `if` it belongs
    /// to and move past it. Returns the step to continue with.
    ///
    /// An `else` closes every brace-less body opened since its `if`:
    /// `if (a) for (i in x) b else c` is one statement.
    pub(super) fn handle_else(&mut self) -> Option<Step> {
        let next = self.cursor.next_significant_token(1);
        if next.kind != TokenKind::Identifier || next.text != "else" {
            return None;
        }
        self.cursor.move_to_next_significant_token();
        let token = self.cursor.current_token();

        while self.status.is_in_control_flow_statement()
            && !self.status.is_in_if_statement_or_expression()
        {
            self.status.pop_state();
        }
        if self.status.is_in_if_statement_or_expression() {
            self.status.pop_state();
        } else {
            self.status.lint().unexpected_token(&token, None);
        }

        // At the top level a line break has already ended the `if`.
        if self.status.is_at_top_level() && self.cursor.is_first_significant_token_on_line() {
            self.status.lint().unexpected_token(&token, None);
        }

        if !self.cursor.move_to_next_significant_token() {
            self.status.unexpected_end_of_document(&token);
            return Some(Step::Done);
        }
        Some(Step::Start)
    }

    /// Style checks on the binary operator under the cursor.
    pub(super) fn check_binary_operator_whitespace(&mut self) {
        let operator = self.cursor.current_token();
        let before = is_whitespace(&self.cursor.previous_token());
        let after = is_whitespace(&self.cursor.next_token());

        if matches!(operator.text, "/" | "*" | "^" | "?" | "**") {
            if before != after {
                self.status
                    .lint()
                    .inconsistent_whitespace_around_operator(&operator);
            }
            return;
        }

        let extraction = is_extraction_operator(&operator);
        if extraction || operator.text == ":" {
            if before || after {
                self.status
                    .lint()
                    .unexpected_whitespace_around_operator(&operator);
            }
            if extraction {
                let next = self.cursor.next_significant_token(1);
                if !matches!(next.kind, TokenKind::Identifier | TokenKind::String) {
                    self.status.lint().unexpected_token(&next, None);
                }
            }
        } else if !before || !after {
            self.status
                .lint()
                .expected_whitespace_around_operator(&operator);
        }
    }

    /// Two operands on separate lines inside brackets: `f(a\n b)`.
    pub(super) fn check_for_missing_comma(&mut self) {
        let next = self.cursor.next_significant_token(1);
        if self.status.is_in_parenthetical_scope() && is_valid_as_identifier(&next) {
            let token = self.cursor.current_token();
            self.status.lint().expected_comma_following_token(&token);
        }
    }

    /// `x == NULL`, `x != NA` and `x == NaN` never do what they look like.
    pub(super) fn check_incorrect_comparison(&mut self) {
        if !is_equality_comparison(&self.cursor.previous_significant_token(1)) {
            return;
        }
        let token = self.cursor.current_token();
        let check = if token.text == "NULL" {
            "is.null"
        } else if is_na_keyword(&token) {
            "is.na"
        } else if token.text == "NaN" {
            "is.nan"
        } else {
            return;
        };

        let mut start = self.cursor;
        if !(start.move_to_previous_significant_token()
            && start.move_to_previous_significant_token()
            && start.move_to_start_of_evaluation())
        {
            return;
        }
        self.status.lint().incorrect_equality_comparison(
            start.position(),
            token.end_position(),
            check,
            token.text,
        );
    }

    /// Step over a formula such as `y ~ log(x) + z` or `~ a | b`.
    ///
    /// Formula operands are never evaluated, so their symbols are neither
    /// definitions nor references. Returns whether a formula was skipped;
    /// the cursor is then on its last token. An assignment ends the
    /// lookahead so that `fit <- y ~ x` still defines `fit`.
    pub(super) fn skip_formulas(&mut self) -> bool {
        let mut cursor = self.cursor;
        let mut found_tilde = false;

        while !cursor.is_at_end_of_document() {
            while is_valid_as_unary_operator(&cursor.current_token()) {
                if cursor.content_equals("~") {
                    found_tilde = true;
                }
                if !cursor.move_to_next_significant_token() {
                    break;
                }
            }

            if cursor.current_token().kind.is_left_bracket() && !cursor.fwd_to_matching_token() {
                return false;
            }

            let state = if cursor.is_type(TokenKind::RParen) {
                self.status.peek_state(1)
            } else {
                self.status.current_state()
            };
            if cursor.is_at_end_of_statement(state.is_parenthetical()) {
                break;
            }
            if !cursor.move_to_next_significant_token() {
                break;
            }

            // Calls and subsets in operand position.
            let mut ended = false;
            while cursor.current_token().kind.is_left_bracket() {
                if !cursor.fwd_to_matching_token() {
                    return false;
                }
                if cursor.is_at_end_of_statement(self.status.is_in_parenthetical_scope()) {
                    ended = true;
                    break;
                }
                if !cursor.move_to_next_significant_token() {
                    break;
                }
            }
            if ended {
                break;
            }

            let operator = cursor.current_token();
            if !is_binary_op(&operator) || is_left_assign(&operator) || is_right_assign(&operator)
            {
                break;
            }
            if operator.text == "~" {
                found_tilde = true;
            }
            if !cursor.move_to_next_significant_token() {
                break;
            }
        }

        if found_tilde {
            trace!(
                from = self.cursor.offset(),
                to = cursor.offset(),
                "skipped formula"
            );
            self.cursor = cursor;
        }
        found_tilde
    }
}
