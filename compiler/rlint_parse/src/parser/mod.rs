//! Explicit-stack parser.
//!
//! The grammar is a loop over [`Step`]s rather than recursive descent:
//! nesting lives on the [`ParseStatus`] state and bracket stacks, so deeply
//! nested input costs heap, not call stack. Every step leaves the cursor on
//! a significant token (or finishes the parse).
//!
//! The parser does not build an AST. As it walks, it records definitions
//! and references into the scope tree and reports lint.

mod checks;
mod symbols;

use rlint_diagnostic::LintItems;
use rlint_lexer::{AnnotatedTokens, TokenKind};
use tracing::{debug, trace};

use crate::calls::validate_call;
use crate::cursor::TokenCursor;
use crate::options::{LintFlags, ParseOptions};
use crate::scope::ScopeTree;
use crate::status::{ParseState, ParseStatus};
use crate::token_class::{
    can_close_argument_list, can_open_argument_list, is_binary_op, is_blank,
    is_valid_as_identifier, is_valid_as_unary_operator, is_whitespace,
};

/// Labels of the grammar. Each step consumes some tokens and names the next.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Step {
    Start,
    BinaryOperator,
    ArgumentList,
    ArgumentStart,
    ArgumentListEnd,
    Function,
    FunctionArgumentStart,
    FunctionArgumentListEnd,
    For,
    ForConditionEnd,
    While,
    WhileConditionEnd,
    If,
    IfConditionEnd,
    Repeat,
    InvalidToken,
    Done,
}

/// Parser state: a cursor and the status it mutates.
pub(crate) struct Parser<'t, 'o> {
    cursor: TokenCursor<'t>,
    status: ParseStatus<'o>,
    /// The current expression began with a unary operator.
    started_with_unary: bool,
}

impl<'t, 'o> Parser<'t, 'o> {
    pub(crate) fn new(tokens: &'t AnnotatedTokens, options: &'o ParseOptions) -> Self {
        Parser {
            cursor: TokenCursor::new(tokens),
            status: ParseStatus::new(options),
            started_with_unary: false,
        }
    }

    /// Walk the whole document, then report anything left open.
    pub(crate) fn parse(mut self) -> (ScopeTree, LintItems) {
        self.run();

        let last = self.cursor.current_token();
        if self.status.is_in_function_scope() {
            self.status.unexpected_end_of_document(&last);
        }
        self.status.add_lint_if_bracket_stack_not_empty(&last);
        self.status.into_parts()
    }

    fn run(&mut self) {
        if !self.cursor.fwd_over_whitespace_and_comments()
            || !self.cursor.current_token().kind.is_significant()
        {
            return;
        }
        debug!(tokens = self.cursor.tokens().len(), "begin parse");

        let mut step = Step::Start;
        while step != Step::Done {
            if self.status.lint().limit_reached() {
                let position = self.cursor.position();
                self.status.lint().too_many_errors(position);
                return;
            }
            trace!(
                ?step,
                state = %self.status.current_state(),
                offset = self.cursor.offset(),
                token = self.cursor.current_token().text,
                brackets = self.status.bracket_depth(),
                call = self.status.current_call_name(),
                "step"
            );
            step = match step {
                Step::Start => self.start(),
                Step::BinaryOperator => self.binary_operator(),
                Step::ArgumentList => self.argument_list(),
                Step::ArgumentStart => self.argument_start(),
                Step::ArgumentListEnd => self.argument_list_end(),
                Step::Function => self.function(),
                Step::FunctionArgumentStart => self.function_argument_start(),
                Step::FunctionArgumentListEnd => self.function_argument_list_end(),
                Step::For => self.for_loop(),
                Step::ForConditionEnd => {
                    self.condition_end(ParseState::ForExpression, ParseState::ForStatement)
                }
                Step::While => self.while_loop(),
                Step::WhileConditionEnd => {
                    self.condition_end(ParseState::WhileExpression, ParseState::WhileStatement)
                }
                Step::If => self.if_condition(),
                Step::IfConditionEnd => {
                    self.condition_end(ParseState::IfExpression, ParseState::IfStatement)
                }
                Step::Repeat => self.repeat(),
                Step::InvalidToken => self.invalid_token(),
                Step::Done => Step::Done,
            };
        }
    }

    // ─── Movement ───
    //
    // Each helper reports `unexpected end of document` when it runs out of
    // tokens; callers then finish the parse.

    fn advance(&mut self) -> bool {
        if self.cursor.move_to_next_token() {
            return true;
        }
        self.end_of_document()
    }

    fn advance_significant(&mut self) -> bool {
        if self.cursor.move_to_next_significant_token() {
            return true;
        }
        self.end_of_document()
    }

    /// Advance, flagging whitespace that stays on the line.
    fn advance_warn_on_blank(&mut self) -> bool {
        if !self.advance() {
            return false;
        }
        let token = self.cursor.current_token();
        if is_blank(&token) {
            self.status.lint().unnecessary_whitespace(&token);
        }
        self.skip_trivia()
    }

    /// Advance, flagging any whitespace (after a unary operator).
    fn advance_warn_on_whitespace(&mut self) -> bool {
        if !self.advance() {
            return false;
        }
        let token = self.cursor.current_token();
        if is_whitespace(&token) {
            self.status.lint().unnecessary_whitespace(&token);
        }
        self.skip_trivia()
    }

    /// Advance, flagging a missing space (after `if`, `for`, `)` ...).
    fn advance_warn_if_no_whitespace(&mut self) -> bool {
        if !self.advance() {
            return false;
        }
        let token = self.cursor.current_token();
        if !is_whitespace(&token) {
            self.status.lint().expected_whitespace(&token);
        }
        self.skip_trivia()
    }

    fn skip_trivia(&mut self) -> bool {
        if self.cursor.fwd_over_whitespace_and_comments()
            && self.cursor.current_token().kind.is_significant()
        {
            return true;
        }
        self.end_of_document()
    }

    fn end_of_document(&mut self) -> bool {
        let token = self.cursor.current_token();
        self.status.unexpected_end_of_document(&token);
        false
    }

    // ─── Expectations ───

    fn expect_content(&mut self, text: &str) -> bool {
        if self.cursor.content_equals(text) {
            return true;
        }
        let token = self.cursor.current_token();
        self.status.lint().unexpected_token(&token, Some(&format!("'{text}'")));
        false
    }

    fn expect_kind(&mut self, kind: TokenKind, expected: &str) -> bool {
        if self.cursor.is_type(kind) {
            return true;
        }
        let token = self.cursor.current_token();
        self.status.lint().unexpected_token(&token, Some(expected));
        false
    }

    fn expect_not_kind(&mut self, kind: TokenKind) -> bool {
        if !self.cursor.is_type(kind) {
            return true;
        }
        let token = self.cursor.current_token();
        self.status.lint().unexpected_token(&token, None);
        false
    }

    // ─── Steps ───

    fn start(&mut self) -> Step {
        self.check_incorrect_comparison();

        while self.skip_formulas() {
            if let Some(step) = self.handle_else() {
                return step;
            }
            if self
                .cursor
                .is_at_end_of_statement(self.status.is_in_parenthetical_scope())
            {
                self.status.pop_control_flow_states();
            }
            if !self.cursor.move_to_next_significant_token() {
                return Step::Done;
            }
        }

        self.started_with_unary = false;
        while is_valid_as_unary_operator(&self.cursor.current_token()) {
            self.started_with_unary = true;
            if self.cursor.content_equals("!") && self.cursor.next_significant_token(1).text == "!"
            {
                loop {
                    if !self.advance_significant() {
                        return Step::Done;
                    }
                    if !self.cursor.content_equals("!") {
                        break;
                    }
                }
            } else if !self.advance_warn_on_whitespace() {
                return Step::Done;
            }
        }

        let token = self.cursor.current_token();
        if token.kind == TokenKind::Identifier {
            match token.text {
                "function" | "\\" => return Step::Function,
                "for" => return Step::For,
                "while" => return Step::While,
                "if" => return Step::If,
                "repeat" => return Step::Repeat,
                _ => {}
            }
        }

        match token.kind {
            TokenKind::LParen => {
                self.status.push_state(ParseState::WithinParens);
                self.status.push_bracket(&token);
                if !self.advance_warn_on_blank() {
                    return Step::Done;
                }
                if self.cursor.is_type(TokenKind::RParen) {
                    let empty = self.cursor.current_token();
                    self.status.lint().unexpected_token(&empty, None);
                }
                Step::Start
            }
            TokenKind::LBrace => {
                self.status.push_state(ParseState::WithinBraces);
                self.status.push_bracket(&token);
                if !self.advance_warn_on_blank() {
                    return Step::Done;
                }
                Step::Start
            }
            TokenKind::Comma => self.comma(),
            kind if can_close_argument_list(kind) => self.close_parenthetical(),
            TokenKind::RBrace => self.close_brace(),
            TokenKind::Semi => self.semicolon(),
            _ if is_valid_as_identifier(&token) => self.operand(),
            _ if self.cursor.is_at_end_of_document() && !token.kind.is_significant() => Step::Done,
            _ => Step::InvalidToken,
        }
    }

    fn comma(&mut self) -> Step {
        if self.started_with_unary {
            return Step::InvalidToken;
        }
        match self.status.current_state() {
            ParseState::ParenArgumentList
            | ParseState::SingleBracketArgumentList
            | ParseState::DoubleBracketArgumentList => Step::ArgumentStart,
            ParseState::FunctionArgumentList => {
                if !self.advance_warn_if_no_whitespace() {
                    return Step::Done;
                }
                Step::FunctionArgumentStart
            }
            _ => Step::InvalidToken,
        }
    }

    /// `)`, `]` or `]]` in expression position.
    fn close_parenthetical(&mut self) -> Step {
        if self.started_with_unary {
            return Step::InvalidToken;
        }
        match self.status.current_state() {
            ParseState::ParenArgumentList
            | ParseState::SingleBracketArgumentList
            | ParseState::DoubleBracketArgumentList => Step::ArgumentListEnd,
            ParseState::FunctionArgumentList => Step::FunctionArgumentListEnd,
            ParseState::IfCondition => Step::IfConditionEnd,
            ParseState::ForCondition => Step::ForConditionEnd,
            ParseState::WhileCondition => Step::WhileConditionEnd,
            ParseState::WithinParens => {
                let token = self.cursor.current_token();
                self.status.pop_state();
                self.status.pop_bracket(&token);
                if self.cursor.is_at_end_of_document() {
                    return Step::Done;
                }
                self.check_for_missing_comma();
                if let Some(step) = self.handle_else() {
                    return step;
                }
                if self
                    .cursor
                    .is_at_end_of_statement(self.status.is_in_parenthetical_scope())
                {
                    self.status.pop_control_flow_states();
                }
                if !self.advance_significant() {
                    return Step::Done;
                }
                self.after_operand()
            }
            _ => Step::InvalidToken,
        }
    }

    fn close_brace(&mut self) -> Step {
        let token = self.cursor.current_token();
        self.status.pop_bracket(&token);
        if let Some(step) = self.handle_else() {
            return step;
        }
        self.status.pop_state();
        if self.started_with_unary {
            return Step::InvalidToken;
        }
        self.status.pop_control_flow_states();
        if self.cursor.is_at_end_of_document() {
            return Step::Done;
        }
        if !self.advance_significant() {
            return Step::Done;
        }
        self.after_operand()
    }

    fn semicolon(&mut self) -> Step {
        self.status.pop_control_flow_states();
        if self.started_with_unary || self.status.is_in_parenthetical_scope() {
            return Step::InvalidToken;
        }
        if self.cursor.is_at_end_of_document() {
            return Step::Done;
        }

        if !self.step_over_blank() {
            return Step::Done;
        }
        while self.cursor.is_type(TokenKind::Semi) {
            let extra = self.cursor.current_token();
            self.status.lint().unexpected_token(&extra, None);
            if self.cursor.is_at_end_of_document() || !self.step_over_blank() {
                return Step::Done;
            }
        }
        if is_whitespace(&self.cursor.current_token())
            && !self.cursor.move_to_next_significant_token()
        {
            return Step::Done;
        }
        Step::Start
    }

    /// Move to the next token, then over one run of blanks.
    fn step_over_blank(&mut self) -> bool {
        if !self.cursor.move_to_next_token() {
            return false;
        }
        if is_blank(&self.cursor.current_token()) {
            return self.cursor.move_to_next_token();
        }
        true
    }

    /// An identifier, number or string.
    fn operand(&mut self) -> Step {
        let token = self.cursor.current_token();
        let symbolic = matches!(token.kind, TokenKind::Identifier | TokenKind::String);

        if self.cursor.is_at_end_of_document() {
            if symbolic {
                self.handle_identifier();
            }
            self.status.pop_control_flow_states();
            return Step::Done;
        }

        if symbolic {
            self.handle_identifier();
        }

        if let Some(step) = self.handle_else() {
            return step;
        }

        let next = self.cursor.next_significant_token(1);
        if next.row() == token.row() && is_valid_as_identifier(&next) {
            self.cursor.move_to_next_significant_token();
            return Step::InvalidToken;
        }

        if (self.status.is_in_control_flow_statement() || self.status.is_at_top_level())
            && self.cursor.is_last_significant_token_on_line()
        {
            self.status.pop_control_flow_states();
            if !self.advance_significant() {
                return Step::Done;
            }
            return Step::Start;
        }

        let in_parens = self.status.is_in_parenthetical_scope();
        if is_binary_op(&next) {
            if !in_parens && is_valid_as_unary_operator(&next) && next.row() > token.row() {
                if !self.advance_significant() {
                    return Step::Done;
                }
                return Step::Start;
            }
            if !self.advance_significant() {
                return Step::Done;
            }
            return Step::BinaryOperator;
        }

        if token.kind != TokenKind::Number
            && can_open_argument_list(next.kind)
            && (next.row() == token.row() || in_parens)
        {
            if !self.advance_warn_on_blank() {
                return Step::Done;
            }
            return Step::ArgumentList;
        }

        if self.status.is_in_control_flow_statement()
            && (next.kind.is_right_bracket() || next.kind == TokenKind::Comma)
        {
            self.status.pop_control_flow_states();
        }

        self.check_for_missing_comma();
        if !self.advance_significant() {
            return Step::Done;
        }
        Step::Start
    }

    /// After a closed bracket: an operator continues the expression, an
    /// attached bracket opens another call, anything else starts afresh.
    fn after_operand(&mut self) -> Step {
        let token = self.cursor.current_token();
        let previous_row = self.cursor.previous_significant_token(1).row();
        let new_line = token.row() > previous_row;
        let in_parens = self.status.is_in_parenthetical_scope();

        if is_binary_op(&token) {
            if new_line && !in_parens && is_valid_as_unary_operator(&token) {
                return Step::Start;
            }
            return Step::BinaryOperator;
        }
        if can_open_argument_list(token.kind) && (!new_line || in_parens) {
            return Step::ArgumentList;
        }
        Step::Start
    }

    fn binary_operator(&mut self) -> Step {
        self.check_binary_operator_whitespace();
        if !self.cursor.is_at_end_of_document() {
            let next = self.cursor.next_significant_token(1);
            if !crate::token_class::can_follow_binary_operator(&next) {
                self.status.lint().unexpected_token(&next, None);
            }
        }
        if !self.advance_significant() {
            return Step::Done;
        }
        Step::Start
    }

    /// On the `(`, `[` or `[[` of a call or subset.
    fn argument_list(&mut self) -> Step {
        let token = self.cursor.current_token();
        let state = match token.kind {
            TokenKind::LParen => ParseState::ParenArgumentList,
            TokenKind::LBracket => ParseState::SingleBracketArgumentList,
            TokenKind::LDBracket => ParseState::DoubleBracketArgumentList,
            _ => return Step::InvalidToken,
        };

        if self.status.options().has(LintFlags::CHECK_ARGUMENTS) {
            validate_call(self.cursor, &mut self.status);
        }

        let callee = self.cursor.previous_significant_token(1);
        let nse = self.status.is_within_nse_call()
            || self.status.options().is_nse_function(callee.text);
        self.status.push_function_call_state(state, callee.text, nse);

        if state == ParseState::ParenArgumentList && callee.text == "missing" {
            let argument = self.cursor.next_significant_token(1);
            if argument.kind == TokenKind::Identifier {
                let scope = self.status.scope();
                self.status
                    .tree_mut()
                    .mark_missingness_handled(scope, argument.text);
            }
        }

        self.status.push_bracket(&token);
        if !self.advance_significant() {
            return Step::Done;
        }
        Step::ArgumentStart
    }

    fn argument_start(&mut self) -> Step {
        if self.cursor.is_type(TokenKind::Comma) {
            if self.cursor.previous_significant_token(1).kind == TokenKind::LParen {
                let comma = self.cursor.current_token();
                self.status.lint().missing_argument_to_function_call(&comma);
            }
            if !self.advance_significant() {
                return Step::Done;
            }
            while self.cursor.is_type(TokenKind::Comma) {
                if self.status.is_within_paren_function_call() {
                    let comma = self.cursor.current_token();
                    self.status.lint().missing_argument_to_function_call(&comma);
                }
                if !self.advance_significant() {
                    return Step::Done;
                }
            }
        }

        if self.closes_argument_list() {
            let previous = self.cursor.previous_significant_token(1);
            if self.status.is_within_paren_function_call() && previous.kind == TokenKind::Comma {
                self.status.lint().missing_argument_to_function_call(&previous);
            }
            return Step::ArgumentListEnd;
        }

        if self.cursor.is_looking_at_named_argument_in_function_call() {
            if !self.advance_significant() {
                return Step::Done;
            }
            self.check_binary_operator_whitespace();
            if !self.advance_significant() {
                return Step::Done;
            }
        }
        Step::Start
    }

    /// The current token closes the innermost call or subset.
    fn closes_argument_list(&self) -> bool {
        let kind = self.cursor.current_token().kind;
        match self.status.current_state() {
            ParseState::ParenArgumentList => kind == TokenKind::RParen,
            ParseState::SingleBracketArgumentList => kind == TokenKind::RBracket,
            ParseState::DoubleBracketArgumentList => kind == TokenKind::RDBracket,
            _ => false,
        }
    }

    fn argument_list_end(&mut self) -> Step {
        let token = self.cursor.current_token();
        self.status.pop_state();
        self.status.pop_bracket(&token);

        if let Some(step) = self.handle_else() {
            return step;
        }
        if self
            .cursor
            .is_at_end_of_statement(self.status.is_in_parenthetical_scope())
        {
            self.status.pop_control_flow_states();
        }
        if self.cursor.is_at_end_of_document() {
            return Step::Done;
        }
        if self.status.is_at_top_level() && self.cursor.is_last_significant_token_on_line() {
            if !self.advance_significant() {
                return Step::Done;
            }
            return Step::Start;
        }

        self.check_for_missing_comma();
        if !self.advance_significant() {
            return Step::Done;
        }
        self.after_operand()
    }

    fn function(&mut self) -> Step {
        if !self.cursor.content_equals("\\") && !self.expect_content("function") {
            return Step::Done;
        }
        if !self.advance_warn_on_blank() || !self.expect_kind(TokenKind::LParen, "'('") {
            return Step::Done;
        }
        let open = self.cursor.current_token();
        self.status.push_bracket(&open);
        self.enter_function_scope();

        if !self.advance_warn_on_blank() {
            return Step::Done;
        }
        if self.cursor.is_type(TokenKind::RParen) {
            return Step::FunctionArgumentListEnd;
        }
        Step::FunctionArgumentStart
    }

    fn function_argument_start(&mut self) -> Step {
        let token = self.cursor.current_token();
        if token.kind == TokenKind::Identifier {
            let next = self.cursor.next_significant_token(1);
            let has_default = next.text == "=";
            self.define_formal(token.text, has_default);

            if has_default {
                if !(self.advance_significant() && self.advance_significant()) {
                    return Step::Done;
                }
                return Step::Start;
            }
            if next.kind == TokenKind::Comma {
                if !(self.advance_significant() && self.advance_significant()) {
                    return Step::Done;
                }
                return Step::FunctionArgumentStart;
            }
            if next.kind == TokenKind::RParen && !self.advance_significant() {
                return Step::Done;
            }
        }
        Step::FunctionArgumentListEnd
    }

    fn function_argument_list_end(&mut self) -> Step {
        if !self.expect_kind(TokenKind::RParen, "')'") {
            return Step::Done;
        }
        let close = self.cursor.current_token();
        self.status.pop_state();
        self.status.pop_bracket(&close);
        if !self.advance_significant() {
            return Step::Done;
        }
        self.enter_body(ParseState::FunctionExpression, ParseState::FunctionStatement)
    }

    /// On the first token of a body: `{` opens the expression form,
    /// anything else the brace-less statement form.
    fn enter_body(&mut self, expression: ParseState, statement: ParseState) -> Step {
        if self.cursor.is_type(TokenKind::LBrace) {
            let brace = self.cursor.current_token();
            self.status.push_state(expression);
            self.status.push_bracket(&brace);
            if !self.advance_significant() {
                return Step::Done;
            }
        } else {
            self.status.push_state(statement);
        }
        Step::Start
    }

    fn for_loop(&mut self) -> Step {
        if !self.expect_content("for")
            || !self.advance_warn_if_no_whitespace()
            || !self.expect_kind(TokenKind::LParen, "'('")
        {
            return Step::Done;
        }
        let open = self.cursor.current_token();
        self.status.push_bracket(&open);

        if !self.advance_warn_on_blank() || !self.expect_kind(TokenKind::Identifier, "an identifier")
        {
            return Step::Done;
        }
        let variable = self.cursor.current_token();
        self.status.define(variable.text, variable.position);

        if !self.advance_significant()
            || !self.expect_content("in")
            || !self.advance_significant()
            || !self.expect_not_kind(TokenKind::RParen)
        {
            return Step::Done;
        }
        self.status.push_state(ParseState::ForCondition);
        Step::Start
    }

    fn while_loop(&mut self) -> Step {
        if !self.expect_content("while")
            || !self.advance_warn_if_no_whitespace()
            || !self.expect_kind(TokenKind::LParen, "'('")
        {
            return Step::Done;
        }
        let open = self.cursor.current_token();
        self.status.push_bracket(&open);
        self.status.push_state(ParseState::WhileCondition);

        if !self.advance_warn_on_blank() || !self.expect_not_kind(TokenKind::RParen) {
            return Step::Done;
        }
        Step::Start
    }

    fn if_condition(&mut self) -> Step {
        if !self.expect_content("if")
            || !self.advance_warn_if_no_whitespace()
            || !self.expect_kind(TokenKind::LParen, "'('")
        {
            return Step::Done;
        }
        let open = self.cursor.current_token();
        self.status.push_bracket(&open);
        self.status.push_state(ParseState::IfCondition);

        if !self.advance_significant() || !self.expect_not_kind(TokenKind::RParen) {
            return Step::Done;
        }
        Step::Start
    }

    /// On the `)` closing an `if`, `for` or `while` condition.
    fn condition_end(&mut self, expression: ParseState, statement: ParseState) -> Step {
        if !self.expect_kind(TokenKind::RParen, "')'") {
            return Step::Done;
        }
        let close = self.cursor.current_token();
        self.status.pop_state();
        self.status.pop_bracket(&close);
        if !self.advance_warn_if_no_whitespace() {
            return Step::Done;
        }
        self.enter_body(expression, statement)
    }

    fn repeat(&mut self) -> Step {
        if !self.expect_content("repeat") || !self.advance_warn_if_no_whitespace() {
            return Step::Done;
        }
        self.enter_body(ParseState::RepeatExpression, ParseState::RepeatStatement)
    }

    fn invalid_token(&mut self) -> Step {
        let token = self.cursor.current_token();
        debug!(
            token = token.text,
            row = token.row(),
            column = token.column(),
            "invalid token"
        );
        self.status.lint().unexpected_token(&token, None);
        if !self.cursor.move_to_next_significant_token() {
            return Step::Done;
        }
        Step::Start
    }
}

#[cfg(test)]
mod tests;
