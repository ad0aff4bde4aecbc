//! Token cursor for navigating annotated tokens.
//!
//! A [`TokenCursor`] is a copyable index into an [`AnnotatedTokens`]
//! sequence. Speculative lookahead copies the cursor and moves the copy; the
//! tokens themselves are never touched. Reads past either end yield the
//! dummy `Error` token, so lookaround never needs bounds checks.

use rlint_lexer::{AnnotatedTokens, Position, TokenKind, TokenRef};
use tracing::trace;

use crate::token_class::{
    can_open_argument_list, is_binary_op, is_blank, is_extraction_operator, is_pipe_operator,
    is_valid_as_unary_operator,
};

/// Cursor over annotated tokens.
#[derive(Clone, Copy, Debug)]
pub struct TokenCursor<'a> {
    tokens: &'a AnnotatedTokens,
    offset: usize,
}

impl<'a> TokenCursor<'a> {
    /// Create a cursor on the first token.
    pub fn new(tokens: &'a AnnotatedTokens) -> Self {
        TokenCursor { tokens, offset: 0 }
    }

    pub fn tokens(&self) -> &'a AnnotatedTokens {
        self.tokens
    }

    /// Index of the current token.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Jump to `offset`. Used to commit a speculative clone.
    #[inline]
    pub fn set_offset(&mut self, offset: usize) {
        debug_assert!(
            offset <= self.tokens.len(),
            "cursor offset {} out of bounds (max {})",
            offset,
            self.tokens.len()
        );
        self.offset = offset;
    }

    // ─── Token access ───

    #[inline]
    pub fn current_token(&self) -> TokenRef<'a> {
        self.tokens.at(self.offset)
    }

    pub fn next_token(&self) -> TokenRef<'a> {
        self.tokens.at(self.offset + 1)
    }

    pub fn previous_token(&self) -> TokenRef<'a> {
        match self.offset.checked_sub(1) {
            Some(index) => self.tokens.at(index),
            None => self.tokens.dummy(),
        }
    }

    /// The `n`th significant token after the current one (`n = 1` is the
    /// closest). `n = 0` is the current token.
    pub fn next_significant_token(&self, n: usize) -> TokenRef<'a> {
        let mut cursor = *self;
        for _ in 0..n {
            if !cursor.move_to_next_significant_token() {
                return self.tokens.dummy();
            }
        }
        cursor.current_token()
    }

    /// The `n`th significant token before the current one.
    pub fn previous_significant_token(&self, n: usize) -> TokenRef<'a> {
        let mut cursor = *self;
        for _ in 0..n {
            if !cursor.move_to_previous_significant_token() {
                return self.tokens.dummy();
            }
        }
        cursor.current_token()
    }

    #[inline]
    pub fn is_type(&self, kind: TokenKind) -> bool {
        self.current_token().kind == kind
    }

    #[inline]
    pub fn content_equals(&self, text: &str) -> bool {
        self.current_token().text == text
    }

    pub fn content_contains(&self, ch: char) -> bool {
        self.current_token().content_contains(ch)
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.current_token().position
    }

    /// Position just past the current token.
    pub fn end_position(&self) -> Position {
        self.current_token().end_position()
    }

    #[inline]
    pub fn row(&self) -> u32 {
        self.position().row
    }

    #[inline]
    pub fn column(&self) -> u32 {
        self.position().column
    }

    // ─── Movement ───

    /// Advance one token. Fails (without moving) on the last token.
    pub fn move_to_next_token(&mut self) -> bool {
        if self.offset + 1 >= self.tokens.len() {
            return false;
        }
        self.offset += 1;
        trace!(offset = self.offset, kind = %self.current_token().kind, "advance");
        true
    }

    /// Step back one token. Fails (without moving) on the first token.
    pub fn move_to_previous_token(&mut self) -> bool {
        if self.offset == 0 {
            return false;
        }
        self.offset -= 1;
        true
    }

    /// Advance to the next token that is neither whitespace nor a comment.
    /// Leaves the cursor in place when there is none.
    pub fn move_to_next_significant_token(&mut self) -> bool {
        let mut cursor = *self;
        while cursor.move_to_next_token() {
            if cursor.current_token().kind.is_significant() {
                self.offset = cursor.offset;
                return true;
            }
        }
        false
    }

    /// Step back to the previous significant token, if any.
    pub fn move_to_previous_significant_token(&mut self) -> bool {
        let mut cursor = *self;
        while cursor.move_to_previous_token() {
            if cursor.current_token().kind.is_significant() {
                self.offset = cursor.offset;
                return true;
            }
        }
        false
    }

    /// Skip whitespace forward. False when the document ends on whitespace.
    pub fn fwd_over_whitespace(&mut self) -> bool {
        self.fwd_while(|token| token.kind == TokenKind::Whitespace)
    }

    pub fn bwd_over_whitespace(&mut self) -> bool {
        self.bwd_while(|token| token.kind == TokenKind::Whitespace)
    }

    pub fn fwd_over_whitespace_and_comments(&mut self) -> bool {
        self.fwd_while(|token| !token.kind.is_significant())
    }

    pub fn bwd_over_whitespace_and_comments(&mut self) -> bool {
        self.bwd_while(|token| !token.kind.is_significant())
    }

    /// Skip whitespace that stays on the current line.
    pub fn fwd_over_blank(&mut self) -> bool {
        self.fwd_while(|token| is_blank(token))
    }

    pub fn bwd_over_blank(&mut self) -> bool {
        self.bwd_while(|token| is_blank(token))
    }

    fn fwd_while(&mut self, skip: impl Fn(&TokenRef<'_>) -> bool) -> bool {
        while skip(&self.current_token()) {
            if !self.move_to_next_token() {
                return false;
            }
        }
        true
    }

    fn bwd_while(&mut self, skip: impl Fn(&TokenRef<'_>) -> bool) -> bool {
        while skip(&self.current_token()) {
            if !self.move_to_previous_token() {
                return false;
            }
        }
        true
    }

    /// From a left bracket, move to its matching right bracket. The cursor
    /// stays put if the current token is not a left bracket or the match is
    /// missing.
    ///
    /// Pairs are computed once with the annotated tokens, so this is a
    /// lookup rather than a scan.
    pub fn fwd_to_matching_token(&mut self) -> bool {
        self.current_token().kind.is_left_bracket() && self.jump_to_partner()
    }

    /// From a right bracket, move back to its matching left bracket.
    pub fn bwd_to_matching_token(&mut self) -> bool {
        self.current_token().kind.is_right_bracket() && self.jump_to_partner()
    }

    fn jump_to_partner(&mut self) -> bool {
        match self.tokens.matching_bracket(self.offset) {
            Some(partner) => {
                self.offset = partner;
                true
            }
            None => false,
        }
    }

    // ─── Predicates ───

    /// No significant token follows. Trailing whitespace and comments do
    /// not extend the document.
    pub fn is_at_end_of_document(&self) -> bool {
        let mut cursor = *self;
        !cursor.move_to_next_significant_token()
    }

    /// The current token ends an expression: `;`, `,`, a right bracket, a
    /// line break, or the final token.
    pub fn finishes_expression(&self) -> bool {
        let token = self.current_token();
        match token.kind {
            TokenKind::Semi | TokenKind::Comma => true,
            TokenKind::Whitespace if token.content_contains('\n') => true,
            kind if kind.is_right_bracket() => true,
            _ => self.is_at_end_of_document(),
        }
    }

    /// Nothing but blanks and comments follow on this line.
    pub fn is_last_significant_token_on_line(&self) -> bool {
        let mut cursor = *self;
        loop {
            if !cursor.move_to_next_token() {
                return true;
            }
            let token = cursor.current_token();
            match token.kind {
                TokenKind::Whitespace if token.content_contains('\n') => return true,
                TokenKind::Whitespace | TokenKind::Comment => {}
                _ => return false,
            }
        }
    }

    /// Nothing but blanks precede the current token on its line.
    pub fn is_first_significant_token_on_line(&self) -> bool {
        let mut cursor = *self;
        loop {
            if !cursor.move_to_previous_token() {
                return true;
            }
            let token = cursor.current_token();
            match token.kind {
                TokenKind::Whitespace if token.content_contains('\n') => return true,
                TokenKind::Whitespace => {}
                _ => return false,
            }
        }
    }

    /// Whether the expression ending at the current token is complete.
    ///
    /// An operator or an open bracket never ends a statement. Outside
    /// parentheses a line break does. Otherwise the
    /// statement continues when the next significant token is a binary
    /// operator or an argument-list opener.
    pub fn is_at_end_of_statement(&self, in_parens: bool) -> bool {
        if self.is_at_end_of_document() {
            return true;
        }

        let current = self.current_token();
        if is_binary_op(&current)
            || is_valid_as_unary_operator(&current)
            || current.kind.is_left_bracket()
        {
            return false;
        }

        let mut next = *self;
        if !next.move_to_next_token() || !next.fwd_over_blank() {
            return true;
        }
        if next.is_type(TokenKind::Whitespace) && !in_parens {
            return true;
        }
        if !next.current_token().kind.is_significant() && !next.move_to_next_significant_token()
        {
            return true;
        }
        if next.finishes_expression() {
            return true;
        }

        let token = next.current_token();
        !(is_binary_op(&token) || can_open_argument_list(token.kind))
    }

    /// Advance to the last token of the current statement.
    pub fn move_to_end_of_statement(&mut self, in_parens: bool) -> bool {
        let mut cursor = *self;
        loop {
            if cursor.current_token().kind.is_left_bracket() && !cursor.fwd_to_matching_token() {
                return false;
            }
            if cursor.is_at_end_of_statement(in_parens) {
                break;
            }
            if !cursor.move_to_next_significant_token() {
                return false;
            }
        }
        self.offset = cursor.offset;
        true
    }

    /// On `name` in `name = value`.
    pub fn is_looking_at_named_argument_in_function_call(&self) -> bool {
        matches!(
            self.current_token().kind,
            TokenKind::Identifier | TokenKind::String
        ) && self.next_significant_token(1).text == "="
    }

    // ─── Evaluation chains ───

    /// From the last token of an evaluation chain such as
    /// `x$foo[[1]]$bar(1)`, move back to its head (`x`).
    pub fn move_to_start_of_evaluation(&mut self) -> bool {
        let mut cursor = *self;
        loop {
            if cursor.current_token().kind.is_right_bracket() {
                if !cursor.bwd_to_matching_token() {
                    return false;
                }
                let opener = cursor.current_token().kind;
                let prev = cursor.previous_significant_token(1);
                let attached = can_open_argument_list(opener)
                    && prev.row() == cursor.row()
                    && (matches!(
                        prev.kind,
                        TokenKind::Identifier | TokenKind::String
                    ) || prev.kind.is_right_bracket());
                if attached {
                    cursor.move_to_previous_significant_token();
                    continue;
                }
            }

            if is_extraction_operator(&cursor.previous_significant_token(1)) {
                if !(cursor.move_to_previous_significant_token()
                    && cursor.move_to_previous_significant_token())
                {
                    return false;
                }
                continue;
            }

            break;
        }
        self.offset = cursor.offset;
        true
    }

    /// From the head of an evaluation chain, move forward to its last token.
    pub fn move_to_end_of_evaluation(&mut self) -> bool {
        let mut cursor = *self;
        loop {
            if cursor.current_token().kind.is_left_bracket() && !cursor.fwd_to_matching_token() {
                return false;
            }

            let next = cursor.next_significant_token(1);
            if can_open_argument_list(next.kind) && next.row() == cursor.row() {
                cursor.move_to_next_significant_token();
                continue;
            }
            if is_extraction_operator(&next) {
                if !(cursor.move_to_next_significant_token()
                    && cursor.move_to_next_significant_token())
                {
                    return false;
                }
                continue;
            }
            break;
        }
        self.offset = cursor.offset;
        true
    }

    /// Source text from the start of the evaluation ending at the current
    /// token through the current token: `x$foo[[1]]$bar` for a cursor on
    /// `bar`.
    pub fn evaluation_associated_with_call(&self) -> &'a str {
        let mut start = *self;
        if !start.move_to_start_of_evaluation() {
            return self.current_token().text;
        }
        self.text_between(start.current_token(), self.current_token())
    }

    /// For a call inside a pipe chain (`x %>% f() %>% g()` with the cursor
    /// on `g`), the source text of the initial left-hand operand. Empty when
    /// the cursor is not preceded by a pipe.
    pub fn head_of_pipe_chain(&self) -> &'a str {
        let mut cursor = *self;
        let mut found = false;
        while is_pipe_operator(&cursor.previous_significant_token(1)) {
            if !(cursor.move_to_previous_significant_token()
                && cursor.move_to_previous_significant_token()
                && cursor.move_to_start_of_evaluation())
            {
                return "";
            }
            found = true;
        }
        if !found {
            return "";
        }

        let mut end = cursor;
        if !end.move_to_end_of_evaluation() {
            return "";
        }
        self.text_between(cursor.current_token(), end.current_token())
    }

    fn text_between(&self, first: TokenRef<'a>, last: TokenRef<'a>) -> &'a str {
        let start = first.offset as usize;
        let end = last.offset as usize + last.text.len();
        self.tokens.source().get(start..end).unwrap_or_default()
    }
}
