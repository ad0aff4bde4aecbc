//! Hand-written tokenizer producing one [`Token`] per call.
//!
//! Main dispatch is a match on the current byte. Each arm calls a focused
//! method that advances the cursor and returns the token it scanned. Error
//! conditions are encoded as [`TokenKind::Error`] tokens, never as
//! `Result::Err`.
//!
//! The only state beyond the cursor is a stack of open brackets, needed to
//! tell `]]` (closing a `[[`) apart from two `]` closing nested `[`.

use crate::cursor::Cursor;
use crate::{SourceBuffer, Token, TokenKind};

/// Tokenizer over a [`SourceBuffer`].
pub struct Tokenizer<'a> {
    cursor: Cursor<'a>,
    /// Open brackets, innermost last.
    brackets: Vec<TokenKind>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(buffer: &'a SourceBuffer) -> Self {
        Tokenizer {
            cursor: buffer.cursor(),
            brackets: Vec::new(),
        }
    }

    /// Produce the next token.
    ///
    /// Returns an empty [`TokenKind::Error`] token with
    /// `start == end == source_len` once the input is exhausted; subsequent
    /// calls keep returning it.
    pub fn next_token(&mut self) -> Token {
        let start = self.cursor.pos();
        if self.cursor.is_eof() {
            return Token::new(TokenKind::Error, start, start);
        }

        match self.cursor.current() {
            b' ' | b'\t' | b'\r' | b'\n' | 0x0C => self.whitespace(start),
            b'#' => self.comment(start),
            b'"' | b'\'' => self.string(start),
            b'`' => self.backtick(start),
            b'r' | b'R' if matches!(self.cursor.peek(), b'"' | b'\'') => self.raw_string(start),
            b'0'..=b'9' => self.number(start),
            b'.' if self.cursor.peek().is_ascii_digit() => self.number(start),
            b'a'..=b'z' | b'A'..=b'Z' | b'.' | 0x80..=0xFF => self.identifier(start),
            b'\\' => self.single(start, TokenKind::Identifier),
            b'(' => self.open(start, TokenKind::LParen, 1),
            b'{' => self.open(start, TokenKind::LBrace, 1),
            b'[' if self.cursor.peek() == b'[' => self.open(start, TokenKind::LDBracket, 2),
            b'[' => self.open(start, TokenKind::LBracket, 1),
            b')' => self.close(start, TokenKind::RParen),
            b'}' => self.close(start, TokenKind::RBrace),
            b']' => self.right_bracket(start),
            b',' => self.single(start, TokenKind::Comma),
            b';' => self.single(start, TokenKind::Semi),
            b'%' => self.special_operator(start),
            b'<' => self.less(start),
            b'-' => self.minus(start),
            b'>' | b'=' => self.with_optional_equals(start),
            b'!' => self.bang(start),
            b'&' => self.doubled(start, b'&'),
            b'|' => self.pipe(start),
            b':' => self.colon(start),
            b'*' => self.doubled(start, b'*'),
            b'?' => self.doubled(start, b'?'),
            b'+' | b'/' | b'^' | b'~' | b'$' | b'@' => self.single(start, TokenKind::Operator),
            _ => self.invalid(start),
        }
    }

    fn token(&self, kind: TokenKind, start: u32) -> Token {
        Token::new(kind, start, self.cursor.pos())
    }

    fn single(&mut self, start: u32, kind: TokenKind) -> Token {
        self.cursor.advance();
        self.token(kind, start)
    }

    fn operator(&mut self, start: u32, len: u32) -> Token {
        self.cursor.advance_n(len);
        self.token(TokenKind::Operator, start)
    }

    fn invalid(&mut self, start: u32) -> Token {
        self.cursor.advance_char();
        self.token(TokenKind::Error, start)
    }

    // ─── Trivia ─────────────────────────────────────────────────────────

    fn whitespace(&mut self, start: u32) -> Token {
        self.cursor
            .eat_while(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n' | 0x0C));
        self.token(TokenKind::Whitespace, start)
    }

    fn comment(&mut self, start: u32) -> Token {
        self.cursor.eat_until_newline_or_eof();
        self.token(TokenKind::Comment, start)
    }

    // ─── Literals ───────────────────────────────────────────────────────

    /// `"..."` or `'...'`, escapes included, possibly spanning lines.
    fn string(&mut self, start: u32) -> Token {
        let quote = self.cursor.current();
        self.cursor.advance();
        if self.eat_quoted_body(quote) {
            self.token(TokenKind::String, start)
        } else {
            self.token(TokenKind::Error, start)
        }
    }

    /// `` `non syntactic name` ``
    fn backtick(&mut self, start: u32) -> Token {
        self.cursor.advance();
        if self.eat_quoted_body(b'`') {
            self.token(TokenKind::Identifier, start)
        } else {
            self.token(TokenKind::Error, start)
        }
    }

    /// Consume up to and including the closing `quote`.
    ///
    /// Returns `false` when the input ends first.
    fn eat_quoted_body(&mut self, quote: u8) -> bool {
        loop {
            match self.cursor.skip_to_quote_or_escape(quote) {
                b'\\' => {
                    self.cursor.advance();
                    if self.cursor.is_eof() {
                        return false;
                    }
                    self.cursor.advance_char();
                }
                0 if self.cursor.is_eof() => return false,
                _ => {
                    self.cursor.advance();
                    return true;
                }
            }
        }
    }

    /// `r"(...)"`, `R'[...]'`, `r"{...}"`, optionally with dashes between
    /// the quote and the bracket: `r"--(...)--"`.
    ///
    /// Falls back to an identifier when the opening delimiter is malformed.
    fn raw_string(&mut self, start: u32) -> Token {
        let mut probe = self.cursor;
        probe.advance();
        let quote = probe.current();
        probe.advance();

        let dashes_start = probe.pos();
        probe.eat_while(|b| b == b'-');
        let dashes = probe.pos() - dashes_start;

        let close = match probe.current() {
            b'(' => b')',
            b'[' => b']',
            b'{' => b'}',
            _ => return self.identifier(start),
        };
        probe.advance();

        let mut terminator = vec![close];
        terminator.resize(dashes as usize + 1, b'-');
        terminator.push(quote);

        while let Some(found) = probe.find(close) {
            probe.set_pos(found);
            if probe.starts_with(&terminator) {
                probe.advance_n(dashes + 2);
                self.cursor = probe;
                return self.token(TokenKind::String, start);
            }
            probe.advance();
        }

        self.cursor.set_pos(self.cursor.source_len());
        self.token(TokenKind::Error, start)
    }

    /// Decimal or hexadecimal numbers with optional `L` / `i` suffix.
    fn number(&mut self, start: u32) -> Token {
        if self.cursor.current() == b'0' && matches!(self.cursor.peek(), b'x' | b'X') {
            self.cursor.advance_n(2);
            self.cursor.eat_while(|b| b.is_ascii_hexdigit());
            if self.cursor.current() == b'.' {
                self.cursor.advance();
                self.cursor.eat_while(|b| b.is_ascii_hexdigit());
            }
            if matches!(self.cursor.current(), b'p' | b'P') {
                self.exponent();
            }
        } else {
            self.cursor.eat_while(|b| b.is_ascii_digit());
            if self.cursor.current() == b'.' {
                self.cursor.advance();
                self.cursor.eat_while(|b| b.is_ascii_digit());
            }
            if matches!(self.cursor.current(), b'e' | b'E') {
                self.exponent();
            }
        }

        if matches!(self.cursor.current(), b'L' | b'i') {
            self.cursor.advance();
        }
        self.token(TokenKind::Number, start)
    }

    fn exponent(&mut self) {
        self.cursor.advance();
        if matches!(self.cursor.current(), b'+' | b'-') {
            self.cursor.advance();
        }
        self.cursor.eat_while(|b| b.is_ascii_digit());
    }

    // ─── Identifiers ────────────────────────────────────────────────────

    fn identifier(&mut self, start: u32) -> Token {
        loop {
            match self.cursor.current() {
                b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'.' | b'_' => self.cursor.advance(),
                0x80..=0xFF => self.cursor.advance_char(),
                _ => break,
            }
        }
        self.token(TokenKind::Identifier, start)
    }

    // ─── Brackets ───────────────────────────────────────────────────────

    fn open(&mut self, start: u32, kind: TokenKind, len: u32) -> Token {
        self.brackets.push(kind);
        self.cursor.advance_n(len);
        self.token(kind, start)
    }

    fn close(&mut self, start: u32, kind: TokenKind) -> Token {
        if self.brackets.last().copied() == kind.complement() {
            self.brackets.pop();
        }
        self.single(start, kind)
    }

    /// `]]` closes a `[[` only when that is the innermost open bracket.
    fn right_bracket(&mut self, start: u32) -> Token {
        match self.brackets.last() {
            Some(TokenKind::LDBracket) if self.cursor.peek() == b']' => {
                self.brackets.pop();
                self.cursor.advance_n(2);
                self.token(TokenKind::RDBracket, start)
            }
            Some(TokenKind::LBracket) => {
                self.brackets.pop();
                self.single(start, TokenKind::RBracket)
            }
            _ => self.single(start, TokenKind::RBracket),
        }
    }

    // ─── Operators ──────────────────────────────────────────────────────

    /// `%in%`, `%>%` and other user operators; must close on the same line.
    fn special_operator(&mut self, start: u32) -> Token {
        self.cursor.advance();
        if self.cursor.skip_to_on_line(b'%') {
            self.cursor.advance();
            self.token(TokenKind::Operator, start)
        } else {
            self.token(TokenKind::Error, start)
        }
    }

    fn less(&mut self, start: u32) -> Token {
        if self.cursor.starts_with(b"<<-") {
            self.operator(start, 3)
        } else if matches!(self.cursor.peek(), b'-' | b'=') {
            self.operator(start, 2)
        } else {
            self.operator(start, 1)
        }
    }

    fn minus(&mut self, start: u32) -> Token {
        if self.cursor.starts_with(b"->>") {
            self.operator(start, 3)
        } else if self.cursor.peek() == b'>' {
            self.operator(start, 2)
        } else {
            self.operator(start, 1)
        }
    }

    /// `>` / `>=` and `=` / `==`.
    fn with_optional_equals(&mut self, start: u32) -> Token {
        let len = if self.cursor.peek() == b'=' { 2 } else { 1 };
        self.operator(start, len)
    }

    fn bang(&mut self, start: u32) -> Token {
        if self.cursor.peek() == b'=' {
            self.operator(start, 2)
        } else {
            self.single(start, TokenKind::UnaryOperator)
        }
    }

    /// `&&`, `**`, `??` and their single forms.
    fn doubled(&mut self, start: u32, byte: u8) -> Token {
        let len = if self.cursor.peek() == byte { 2 } else { 1 };
        self.operator(start, len)
    }

    fn pipe(&mut self, start: u32) -> Token {
        let len = if matches!(self.cursor.peek(), b'|' | b'>') {
            2
        } else {
            1
        };
        self.operator(start, len)
    }

    fn colon(&mut self, start: u32) -> Token {
        if self.cursor.starts_with(b":::") {
            self.operator(start, 3)
        } else if matches!(self.cursor.peek(), b':' | b'=') {
            self.operator(start, 2)
        } else {
            self.operator(start, 1)
        }
    }
}
