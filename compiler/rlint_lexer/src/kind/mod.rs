//! Token kinds and the token value type.

use std::fmt;

/// Closed set of token kinds.
///
/// Keywords (`if`, `function`, ...) are plain [`TokenKind::Identifier`]
/// tokens; the parser inspects their text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    LParen,
    RParen,
    LBracket,
    RBracket,
    /// `[[`
    LDBracket,
    /// `]]`
    RDBracket,
    LBrace,
    RBrace,
    Comma,
    Semi,
    /// A run of blanks and line breaks.
    Whitespace,
    String,
    Number,
    Identifier,
    Operator,
    /// A lone `!`.
    UnaryOperator,
    Comment,
    /// Unterminated literal, stray byte, or the out-of-range sentinel.
    Error,
}

impl TokenKind {
    /// Stable upper-case name, as used in lint messages and token dumps.
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBracket => "LBRACKET",
            TokenKind::RBracket => "RBRACKET",
            TokenKind::LDBracket => "LDBRACKET",
            TokenKind::RDBracket => "RDBRACKET",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::Comma => "COMMA",
            TokenKind::Semi => "SEMI",
            TokenKind::Whitespace => "WHITESPACE",
            TokenKind::String => "STRING",
            TokenKind::Number => "NUMBER",
            TokenKind::Identifier => "ID",
            TokenKind::Operator => "OPER",
            TokenKind::UnaryOperator => "UOPER",
            TokenKind::Comment => "COMMENT",
            TokenKind::Error => "ERR",
        }
    }

    /// Opening bracket of any flavour: `(`, `[`, `[[`, `{`.
    pub const fn is_left_bracket(self) -> bool {
        matches!(
            self,
            TokenKind::LParen | TokenKind::LBracket | TokenKind::LDBracket | TokenKind::LBrace
        )
    }

    /// Closing bracket of any flavour: `)`, `]`, `]]`, `}`.
    pub const fn is_right_bracket(self) -> bool {
        matches!(
            self,
            TokenKind::RParen | TokenKind::RBracket | TokenKind::RDBracket | TokenKind::RBrace
        )
    }

    /// The bracket that pairs with this one, if this is a bracket.
    pub const fn complement(self) -> Option<TokenKind> {
        match self {
            TokenKind::LParen => Some(TokenKind::RParen),
            TokenKind::RParen => Some(TokenKind::LParen),
            TokenKind::LBracket => Some(TokenKind::RBracket),
            TokenKind::RBracket => Some(TokenKind::LBracket),
            TokenKind::LDBracket => Some(TokenKind::RDBracket),
            TokenKind::RDBracket => Some(TokenKind::LDBracket),
            TokenKind::LBrace => Some(TokenKind::RBrace),
            TokenKind::RBrace => Some(TokenKind::LBrace),
            _ => None,
        }
    }

    /// Neither whitespace nor a comment.
    pub const fn is_significant(self) -> bool {
        !matches!(self, TokenKind::Whitespace | TokenKind::Comment)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token: a kind plus a byte range into the source it was scanned from.
///
/// Tokens do not own text; resolve it through the
/// [`TokenStream`](crate::TokenStream) that produced them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: u32,
    pub end: u32,
}

impl Token {
    pub const fn new(kind: TokenKind, start: u32, end: u32) -> Self {
        Token { kind, start, end }
    }

    /// Byte offset of the token in the source.
    #[inline]
    pub const fn offset(&self) -> u32 {
        self.start
    }

    /// Length in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Zero-length token. The tokenizer yields one only at end of input.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
