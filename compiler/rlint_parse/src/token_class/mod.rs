//! Token classification predicates.
//!
//! Free functions over [`TokenRef`] used by the cursor and the parser.
//! Keywords are identifiers, so several predicates inspect token text.

use rlint_lexer::{TokenKind, TokenRef};

/// Words the grammar treats specially.
const KEYWORDS: &[&str] = &[
    "if", "else", "repeat", "while", "function", "for", "in", "next", "break",
];

/// Binary operator: any operator token. A lone `!` lexes as
/// [`TokenKind::UnaryOperator`] and is excluded.
#[inline]
pub fn is_binary_op(token: &TokenRef<'_>) -> bool {
    token.kind == TokenKind::Operator
}

/// Operators that may prefix an operand: `-`, `+`, `!`, `~`, `?`.
pub fn is_valid_as_unary_operator(token: &TokenRef<'_>) -> bool {
    match token.kind {
        TokenKind::UnaryOperator => true,
        TokenKind::Operator => matches!(token.text, "-" | "+" | "~" | "?"),
        _ => false,
    }
}

/// `<-`, `=`, `<<-`, `:=`.
pub fn is_left_assign(token: &TokenRef<'_>) -> bool {
    token.kind == TokenKind::Operator && matches!(token.text, "<-" | "=" | "<<-" | ":=")
}

/// `->`, `->>`.
pub fn is_right_assign(token: &TokenRef<'_>) -> bool {
    token.kind == TokenKind::Operator && matches!(token.text, "->" | "->>")
}

/// `<<-`.
pub fn is_parent_left_assign(token: &TokenRef<'_>) -> bool {
    token.kind == TokenKind::Operator && token.text == "<<-"
}

/// `$`, `@`, `::`, `:::`.
pub fn is_extraction_operator(token: &TokenRef<'_>) -> bool {
    token.kind == TokenKind::Operator && matches!(token.text, "$" | "@" | "::" | ":::")
}

/// `::`, `:::`.
pub fn is_namespace_extraction_operator(token: &TokenRef<'_>) -> bool {
    token.kind == TokenKind::Operator && matches!(token.text, "::" | ":::")
}

/// Native and magrittr-style pipes.
pub fn is_pipe_operator(token: &TokenRef<'_>) -> bool {
    token.kind == TokenKind::Operator
        && matches!(token.text, "|>" | "%>%" | "%<>%" | "%T>%" | "%$%")
}

/// `==`, `!=`.
pub fn is_equality_comparison(token: &TokenRef<'_>) -> bool {
    token.kind == TokenKind::Operator && matches!(token.text, "==" | "!=")
}

/// Tokens that may appear right after a binary operator.
pub fn can_follow_binary_operator(token: &TokenRef<'_>) -> bool {
    match token.kind {
        TokenKind::Identifier
        | TokenKind::LBrace
        | TokenKind::LParen
        | TokenKind::Number
        | TokenKind::String => true,
        _ => is_valid_as_unary_operator(token),
    }
}

/// `(`, `[` and `[[` open a call or subset when attached to an operand.
#[inline]
pub const fn can_open_argument_list(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::LParen | TokenKind::LBracket | TokenKind::LDBracket
    )
}

/// `)`, `]` and `]]`.
#[inline]
pub const fn can_close_argument_list(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::RParen | TokenKind::RBracket | TokenKind::RDBracket
    )
}

/// Operand tokens: identifiers (backticked and `...` included), numbers
/// and strings.
pub fn is_valid_as_identifier(token: &TokenRef<'_>) -> bool {
    matches!(
        token.kind,
        TokenKind::Identifier | TokenKind::Number | TokenKind::String
    )
}

pub fn is_keyword(token: &TokenRef<'_>) -> bool {
    token.kind == TokenKind::Identifier && KEYWORDS.contains(&token.text)
}

#[inline]
pub fn is_whitespace(token: &TokenRef<'_>) -> bool {
    token.kind == TokenKind::Whitespace
}

/// Whitespace that stays on one line.
pub fn is_blank(token: &TokenRef<'_>) -> bool {
    token.kind == TokenKind::Whitespace && !token.content_contains('\n')
}

/// Whitespace carrying at least one line break.
pub fn is_newline(token: &TokenRef<'_>) -> bool {
    token.kind == TokenKind::Whitespace && token.content_contains('\n')
}

/// `NA` and its typed variants.
pub fn is_na_keyword(token: &TokenRef<'_>) -> bool {
    token.kind == TokenKind::Identifier
        && matches!(
            token.text,
            "NA" | "NA_integer_" | "NA_real_" | "NA_character_" | "NA_complex_"
        )
}
