//! Tokens annotated with zero-based `(row, column)` positions.
//!
//! Positions are computed once, left to right, by counting the line breaks
//! inside each token. Columns count characters, not bytes.

use std::fmt;
use std::sync::Arc;

use crate::{Token, TokenKind, TokenStream};

/// Zero-based source position. Orders by row, then column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: u32,
    pub column: u32,
}

impl Position {
    pub const fn new(row: u32, column: u32) -> Self {
        Position { row, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// A token and the position of its first character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnnotatedToken {
    pub token: Token,
    pub position: Position,
}

/// Borrowed view of one annotated token, text included.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenRef<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub position: Position,
    /// Byte offset in the source.
    pub offset: u32,
}

impl TokenRef<'_> {
    #[inline]
    pub fn is_type(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    #[inline]
    pub fn content_equals(&self, text: &str) -> bool {
        self.text == text
    }

    #[inline]
    pub fn content_contains(&self, ch: char) -> bool {
        self.text.contains(ch)
    }

    #[inline]
    pub fn row(&self) -> u32 {
        self.position.row
    }

    #[inline]
    pub fn column(&self) -> u32 {
        self.position.column
    }

    /// Length in characters.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "token lengths fit in u32 because offsets do"
    )]
    pub fn char_len(&self) -> u32 {
        self.text.chars().count() as u32
    }

    /// Position just past the token, on the row the token starts on.
    ///
    /// Lint ranges use this even for tokens that span lines, matching how
    /// editors highlight a token from its first row.
    pub fn end_position(&self) -> Position {
        Position::new(self.position.row, self.position.column + self.char_len())
    }
}

/// Text of the out-of-range sentinel token.
const DUMMY_TEXT: &str = "ERR";

/// Annotated tokens over an owned source.
///
/// Out-of-range reads through [`at`](Self::at) return a dummy
/// [`TokenKind::Error`] token with text `"ERR"`, so lookahead and lookbehind
/// never need bounds checks at call sites.
#[derive(Clone, Debug)]
pub struct AnnotatedTokens {
    source: Arc<str>,
    tokens: Vec<AnnotatedToken>,
    /// For each bracket token, the index of its partner.
    partners: Vec<Option<u32>>,
    /// Position just after the last token.
    end: Position,
}

impl AnnotatedTokens {
    pub fn new(stream: &TokenStream) -> Self {
        let source = stream.source();
        let mut position = Position::default();
        let mut consumed = 0usize;
        let mut tokens = Vec::with_capacity(stream.len());

        for token in stream {
            // Filtered streams skip tokens; walk over the gap first.
            let start = token.start as usize;
            if start > consumed {
                position = advance(position, source.get(consumed..start).unwrap_or_default());
            }
            tokens.push(AnnotatedToken {
                token: *token,
                position,
            });
            position = advance(position, stream.text(token));
            consumed = token.end as usize;
        }

        let partners = pair_brackets(&tokens);
        AnnotatedTokens {
            source: stream.shared_source(),
            tokens,
            partners,
            end: position,
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Raw annotated token at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&AnnotatedToken> {
        self.tokens.get(index)
    }

    /// Token view at `index`, or the dummy error token when out of range.
    pub fn at(&self, index: usize) -> TokenRef<'_> {
        match self.tokens.get(index) {
            Some(annotated) => TokenRef {
                kind: annotated.token.kind,
                text: self
                    .source
                    .get(annotated.token.start as usize..annotated.token.end as usize)
                    .unwrap_or_default(),
                position: annotated.position,
                offset: annotated.token.start,
            },
            None => self.dummy(),
        }
    }

    /// The out-of-range sentinel, positioned at the end of the document.
    pub fn dummy(&self) -> TokenRef<'_> {
        TokenRef {
            kind: TokenKind::Error,
            text: DUMMY_TEXT,
            position: self.end,
            offset: u32::try_from(self.source.len()).unwrap_or(u32::MAX),
        }
    }

    /// Index of the bracket paired with the bracket at `index`.
    ///
    /// Brackets pair only with their own flavour, nesting by depth: in
    /// `( [ ) ]` both pairs are found. `None` for unpaired brackets and for
    /// anything that is not a bracket.
    pub fn matching_bracket(&self, index: usize) -> Option<usize> {
        self.partners
            .get(index)
            .copied()
            .flatten()
            .map(|partner| partner as usize)
    }

    /// Position just past the final token.
    pub fn end_position(&self) -> Position {
        self.end
    }

    pub fn iter(&self) -> impl Iterator<Item = TokenRef<'_>> + '_ {
        (0..self.tokens.len()).map(|index| self.at(index))
    }
}

/// Stack slot shared by a bracket and its complement.
fn bracket_slot(kind: TokenKind) -> Option<usize> {
    match kind {
        TokenKind::LParen | TokenKind::RParen => Some(0),
        TokenKind::LBracket | TokenKind::RBracket => Some(1),
        TokenKind::LDBracket | TokenKind::RDBracket => Some(2),
        TokenKind::LBrace | TokenKind::RBrace => Some(3),
        _ => None,
    }
}

/// Pair every bracket with its partner in one pass, one stack per flavour.
fn pair_brackets(tokens: &[AnnotatedToken]) -> Vec<Option<u32>> {
    let mut partners = vec![None; tokens.len()];
    let mut open: [Vec<usize>; 4] = Default::default();

    for (index, annotated) in tokens.iter().enumerate() {
        let kind = annotated.token.kind;
        let Some(slot) = bracket_slot(kind) else {
            continue;
        };
        if kind.is_left_bracket() {
            open[slot].push(index);
        } else if let Some(opener) = open[slot].pop() {
            partners[opener] = u32::try_from(index).ok();
            partners[index] = u32::try_from(opener).ok();
        }
    }
    partners
}

/// The position just after `text` when it starts at `position`.
fn advance(position: Position, text: &str) -> Position {
    let newlines = memchr::memchr_iter(b'\n', text.as_bytes()).count();
    let newlines = u32::try_from(newlines).unwrap_or(u32::MAX);
    match text.rfind('\n') {
        Some(last) => Position::new(
            position.row.saturating_add(newlines),
            char_count(&text[last + 1..]),
        ),
        None => Position::new(position.row, position.column.saturating_add(char_count(text))),
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "character counts are bounded by the u32 source length"
)]
fn char_count(text: &str) -> u32 {
    text.chars().count() as u32
}
