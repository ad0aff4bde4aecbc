//! Owned, immutable token sequence.

use std::sync::Arc;

use crate::{SourceBuffer, Token, TokenKind, Tokenizer};

/// Which tokens a [`TokenStream`] keeps while draining the tokenizer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TokenFilter {
    /// Every token, trivia included. Concatenating the token texts
    /// reproduces the source.
    #[default]
    All,
    /// Drop comments, keep whitespace (the parser needs line breaks).
    WithoutComments,
    /// Drop whitespace and comments.
    Significant,
}

impl TokenFilter {
    fn keeps(self, kind: TokenKind) -> bool {
        match self {
            TokenFilter::All => true,
            TokenFilter::WithoutComments => kind != TokenKind::Comment,
            TokenFilter::Significant => kind.is_significant(),
        }
    }
}

/// Tokens plus the source text they index into.
///
/// The source is shared (`Arc<str>`), so annotated views and parse results
/// can hold on to it without copying.
#[derive(Clone, Debug)]
pub struct TokenStream {
    source: Arc<str>,
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Tokenize `source`, keeping the tokens selected by `filter`.
    pub fn new(source: impl Into<Arc<str>>, filter: TokenFilter) -> Self {
        let source: Arc<str> = source.into();
        let buffer = SourceBuffer::new(&source);
        let mut tokenizer = Tokenizer::new(&buffer);
        let mut tokens = Vec::with_capacity(source.len() / 3 + 1);
        loop {
            let token = tokenizer.next_token();
            if token.is_empty() {
                break;
            }
            if filter.keeps(token.kind) {
                tokens.push(token);
            }
        }
        TokenStream { source, tokens }
    }

    /// The source text the tokens point into.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub(crate) fn shared_source(&self) -> Arc<str> {
        Arc::clone(&self.source)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Source text of `token`.
    pub fn text(&self, token: &Token) -> &str {
        self.source
            .get(token.start as usize..token.end as usize)
            .unwrap_or_default()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// Tokenize `source`, keeping every token.
pub fn tokenize(source: &str) -> TokenStream {
    TokenStream::new(source, TokenFilter::All)
}

/// Tokenize `source`, keeping only significant tokens.
pub fn tokenize_significant(source: &str) -> TokenStream {
    TokenStream::new(source, TokenFilter::Significant)
}
