//! Tokenizer for R source code.
//!
//! Converts raw source text into a sequence of typed tokens, each a byte
//! range into the source. Tokenization never fails: unterminated strings and
//! stray bytes become [`TokenKind::Error`] tokens so that the parser can
//! report them as ordinary lint.
//!
//! # Layers
//!
//! - [`SourceBuffer`] / [`Cursor`]: sentinel-terminated byte scanning.
//! - [`Tokenizer`]: produces one [`Token`] per call.
//! - [`TokenStream`]: the drained, owned token sequence.
//! - [`AnnotatedTokens`]: tokens with `(row, column)` positions, read through
//!   [`TokenRef`] views.

mod annotated;
mod cursor;
mod kind;
mod source_buffer;
mod stream;
mod tokenizer;

pub use annotated::{AnnotatedToken, AnnotatedTokens, Position, TokenRef};
pub use cursor::Cursor;
pub use kind::{Token, TokenKind};
pub use source_buffer::SourceBuffer;
pub use stream::{tokenize, tokenize_significant, TokenFilter, TokenStream};
pub use tokenizer::Tokenizer;
