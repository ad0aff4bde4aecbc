//! Owned source bytes with a trailing NUL.
//!
//! Lookahead one byte past the last source byte lands on the trailing
//! `0x00`, which no token accepts, so the tokenizer can test "does the
//! token continue?" without a separate end check. NUL bytes inside the
//! source are still scanned: end of input is decided by offset, never by
//! byte value.

use crate::Cursor;

/// Source bytes followed by one `0x00`.
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    bytes: Box<[u8]>,
    /// Source length in bytes, without the trailing NUL.
    len: u32,
}

impl SourceBuffer {
    /// Sources longer than `u32::MAX` bytes are scanned up to that offset.
    pub fn new(source: &str) -> Self {
        let mut bytes = Vec::with_capacity(source.len() + 1);
        bytes.extend_from_slice(source.as_bytes());
        bytes.push(0);
        SourceBuffer {
            bytes: bytes.into_boxed_slice(),
            len: u32::try_from(source.len()).unwrap_or(u32::MAX),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.bytes, self.len)
    }

    pub fn len(&self) -> u32 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
