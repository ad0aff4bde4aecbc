//! Byte-level scanning over a [`SourceBuffer`](crate::SourceBuffer).
//!
//! Reads past the end of the source yield `0x00`. Whether input is
//! exhausted is a question of offset ([`Cursor::is_eof`]), so a literal NUL
//! inside an R file is scanned like any other stray byte.

/// Read position in a source buffer. [`Copy`]: take a snapshot, scan
/// ahead, and discard it if the guess was wrong.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    /// Source bytes plus the trailing NUL.
    bytes: &'a [u8],
    offset: u32,
    /// Offset one past the last source byte.
    end: u32,
}

/// Bytes in the UTF-8 sequence introduced by `lead`.
#[inline]
fn char_width(lead: u8) -> u32 {
    match lead {
        0xF0..=0xF7 => 4,
        0xE0..=0xEF => 3,
        0xC0..=0xDF => 2,
        _ => 1,
    }
}

/// Offsets inside a source buffer always fit in `u32`.
#[allow(
    clippy::cast_possible_truncation,
    reason = "source offsets are bounded by the u32 source length"
)]
#[inline]
fn to_offset(distance: usize) -> u32 {
    distance as u32
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(bytes: &'a [u8], end: u32) -> Self {
        debug_assert!((end as usize) < bytes.len(), "missing trailing NUL");
        Cursor {
            bytes,
            offset: 0,
            end,
        }
    }

    #[inline]
    fn byte(&self, at: usize) -> u8 {
        self.bytes.get(at).copied().unwrap_or(0)
    }

    /// The byte under the cursor.
    #[inline]
    pub fn current(&self) -> u8 {
        self.byte(self.offset as usize)
    }

    /// The byte after the cursor.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.byte(self.offset as usize + 1)
    }

    #[inline]
    pub fn advance(&mut self) {
        self.offset += 1;
    }

    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.offset += n;
    }

    /// Step over the whole UTF-8 character under the cursor, stopping at
    /// the end of the source.
    #[inline]
    pub fn advance_char(&mut self) {
        let width = char_width(self.current());
        self.offset = (self.offset + width).min(self.end);
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.offset >= self.end
    }

    #[inline]
    pub fn pos(&self) -> u32 {
        self.offset
    }

    #[inline]
    pub fn source_len(&self) -> u32 {
        self.end
    }

    /// Jump to `offset`, clamped to the end of the source.
    pub fn set_pos(&mut self, offset: u32) {
        self.offset = offset.min(self.end);
    }

    #[inline]
    pub fn eat_while(&mut self, accept: impl Fn(u8) -> bool) {
        while !self.is_eof() && accept(self.current()) {
            self.offset += 1;
        }
    }

    /// Unscanned source bytes.
    fn rest(&self) -> &'a [u8] {
        let from = self.offset.min(self.end) as usize;
        &self.bytes[from..self.end as usize]
    }

    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        self.rest().starts_with(prefix)
    }

    /// Absolute offset of the next `byte` at or after the cursor.
    pub fn find(&self, byte: u8) -> Option<u32> {
        memchr::memchr(byte, self.rest()).map(|distance| self.offset + to_offset(distance))
    }

    /// Stop on the next `\n` or `\r` (the end of a comment), or at end of
    /// input.
    pub fn eat_until_newline_or_eof(&mut self) {
        self.offset = match memchr::memchr2(b'\n', b'\r', self.rest()) {
            Some(distance) => self.offset + to_offset(distance),
            None => self.end,
        };
    }

    /// Stop on the next `quote` or backslash inside a quoted literal and
    /// return it; `0` when the literal runs to end of input.
    pub fn skip_to_quote_or_escape(&mut self, quote: u8) -> u8 {
        if let Some(distance) = memchr::memchr2(quote, b'\\', self.rest()) {
            self.offset += to_offset(distance);
            return self.current();
        }
        self.offset = self.end;
        0
    }

    /// Look for the `delim` closing a `%op%` on this line. On success the
    /// cursor is on `delim`; otherwise it is on the line break or at end of
    /// input.
    pub fn skip_to_on_line(&mut self, delim: u8) -> bool {
        if let Some(distance) = memchr::memchr3(delim, b'\n', b'\r', self.rest()) {
            self.offset += to_offset(distance);
            return self.current() == delim;
        }
        self.offset = self.end;
        false
    }
}
