//! Byte cursor over a sentinel-terminated buffer.
//!
//! EOF is the sentinel byte at `source_len`. A `0x00` before that is an
//! interior null and is reported by the scanner as an invalid byte.

/// Cursor over the bytes of a [`SourceBuffer`](crate::SourceBuffer).
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: u32,
    source_len: u32,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(buf: &'a [u8], source_len: u32) -> Self {
        Cursor {
            buf,
            pos: 0,
            source_len,
        }
    }

    #[inline]
    fn byte_at(&self, pos: u32) -> u8 {
        self.buf.get(pos as usize).copied().unwrap_or(0)
    }

    /// Byte at the cursor. `0` at EOF.
    #[inline]
    pub fn current(&self) -> u8 {
        self.byte_at(self.pos)
    }

    /// Byte after the current one.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.byte_at(self.pos + 1)
    }

    /// Byte two past the current one.
    #[inline]
    pub fn peek2(&self) -> u8 {
        self.byte_at(self.pos + 2)
    }

    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos = self.pos.saturating_add(n).min(self.source_len);
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source_len
    }

    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    pub fn source_len(&self) -> u32 {
        self.source_len
    }

    /// Unscanned source bytes.
    fn rest(&self) -> &'a [u8] {
        let start = (self.pos as usize).min(self.source_len as usize);
        &self.buf[start..self.source_len as usize]
    }

    /// Advance while `pred` holds. Stops at the sentinel because no
    /// predicate used by the scanner accepts `0x00`.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while !self.is_eof() && pred(self.current()) {
            self.advance();
        }
    }

    /// Skip spaces, tabs and the other non-newline blanks WGSL allows.
    #[inline]
    pub fn eat_whitespace(&mut self) {
        self.eat_while(|b| matches!(b, b' ' | b'\t' | 0x0B | 0x0C));
    }

    /// Move to the next `\n` (not consumed) or to EOF.
    pub fn eat_until_newline_or_eof(&mut self) {
        match memchr::memchr(b'\n', self.rest()) {
            Some(offset) => self.advance_n(u32::try_from(offset).unwrap_or(u32::MAX)),
            None => self.pos = self.source_len,
        }
    }

    /// Consume the body of a block comment whose opening `/*` was already
    /// consumed. Block comments nest.
    ///
    /// Returns `false` if EOF was reached before the comment closed.
    pub fn eat_block_comment(&mut self) -> bool {
        let mut depth = 1u32;
        loop {
            let Some(offset) = memchr::memchr2(b'*', b'/', self.rest()) else {
                self.pos = self.source_len;
                return false;
            };
            self.advance_n(u32::try_from(offset).unwrap_or(u32::MAX));
            match (self.current(), self.peek()) {
                (b'*', b'/') => {
                    self.advance_n(2);
                    depth -= 1;
                    if depth == 0 {
                        return true;
                    }
                }
                (b'/', b'*') => {
                    self.advance_n(2);
                    depth += 1;
                }
                _ => self.advance(),
            }
        }
    }
}
