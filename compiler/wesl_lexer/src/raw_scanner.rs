//! Hand-written raw scanner producing `(Tag, len)` pairs.
//!
//! The scanner dispatches on the current byte of a sentinel-terminated
//! [`Cursor`] and never allocates. It does not evaluate literals; numbers are
//! delimited (including their `i`/`u`/`f`/`h` suffix) and left as text.
//! Lexical problems are encoded as error tags, not as `Err`.

use crate::cursor::Cursor;
use crate::tag::{RawToken, Tag};

/// Allocation-free scanner over one source buffer.
pub struct RawScanner<'a> {
    cursor: Cursor<'a>,
    /// `/*` is a path separator followed by a wildcard, not a comment.
    path_wildcard: bool,
}

impl<'a> RawScanner<'a> {
    pub fn new(cursor: Cursor<'a>) -> Self {
        RawScanner {
            cursor,
            path_wildcard: false,
        }
    }

    /// Scan `/*` as `/` then `*` until turned off again. Set while the
    /// scanner sits right after a segment of an import path (`../util/*`).
    pub fn set_path_wildcard(&mut self, enabled: bool) {
        self.path_wildcard = enabled;
    }

    /// Produce the next raw token.
    ///
    /// Returns `Tag::Eof` with `len == 0` when the source is exhausted, and
    /// keeps returning it afterwards.
    pub fn next_token(&mut self) -> RawToken {
        let start = self.cursor.pos();
        if self.cursor.is_eof() {
            return RawToken {
                tag: Tag::Eof,
                len: 0,
            };
        }
        match self.cursor.current() {
            b' ' | b'\t' | 0x0B | 0x0C => {
                self.cursor.eat_whitespace();
                self.token(start, Tag::Whitespace)
            }
            b'\r' => self.carriage_return(start),
            b'\n' => self.single(start, Tag::Newline),
            b'a'..=b'z' | b'A'..=b'Z' | 0x80..=0xFF => self.identifier(start),
            b'_' => self.underscore_or_ident(start),
            b'0'..=b'9' => self.number(start),
            b'/' => self.slash_or_comment(start),
            b'(' => self.single(start, Tag::LeftParen),
            b')' => self.single(start, Tag::RightParen),
            b'{' => self.single(start, Tag::LeftBrace),
            b'}' => self.single(start, Tag::RightBrace),
            b'[' => self.single(start, Tag::LeftBracket),
            b']' => self.single(start, Tag::RightBracket),
            b';' => self.single(start, Tag::Semicolon),
            b',' => self.single(start, Tag::Comma),
            b'@' => self.single(start, Tag::At),
            b':' => self.pair(start, b':', Tag::ColonColon, Tag::Colon),
            b'.' => self.dot(start),
            b'-' => self.pair(start, b'>', Tag::Arrow, Tag::Minus),
            b'=' => self.pair(start, b'=', Tag::EqEq, Tag::Eq),
            b'!' => self.pair(start, b'=', Tag::BangEq, Tag::Bang),
            b'&' => self.pair(start, b'&', Tag::AmpAmp, Tag::Amp),
            b'|' => self.pair(start, b'|', Tag::PipePipe, Tag::Pipe),
            b'<' => self.less(start),
            b'>' => self.single(start, Tag::Greater),
            b'+' => self.single(start, Tag::Plus),
            b'*' => self.single(start, Tag::Star),
            b'%' => self.single(start, Tag::Percent),
            b'^' => self.single(start, Tag::Caret),
            b'~' => self.single(start, Tag::Tilde),
            _ => self.single(start, Tag::InvalidByte),
        }
    }

    #[inline]
    fn token(&self, start: u32, tag: Tag) -> RawToken {
        RawToken {
            tag,
            len: self.cursor.pos() - start,
        }
    }

    #[inline]
    fn single(&mut self, start: u32, tag: Tag) -> RawToken {
        self.cursor.advance();
        self.token(start, tag)
    }

    /// Two-byte token if the next byte is `second`, otherwise one byte.
    #[inline]
    fn pair(&mut self, start: u32, second: u8, double: Tag, single: Tag) -> RawToken {
        self.cursor.advance();
        if self.cursor.current() == second {
            self.cursor.advance();
            return self.token(start, double);
        }
        self.token(start, single)
    }

    fn carriage_return(&mut self, start: u32) -> RawToken {
        self.cursor.advance();
        if self.cursor.current() == b'\n' {
            self.cursor.advance();
            return self.token(start, Tag::Newline);
        }
        self.token(start, Tag::Whitespace)
    }

    fn slash_or_comment(&mut self, start: u32) -> RawToken {
        self.cursor.advance();
        match self.cursor.current() {
            b'/' => {
                self.cursor.eat_until_newline_or_eof();
                self.token(start, Tag::LineComment)
            }
            b'*' if self.path_wildcard => self.token(start, Tag::Slash),
            b'*' => {
                self.cursor.advance();
                if self.cursor.eat_block_comment() {
                    self.token(start, Tag::BlockComment)
                } else {
                    self.token(start, Tag::UnterminatedComment)
                }
            }
            _ => self.token(start, Tag::Slash),
        }
    }

    fn less(&mut self, start: u32) -> RawToken {
        self.cursor.advance();
        match self.cursor.current() {
            b'=' => self.single(start, Tag::LessEq),
            b'<' => self.single(start, Tag::Shl),
            _ => self.token(start, Tag::Less),
        }
    }

    fn dot(&mut self, start: u32) -> RawToken {
        if self.cursor.peek().is_ascii_digit() {
            self.cursor.advance();
            self.eat_decimal_digits();
            self.eat_exponent();
            return self.float_suffix(start);
        }
        self.single(start, Tag::Dot)
    }

    // --- Identifiers ---

    fn identifier(&mut self, start: u32) -> RawToken {
        self.cursor.advance();
        self.cursor.eat_while(is_ident_continue);
        self.token(start, Tag::Ident)
    }

    fn underscore_or_ident(&mut self, start: u32) -> RawToken {
        self.cursor.advance();
        if is_ident_continue(self.cursor.current()) {
            self.cursor.eat_while(is_ident_continue);
            return self.token(start, Tag::Ident);
        }
        self.token(start, Tag::Underscore)
    }

    // --- Numbers ---

    fn number(&mut self, start: u32) -> RawToken {
        if self.cursor.current() == b'0' && matches!(self.cursor.peek(), b'x' | b'X') {
            return self.hex_number(start);
        }

        self.eat_decimal_digits();
        let mut is_float = false;

        // `1.` and `1.5` are floats; `1.x` is not valid WGSL, treat as float
        // followed by an identifier.
        if self.cursor.current() == b'.' {
            self.cursor.advance();
            self.eat_decimal_digits();
            is_float = true;
        }
        if self.eat_exponent() {
            is_float = true;
        }

        if is_float {
            self.float_suffix(start)
        } else {
            self.int_suffix(start)
        }
    }

    fn hex_number(&mut self, start: u32) -> RawToken {
        self.cursor.advance_n(2);
        self.cursor.eat_while(|b| b.is_ascii_hexdigit());
        let mut is_float = false;

        if self.cursor.current() == b'.' {
            self.cursor.advance();
            self.cursor.eat_while(|b| b.is_ascii_hexdigit());
            is_float = true;
        }
        if matches!(self.cursor.current(), b'p' | b'P') && self.exponent_follows() {
            self.cursor.advance();
            if matches!(self.cursor.current(), b'+' | b'-') {
                self.cursor.advance();
            }
            self.eat_decimal_digits();
            is_float = true;
        }

        if is_float {
            self.float_suffix(start)
        } else {
            self.int_suffix(start)
        }
    }

    fn eat_decimal_digits(&mut self) {
        self.cursor.eat_while(|b| b.is_ascii_digit());
    }

    /// Whether the byte after an exponent marker starts a valid exponent.
    fn exponent_follows(&self) -> bool {
        match self.cursor.peek() {
            b'0'..=b'9' => true,
            b'+' | b'-' => self.cursor.peek2().is_ascii_digit(),
            _ => false,
        }
    }

    fn eat_exponent(&mut self) -> bool {
        if !matches!(self.cursor.current(), b'e' | b'E') || !self.exponent_follows() {
            return false;
        }
        self.cursor.advance();
        if matches!(self.cursor.current(), b'+' | b'-') {
            self.cursor.advance();
        }
        self.eat_decimal_digits();
        true
    }

    fn int_suffix(&mut self, start: u32) -> RawToken {
        match self.cursor.current() {
            b'i' | b'u' => self.single(start, Tag::Int),
            b'f' | b'h' => self.single(start, Tag::Float),
            _ => self.token(start, Tag::Int),
        }
    }

    fn float_suffix(&mut self, start: u32) -> RawToken {
        if matches!(self.cursor.current(), b'f' | b'h') {
            self.cursor.advance();
        }
        self.token(start, Tag::Float)
    }
}

impl Iterator for RawScanner<'_> {
    type Item = RawToken;

    fn next(&mut self) -> Option<RawToken> {
        let token = self.next_token();
        (token.tag != Tag::Eof).then_some(token)
    }
}

/// Bytes that may continue an identifier. Non-ASCII bytes are accepted so
/// that UTF-8 identifiers scan as one token.
#[inline]
fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}

#[cfg(test)]
mod tests;
