//! Token cursor for navigating the token stream.
//!
//! Provides low-level token access, lookahead, and consumption methods.

use wesl_ir::Span;
use wesl_lexer::{Tag, Token};

use crate::ParseError;

const EOF: Token = Token {
    tag: Tag::Eof,
    span: Span::DUMMY,
};

/// Cursor over significant tokens.
///
/// The token slice always ends with `Eof`; the cursor never moves past it.
pub struct Cursor<'a> {
    tokens: &'a [Token],
    source: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a [Token], source: &'a str) -> Self {
        Cursor {
            tokens,
            source,
            pos: 0,
        }
    }

    /// Current index into the token stream.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Jump to a previously recorded position.
    pub fn set_position(&mut self, pos: usize) {
        debug_assert!(
            pos < self.tokens.len(),
            "cursor position {pos} out of bounds (max {})",
            self.tokens.len()
        );
        self.pos = pos.min(self.tokens.len().saturating_sub(1));
    }

    #[inline]
    pub fn current(&self) -> Token {
        self.tokens.get(self.pos).copied().unwrap_or(EOF)
    }

    #[inline]
    pub fn current_tag(&self) -> Tag {
        self.current().tag
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Tag `n` tokens after the current one.
    #[inline]
    pub fn peek_tag(&self, n: usize) -> Tag {
        self.tokens.get(self.pos + n).map_or(Tag::Eof, |t| t.tag)
    }

    /// Tag of the token before the current one.
    pub fn previous_tag(&self) -> Option<Tag> {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| t.tag)
    }

    pub fn previous_span(&self) -> Span {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(Span::DUMMY, |t| t.span)
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current_tag() == Tag::Eof
    }

    #[inline]
    pub fn check(&self, tag: Tag) -> bool {
        self.current_tag() == tag
    }

    /// Current token is the identifier `keyword`.
    #[inline]
    pub fn check_keyword(&self, keyword: &str) -> bool {
        self.check(Tag::Ident) && self.current_text() == keyword
    }

    /// Source text of `token`.
    #[inline]
    pub fn text(&self, token: Token) -> &'a str {
        self.source.get(token.span.to_range()).unwrap_or("")
    }

    #[inline]
    pub fn current_text(&self) -> &'a str {
        self.text(self.current())
    }

    /// Consume the current token. At `Eof` the cursor stays put.
    #[inline]
    pub fn advance(&mut self) -> Token {
        let token = self.current();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it has `tag`.
    #[inline]
    pub fn eat(&mut self, tag: Tag) -> bool {
        if self.check(tag) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.check_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn expect(&mut self, tag: Tag) -> Result<Token, ParseError> {
        if self.check(tag) {
            Ok(self.advance())
        } else {
            Err(self.make_expect_error(tag))
        }
    }

    #[cold]
    #[inline(never)]
    fn make_expect_error(&self, tag: Tag) -> ParseError {
        ParseError::unexpected(&tag.to_string(), self.found(), self.current_span())
    }

    /// Expect an identifier, returning its text and span.
    #[inline]
    pub fn expect_ident(&mut self) -> Result<(&'a str, Span), ParseError> {
        if self.check(Tag::Ident) {
            let token = self.advance();
            Ok((self.text(token), token.span))
        } else {
            Err(ParseError::expected_ident(self.found(), self.current_span()))
        }
    }

    /// Spelling of the current token for error messages.
    pub fn found(&self) -> &'a str {
        if self.is_at_end() {
            "end of file"
        } else {
            self.current_text()
        }
    }
}
