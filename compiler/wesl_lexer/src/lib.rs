//! Byte-level lexer for WESL.
//!
//! [`lex`] turns a module's source text into a [`TokenList`]. Whitespace and
//! comments are dropped; lexical errors stay in the list as error tokens so
//! the parser can report them in source order.
//!
//! The scanning layers are exposed for testing and tools:
//! [`SourceBuffer`] (sentinel-terminated bytes), [`Cursor`] and
//! [`RawScanner`], which yields `(Tag, len)` pairs including trivia.

mod cursor;
mod raw_scanner;
mod source_buffer;
mod tag;

pub use cursor::Cursor;
pub use raw_scanner::RawScanner;
pub use source_buffer::SourceBuffer;
pub use tag::{RawToken, Tag};

use std::ops::Index;

use wesl_ir::Span;

/// A significant token with its location.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub tag: Tag,
    pub span: Span,
}

impl Token {
    pub fn new(tag: Tag, span: Span) -> Self {
        Token { tag, span }
    }
}

/// Tokens of one module, always terminated by a single `Eof` token.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when the list holds only the `Eof` token.
    pub fn is_empty(&self) -> bool {
        self.tokens.len() <= 1
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// The trailing `Eof` token.
    pub fn eof(&self) -> Token {
        self.tokens
            .last()
            .copied()
            .unwrap_or(Token::new(Tag::Eof, Span::DUMMY))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Error tokens, in source order.
    pub fn errors(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|t| t.tag.is_error())
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }
}

impl Index<usize> for TokenList {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// Lex `source` into significant tokens.
///
/// Inside an import statement, `/*` directly after a path segment is the
/// separator and wildcard of `../util/*`, not the start of a comment.
pub fn lex(source: &str) -> TokenList {
    let buffer = SourceBuffer::new(source);
    let mut scanner = RawScanner::new(buffer.cursor());
    let mut tokens = Vec::with_capacity(source.len() / 4 + 1);
    let mut offset = 0u32;
    let mut in_import = false;

    loop {
        let after_segment = tokens.last().is_some_and(|last: &Token| {
            last.span.end == offset && matches!(last.tag, Tag::Ident | Tag::Dot)
        });
        scanner.set_path_wildcard(in_import && after_segment);

        let raw = scanner.next_token();
        let span = Span::new(offset, offset + raw.len);
        offset += raw.len;
        if raw.tag == Tag::Eof {
            tokens.push(Token::new(Tag::Eof, span));
            break;
        }
        if raw.tag.is_trivia() {
            continue;
        }
        match raw.tag {
            Tag::Ident if source.get(span.to_range()) == Some("import") => in_import = true,
            Tag::Semicolon => in_import = false,
            _ => {}
        }
        tokens.push(Token::new(raw.tag, span));
    }

    TokenList { tokens }
}

#[cfg(test)]
mod tests;
