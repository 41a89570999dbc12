//! Error recovery for the parser.
//!
//! Token sets for scan boundaries plus item-level synchronization.

use wesl_lexer::Tag;

use crate::cursor::Cursor;

/// A set of tags as a bitset for O(1) membership testing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenSet(u64);

impl TokenSet {
    pub const fn new() -> Self {
        TokenSet(0)
    }

    /// Builder for const contexts.
    #[must_use]
    pub const fn with(self, tag: Tag) -> Self {
        TokenSet(self.0 | (1u64 << tag as u8))
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        TokenSet(self.0 | other.0)
    }

    #[inline]
    pub const fn contains(&self, tag: Tag) -> bool {
        self.0 & (1u64 << tag as u8) != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TokenSet {
    fn default() -> Self {
        Self::new()
    }
}

/// End of a statement or the start/end of a nested block.
pub const STMT_END: TokenSet = TokenSet::new()
    .with(Tag::Semicolon)
    .with(Tag::LeftBrace)
    .with(Tag::RightBrace);

pub const SEMICOLON: TokenSet = TokenSet::new().with(Tag::Semicolon);

pub const RIGHT_PAREN: TokenSet = TokenSet::new().with(Tag::RightParen);

pub const BLOCK_START: TokenSet = TokenSet::new().with(Tag::LeftBrace);

/// End of a declaration's type annotation.
pub const TYPE_END: TokenSet = TokenSet::new().with(Tag::Eq).with(Tag::Semicolon);

pub const PARAM_END: TokenSet = TokenSet::new().with(Tag::Comma).with(Tag::RightParen);

pub const MEMBER_END: TokenSet = TokenSet::new().with(Tag::Comma).with(Tag::RightBrace);

/// Skip the rest of a failed top-level item.
///
/// Rewinds to the item's first token, then stops after the first `;` outside
/// braces or after the `}` that closes the item's outermost brace. Always
/// consumes at least one token unless already at EOF.
pub fn skip_item(cursor: &mut Cursor<'_>, start: usize) {
    cursor.set_position(start);
    let mut depth = 0u32;
    loop {
        match cursor.current_tag() {
            Tag::Eof => return,
            Tag::LeftBrace => depth += 1,
            Tag::RightBrace if depth <= 1 => {
                cursor.advance();
                return;
            }
            Tag::RightBrace => depth -= 1,
            Tag::Semicolon if depth == 0 => {
                cursor.advance();
                return;
            }
            _ => {}
        }
        cursor.advance();
    }
}
