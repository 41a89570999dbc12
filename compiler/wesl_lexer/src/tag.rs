//! Token tags.

use std::fmt;

/// Kind of a scanned token.
///
/// Keywords are not distinguished from identifiers here; the parser checks
/// identifier text where a keyword is expected.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum Tag {
    // Names and literals
    Ident,
    /// A lone `_` (phony assignment target).
    Underscore,
    Int,
    Float,

    // Delimiters
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,

    // Punctuation
    Semicolon,
    Comma,
    Colon,
    ColonColon,
    Dot,
    At,
    Arrow,

    // Operators
    Eq,
    EqEq,
    Bang,
    BangEq,
    Less,
    LessEq,
    Shl,
    /// Always a single `>`; `>>` and `>=` are two tokens so template lists
    /// like `array<vec2<f32>>` close cleanly.
    Greater,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Amp,
    AmpAmp,
    Pipe,
    PipePipe,
    Caret,
    Tilde,

    // Trivia
    Whitespace,
    Newline,
    LineComment,
    BlockComment,

    // Errors
    /// `/*` without a matching `*/`.
    UnterminatedComment,
    /// A byte that cannot start any token.
    InvalidByte,

    Eof,
}

impl Tag {
    /// Whitespace and comments.
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Tag::Whitespace | Tag::Newline | Tag::LineComment | Tag::BlockComment
        )
    }

    #[inline]
    pub fn is_error(self) -> bool {
        matches!(self, Tag::UnterminatedComment | Tag::InvalidByte)
    }

    /// Fixed spelling of punctuation and operator tags.
    pub fn text(self) -> Option<&'static str> {
        Some(match self {
            Tag::Underscore => "_",
            Tag::LeftParen => "(",
            Tag::RightParen => ")",
            Tag::LeftBrace => "{",
            Tag::RightBrace => "}",
            Tag::LeftBracket => "[",
            Tag::RightBracket => "]",
            Tag::Semicolon => ";",
            Tag::Comma => ",",
            Tag::Colon => ":",
            Tag::ColonColon => "::",
            Tag::Dot => ".",
            Tag::At => "@",
            Tag::Arrow => "->",
            Tag::Eq => "=",
            Tag::EqEq => "==",
            Tag::Bang => "!",
            Tag::BangEq => "!=",
            Tag::Less => "<",
            Tag::LessEq => "<=",
            Tag::Shl => "<<",
            Tag::Greater => ">",
            Tag::Plus => "+",
            Tag::Minus => "-",
            Tag::Star => "*",
            Tag::Slash => "/",
            Tag::Percent => "%",
            Tag::Amp => "&",
            Tag::AmpAmp => "&&",
            Tag::Pipe => "|",
            Tag::PipePipe => "||",
            Tag::Caret => "^",
            Tag::Tilde => "~",
            _ => return None,
        })
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(text) = self.text() {
            return write!(f, "`{text}`");
        }
        let name = match self {
            Tag::Ident => "identifier",
            Tag::Int => "integer literal",
            Tag::Float => "float literal",
            Tag::Whitespace | Tag::Newline => "whitespace",
            Tag::LineComment | Tag::BlockComment => "comment",
            Tag::UnterminatedComment => "unterminated block comment",
            Tag::InvalidByte => "invalid character",
            _ => "end of file",
        };
        f.write_str(name)
    }
}

/// A tag plus the token's byte length.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct RawToken {
    pub tag: Tag,
    pub len: u32,
}
