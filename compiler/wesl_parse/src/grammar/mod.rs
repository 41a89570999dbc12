//! Grammar productions.
//!
//! Shared helpers for recording identifiers and scanning opaque token runs
//! live here; each submodule extends [`Parser`] with one family of
//! productions.

mod attr;
mod body;
mod import;
mod item;

use std::ops::Range;

use wesl_ir::{DeclInfo, Element, ElementKind, IdentId, IdentKind, ScopeId, Span};
use wesl_lexer::{Tag, Token};

use crate::keywords::is_keyword;
use crate::recovery::TokenSet;
use crate::{ParseError, Parser};

pub(crate) use attr::Attributes;

/// How `<` and `>` are treated while scanning.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum ScanMode {
    /// Types: `<`/`>` delimit template lists and hide stop tokens.
    Type,
    /// Expressions: `<`/`>` are comparison operators.
    Expr,
}

impl Parser<'_> {
    /// Record a reference starting at the current identifier token.
    ///
    /// `a::b::c` and `ext.NAME` become a single reference. An identifier
    /// right after `.` is a member access and a keyword is neither; both are
    /// skipped.
    pub(crate) fn reference(&mut self) {
        let after_dot = self.cursor.previous_tag() == Some(Tag::Dot);
        let token = self.cursor.advance();
        let text = self.cursor.text(token);
        if after_dot || is_keyword(text) {
            return;
        }

        let mut name = text.to_owned();
        let mut span = token.span;
        if text == "ext" && self.cursor.check(Tag::Dot) && self.cursor.peek_tag(1) == Tag::Ident {
            self.cursor.advance();
            let member = self.cursor.advance();
            name.push('.');
            name.push_str(self.cursor.text(member));
            span = span.merge(member.span);
        } else {
            while self.cursor.check(Tag::ColonColon) && self.cursor.peek_tag(1) == Tag::Ident {
                self.cursor.advance();
                let segment = self.cursor.advance();
                name.push_str("::");
                name.push_str(self.cursor.text(segment));
                span = span.merge(segment.span);
            }
        }

        let id = self.scopes.add_ident(name, span, IdentKind::Ref);
        self.push_ident(id, span);
    }

    /// Scan an opaque token run up to a token in `stops` at nesting depth
    /// zero, recording references. The stop token is not consumed.
    pub(crate) fn scan(
        &mut self,
        stops: TokenSet,
        mode: ScanMode,
        expected: &str,
    ) -> Result<(), ParseError> {
        let mut nesting: Vec<Token> = Vec::new();
        let mut templates = 0u32;
        loop {
            let token = self.cursor.current();
            if nesting.is_empty() && templates == 0 && stops.contains(token.tag) {
                return Ok(());
            }
            match token.tag {
                Tag::Eof => {
                    return Err(match nesting.last() {
                        Some(open) => ParseError::unclosed(
                            if open.tag == Tag::LeftParen { '(' } else { '[' },
                            open.span,
                            token.span,
                        ),
                        None => ParseError::unexpected(expected, "end of file", token.span),
                    });
                }
                Tag::Ident => {
                    self.reference();
                    continue;
                }
                Tag::LeftParen | Tag::LeftBracket => nesting.push(token),
                Tag::RightParen | Tag::RightBracket => {
                    let closes = match nesting.pop() {
                        Some(open) => matches!(
                            (open.tag, token.tag),
                            (Tag::LeftParen, Tag::RightParen)
                                | (Tag::LeftBracket, Tag::RightBracket)
                        ),
                        None => false,
                    };
                    if !closes {
                        return Err(ParseError::unexpected(
                            expected,
                            self.cursor.text(token),
                            token.span,
                        ));
                    }
                }
                Tag::Less if mode == ScanMode::Type => templates += 1,
                Tag::Greater if mode == ScanMode::Type && templates > 0 => templates -= 1,
                Tag::LeftBrace | Tag::RightBrace => {
                    return Err(ParseError::unexpected(
                        expected,
                        self.cursor.text(token),
                        token.span,
                    ));
                }
                _ => {}
            }
            self.cursor.advance();
        }
    }

    /// Record references in a token range that was skipped earlier.
    pub(crate) fn replay(&mut self, range: Range<usize>) {
        let resume = self.cursor.position();
        self.cursor.set_position(range.start);
        while self.cursor.position() < range.end && !self.cursor.is_at_end() {
            if self.cursor.check(Tag::Ident) {
                self.reference();
            } else {
                self.cursor.advance();
            }
        }
        self.cursor.set_position(resume);
    }

    pub(crate) fn replay_all(&mut self, ranges: &[Range<usize>]) {
        for range in ranges {
            self.replay(range.clone());
        }
    }

    /// Skip a balanced `( ... )`, returning the token range inside.
    pub(crate) fn skip_parens(&mut self) -> Result<Range<usize>, ParseError> {
        self.skip_balanced(Tag::LeftParen, Tag::RightParen, '(')
    }

    /// Skip a balanced `< ... >` template list, returning the range inside.
    pub(crate) fn skip_template(&mut self) -> Result<Range<usize>, ParseError> {
        self.skip_balanced(Tag::Less, Tag::Greater, '<')
    }

    fn skip_balanced(
        &mut self,
        open: Tag,
        close: Tag,
        delimiter: char,
    ) -> Result<Range<usize>, ParseError> {
        let opened = self.cursor.expect(open)?;
        let start = self.cursor.position();
        let mut depth = 1u32;
        loop {
            let tag = self.cursor.current_tag();
            if tag == Tag::Eof {
                return Err(ParseError::unclosed(
                    delimiter,
                    opened.span,
                    self.cursor.current_span(),
                ));
            }
            if tag == open {
                depth += 1;
            } else if tag == close {
                depth -= 1;
                if depth == 0 {
                    let end = self.cursor.position();
                    self.cursor.advance();
                    return Ok(start..end);
                }
            }
            self.cursor.advance();
        }
    }

    /// Declare a module-scope name at the current identifier.
    pub(crate) fn declare_global(&mut self) -> Result<IdentId, ParseError> {
        let (name, span) = self.cursor.expect_ident()?;
        let kind = self.decl_kind(true);
        let id = self.scopes.add_ident(name, span, kind);
        self.push_ident(id, span);
        Ok(id)
    }

    /// Declare a local name at the current identifier. The caller attaches
    /// it to its scope once the declaration is complete.
    pub(crate) fn declare_local(&mut self) -> Result<IdentId, ParseError> {
        let (name, span) = self.cursor.expect_ident()?;
        let kind = self.decl_kind(false);
        let id = self.scopes.new_ident(name, span, kind);
        self.push_ident(id, span);
        Ok(id)
    }

    fn decl_kind(&self, global: bool) -> IdentKind {
        IdentKind::Decl(DeclInfo {
            element: self.item,
            opens: None,
            global,
        })
    }

    fn push_ident(&mut self, id: IdentId, span: Span) {
        let element = self.elements.alloc(Element::new(ElementKind::Ident(id), span));
        self.children.push(element);
    }

    /// Elide text from `start` up to the current token, so the whitespace
    /// after an elided construct goes with it.
    pub(crate) fn elide_from(&mut self, start: Span) {
        let end = self.cursor.current_span().start.max(start.end);
        let span = Span::new(start.start, end);
        let element = self.elements.alloc(Element::new(ElementKind::Elided, span));
        self.children.push(element);
    }

    pub(crate) fn close_scope(&mut self, scope: ScopeId) -> Result<(), ParseError> {
        self.scopes
            .close_scope(scope)
            .map_err(|error| ParseError::scope_invariant(&error, self.cursor.previous_span()))
    }
}
