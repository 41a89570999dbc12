//! Function bodies.
//!
//! Statements are scanned for references; only blocks, `for` headers and
//! local declarations shape the scope tree.

use wesl_ir::Span;
use wesl_lexer::Tag;

use super::ScanMode;
use crate::recovery::{RIGHT_PAREN, SEMICOLON, STMT_END, TYPE_END};
use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse statements up to and including the `}` matching `open`.
    pub(crate) fn parse_block_items(&mut self, open: Span) -> Result<(), ParseError> {
        loop {
            match self.cursor.current_tag() {
                Tag::RightBrace => {
                    self.cursor.advance();
                    return Ok(());
                }
                Tag::Eof => {
                    return Err(ParseError::unclosed('{', open, self.cursor.current_span()));
                }
                Tag::Semicolon => {
                    self.cursor.advance();
                }
                Tag::LeftBrace => self.parse_nested_block()?,
                Tag::At => {
                    let attrs = self.parse_attributes(false)?;
                    self.replay_all(&attrs.deferred);
                }
                Tag::Ident if matches!(self.cursor.current_text(), "var" | "let" | "const") => {
                    self.parse_local()?;
                }
                Tag::Ident if self.cursor.current_text() == "for" => self.parse_for()?,
                _ => {
                    self.scan(STMT_END, ScanMode::Expr, "`;`")?;
                    self.cursor.eat(Tag::Semicolon);
                }
            }
        }
    }

    fn parse_nested_block(&mut self) -> Result<(), ParseError> {
        let open = self.cursor.advance();
        let scope = self.scopes.open_scope(None);
        self.parse_block_items(open.span)?;
        self.close_scope(scope)
    }

    /// `var`, `let` or `const` inside a function. The name becomes visible
    /// after its initializer.
    fn parse_local(&mut self) -> Result<(), ParseError> {
        let keyword = self.cursor.advance();
        if self.cursor.text(keyword) == "var" && self.cursor.check(Tag::Less) {
            let template = self.skip_template()?;
            self.replay(template);
        }

        let local = self.declare_local()?;
        if self.cursor.eat(Tag::Colon) {
            self.scan(TYPE_END, ScanMode::Type, "`=` or `;`")?;
        }
        if self.cursor.eat(Tag::Eq) {
            self.scan(SEMICOLON, ScanMode::Expr, "`;`")?;
        }
        self.scopes.attach(local);
        self.cursor.expect(Tag::Semicolon)?;
        Ok(())
    }

    /// `for (init; cond; update) { body }` in one scope.
    fn parse_for(&mut self) -> Result<(), ParseError> {
        self.cursor.advance();
        let scope = self.scopes.open_scope(None);
        self.cursor.expect(Tag::LeftParen)?;

        if ["var", "let", "const"]
            .iter()
            .any(|kw| self.cursor.check_keyword(kw))
        {
            self.parse_local()?;
        } else {
            self.scan(SEMICOLON, ScanMode::Expr, "`;`")?;
            self.cursor.expect(Tag::Semicolon)?;
        }
        self.scan(SEMICOLON, ScanMode::Expr, "`;`")?;
        self.cursor.expect(Tag::Semicolon)?;
        self.scan(RIGHT_PAREN, ScanMode::Expr, "`)`")?;
        self.cursor.expect(Tag::RightParen)?;

        let open = self.cursor.expect(Tag::LeftBrace)?;
        self.parse_block_items(open.span)?;
        self.close_scope(scope)
    }
}
