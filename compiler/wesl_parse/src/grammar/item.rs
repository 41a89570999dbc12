//! Top-level item parsing.

use wesl_ir::{Condition, Element, ElementKind, Span};
use wesl_lexer::Tag;

use super::{Attributes, ScanMode};
use crate::recovery::{BLOCK_START, MEMBER_END, PARAM_END, SEMICOLON, TYPE_END};
use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse one top-level item and commit it.
    ///
    /// On error nothing is committed; the caller rolls back elements and
    /// scopes allocated by the attempt.
    pub(crate) fn parse_item(&mut self) -> Result<(), ParseError> {
        if self.cursor.eat(Tag::Semicolon) {
            return Ok(());
        }

        let start = self.cursor.current_span();
        self.item = self.elements.reserve();
        self.children.clear();

        let attrs = self.parse_attributes(true)?;
        let exported = if self.cursor.check_keyword("export") {
            let marker = self.cursor.advance();
            self.elide_from(marker.span);
            true
        } else {
            false
        };

        let keyword = if self.cursor.check(Tag::Ident) {
            self.cursor.current_text()
        } else {
            ""
        };
        let kind = match keyword {
            "import" if !exported => return self.parse_import(start, attrs),
            "enable" | "requires" | "diagnostic" if !exported => self.parse_directive()?,
            "fn" => self.parse_fn(&attrs)?,
            "struct" => self.parse_struct(&attrs)?,
            "var" | "const" | "override" => self.parse_global_var(&attrs)?,
            "alias" => self.parse_alias(&attrs)?,
            "const_assert" if !exported => self.parse_const_assert(&attrs)?,
            _ => {
                return Err(ParseError::unexpected(
                    "a declaration",
                    self.cursor.found(),
                    self.cursor.current_span(),
                ))
            }
        };

        let span = start.merge(self.cursor.previous_span());
        self.finish_item(kind, span, attrs.condition);
        if exported {
            if let Some(decl) = self.elements.get(self.item).decl_ident() {
                self.exported.insert(decl);
            }
        }
        Ok(())
    }

    /// Fill the reserved item element and append it to the module.
    pub(crate) fn finish_item(&mut self, kind: ElementKind, span: Span, condition: Option<Condition>) {
        let mut children = std::mem::take(&mut self.children);
        children.sort_by_key(|id| self.elements.get(*id).span.start);
        let mut element = Element::new(kind, span);
        element.children = children;
        element.condition = condition;
        self.elements.fill(self.item, element);
        self.root_elements.push(self.item);
    }

    /// `enable`, `requires` and `diagnostic` directives. Kept as raw text.
    fn parse_directive(&mut self) -> Result<ElementKind, ParseError> {
        self.cursor.advance();
        while !self.cursor.check(Tag::Semicolon) {
            if self.cursor.is_at_end() {
                return Err(ParseError::unexpected(
                    "`;`",
                    "end of file",
                    self.cursor.current_span(),
                ));
            }
            self.cursor.advance();
        }
        self.cursor.advance();
        Ok(ElementKind::Directive)
    }

    fn parse_fn(&mut self, attrs: &Attributes) -> Result<ElementKind, ParseError> {
        self.cursor.advance();
        let decl = self.declare_global()?;
        let scope = self.scopes.open_scope(Some(decl));
        self.replay_all(&attrs.deferred);

        self.parse_params()?;
        if self.cursor.eat(Tag::Arrow) {
            let ret_attrs = self.parse_attributes(false)?;
            self.replay_all(&ret_attrs.deferred);
            self.scan(BLOCK_START, ScanMode::Type, "`{`")?;
        }

        let open = self.cursor.expect(Tag::LeftBrace)?;
        self.parse_block_items(open.span)?;
        self.close_scope(scope)?;
        Ok(ElementKind::Fn { name: decl })
    }

    fn parse_params(&mut self) -> Result<(), ParseError> {
        let open = self.cursor.expect(Tag::LeftParen)?;
        loop {
            if self.cursor.eat(Tag::RightParen) {
                return Ok(());
            }
            if self.cursor.is_at_end() {
                return Err(ParseError::unclosed('(', open.span, self.cursor.current_span()));
            }

            let attrs = self.parse_attributes(false)?;
            self.replay_all(&attrs.deferred);
            let param = self.declare_local()?;
            self.cursor.expect(Tag::Colon)?;
            self.scan(PARAM_END, ScanMode::Type, "`,` or `)`")?;
            self.scopes.attach(param);

            if !self.cursor.eat(Tag::Comma) {
                self.cursor.expect(Tag::RightParen)?;
                return Ok(());
            }
        }
    }

    fn parse_struct(&mut self, attrs: &Attributes) -> Result<ElementKind, ParseError> {
        self.cursor.advance();
        let decl = self.declare_global()?;
        let scope = self.scopes.open_scope(Some(decl));
        self.replay_all(&attrs.deferred);

        let open = self.cursor.expect(Tag::LeftBrace)?;
        loop {
            if self.cursor.eat(Tag::RightBrace) {
                break;
            }
            if self.cursor.is_at_end() {
                return Err(ParseError::unclosed('{', open.span, self.cursor.current_span()));
            }

            let member_attrs = self.parse_attributes(false)?;
            self.replay_all(&member_attrs.deferred);
            // Member names are plain text.
            self.cursor.expect_ident()?;
            self.cursor.expect(Tag::Colon)?;
            self.scan(MEMBER_END, ScanMode::Type, "`,` or `}`")?;

            if !self.cursor.eat(Tag::Comma) {
                self.cursor.expect(Tag::RightBrace)?;
                break;
            }
        }
        self.close_scope(scope)?;
        self.cursor.eat(Tag::Semicolon);
        Ok(ElementKind::Struct { name: decl })
    }

    /// Module-scope `var`, `const` and `override`.
    fn parse_global_var(&mut self, attrs: &Attributes) -> Result<ElementKind, ParseError> {
        self.cursor.advance();
        let template = if self.cursor.check(Tag::Less) {
            Some(self.skip_template()?)
        } else {
            None
        };

        let decl = self.declare_global()?;
        let scope = self.scopes.open_scope(Some(decl));
        self.replay_all(&attrs.deferred);
        if let Some(range) = template {
            self.replay(range);
        }

        if self.cursor.eat(Tag::Colon) {
            self.scan(TYPE_END, ScanMode::Type, "`=` or `;`")?;
        }
        if self.cursor.eat(Tag::Eq) {
            self.scan(SEMICOLON, ScanMode::Expr, "`;`")?;
        }
        self.close_scope(scope)?;
        self.cursor.expect(Tag::Semicolon)?;
        Ok(ElementKind::Var { name: decl })
    }

    fn parse_alias(&mut self, attrs: &Attributes) -> Result<ElementKind, ParseError> {
        self.cursor.advance();
        let decl = self.declare_global()?;
        let scope = self.scopes.open_scope(Some(decl));
        self.replay_all(&attrs.deferred);

        self.cursor.expect(Tag::Eq)?;
        self.scan(SEMICOLON, ScanMode::Type, "`;`")?;
        self.close_scope(scope)?;
        self.cursor.expect(Tag::Semicolon)?;
        Ok(ElementKind::Alias { name: decl })
    }

    fn parse_const_assert(&mut self, attrs: &Attributes) -> Result<ElementKind, ParseError> {
        self.cursor.advance();
        let scope = self.scopes.open_scope(None);
        self.replay_all(&attrs.deferred);

        self.scan(SEMICOLON, ScanMode::Expr, "`;`")?;
        self.close_scope(scope)?;
        self.cursor.expect(Tag::Semicolon)?;
        Ok(ElementKind::ConstAssert { scope })
    }
}
