//! Import statement parsing.
//!
//! ```text
//! import_stmt  = "import" import_tree ";" .
//! import_tree  = [ relative ] segment { ( "::" | "/" ) segment } .
//! relative     = ( "." | ".." ) "/" { ".." "/" } .
//! segment      = ident [ "as" ident ]
//!              | "*" [ "as" ident ]
//!              | "{" [ import_tree { "," import_tree } [ "," ] ] "}"
//!              | "(" import_tree ")" .
//! ```

use wesl_ir::{ElementKind, ImportStatement, ImportTree, PathSegment, Span};
use wesl_lexer::Tag;

use super::Attributes;
use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse an `import` statement. `start` is the span of the item's first
    /// token (attributes included).
    pub(crate) fn parse_import(&mut self, start: Span, attrs: Attributes) -> Result<(), ParseError> {
        self.cursor.advance();
        let tree = self.parse_import_tree(true)?;
        if !self.cursor.check(Tag::Semicolon) {
            return Err(ParseError::invalid_import(
                "expected `;` after import path",
                self.cursor.current_span(),
            ));
        }
        self.cursor.advance();

        let span = start.merge(self.cursor.previous_span());
        let element = self.item;
        self.finish_item(ElementKind::Import, span, attrs.condition.clone());
        self.imports.push(ImportStatement {
            tree,
            span,
            element,
            condition: attrs.condition,
        });
        Ok(())
    }

    fn parse_import_tree(&mut self, allow_relative: bool) -> Result<ImportTree, ParseError> {
        let mut segments = Vec::new();
        if allow_relative {
            self.parse_relative_prefix(&mut segments)?;
        }

        loop {
            let segment = self.parse_import_segment()?;
            let renamed = matches!(
                segment,
                PathSegment::Simple { alias: Some(_), .. } | PathSegment::Wildcard { alias: Some(_) }
            );
            segments.push(segment);
            if renamed || !(self.cursor.eat(Tag::ColonColon) || self.cursor.eat(Tag::Slash)) {
                break;
            }
        }
        Ok(ImportTree::new(segments))
    }

    /// `./` and `../` prefixes, as `.` and `..` segments.
    fn parse_relative_prefix(&mut self, segments: &mut Vec<PathSegment>) -> Result<(), ParseError> {
        while self.cursor.check(Tag::Dot) {
            let first = self.cursor.advance();
            let up = self.cursor.check(Tag::Dot) && self.cursor.current_span().start == first.span.end;
            if up {
                self.cursor.advance();
            }
            if !self.cursor.eat(Tag::Slash) {
                return Err(ParseError::invalid_import(
                    "expected `/` after relative path prefix",
                    self.cursor.current_span(),
                ));
            }
            segments.push(PathSegment::simple(if up { ".." } else { "." }));
        }
        Ok(())
    }

    fn parse_import_segment(&mut self) -> Result<PathSegment, ParseError> {
        match self.cursor.current_tag() {
            Tag::Ident => {
                let (name, _) = self.cursor.expect_ident()?;
                let alias = self.parse_import_alias()?;
                Ok(PathSegment::Simple {
                    name: name.to_owned(),
                    alias,
                })
            }
            Tag::Star => {
                self.cursor.advance();
                let alias = self.parse_import_alias()?;
                Ok(PathSegment::Wildcard { alias })
            }
            Tag::LeftBrace => {
                let open = self.cursor.advance();
                let mut alternatives = Vec::new();
                while !self.cursor.check(Tag::RightBrace) {
                    if self.cursor.is_at_end() {
                        return Err(ParseError::unclosed('{', open.span, self.cursor.current_span()));
                    }
                    alternatives.push(self.parse_import_tree(false)?);
                    if !self.cursor.eat(Tag::Comma) {
                        break;
                    }
                }
                if !self.cursor.eat(Tag::RightBrace) {
                    return Err(ParseError::invalid_import(
                        "expected `,` or `}` in import list",
                        self.cursor.current_span(),
                    ));
                }
                Ok(PathSegment::List(alternatives))
            }
            Tag::LeftParen => {
                self.cursor.advance();
                let inner = self.parse_import_tree(false)?;
                self.cursor.expect(Tag::RightParen)?;
                Ok(PathSegment::Tree(inner))
            }
            _ => Err(ParseError::invalid_import(
                "expected a path segment",
                self.cursor.current_span(),
            )),
        }
    }

    fn parse_import_alias(&mut self) -> Result<Option<String>, ParseError> {
        if self.cursor.eat_keyword("as") {
            let (alias, _) = self.cursor.expect_ident()?;
            return Ok(Some(alias.to_owned()));
        }
        Ok(None)
    }
}
