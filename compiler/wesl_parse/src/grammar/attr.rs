//! Attribute parsing.
//!
//! Grammar: `attribute = "@" identifier [ "(" args ")" ] .`
//!
//! Arguments of `@builtin`, `@interpolate` and `@diagnostic` are plain
//! words. Other arguments are expressions whose references are recorded
//! once the scope of the attributed declaration is open, so they are kept
//! as token ranges. `@if(...)` on a top-level item is parsed into a
//! [`Condition`] and elided from output.

use std::ops::Range;

use wesl_ir::Condition;
use wesl_lexer::Tag;

use crate::{ParseError, Parser};

/// Attributes preceding an item, parameter, member or statement.
#[derive(Clone, Debug, Default)]
pub(crate) struct Attributes {
    /// Conjunction of all `@if` conditions.
    pub condition: Option<Condition>,
    /// Argument token ranges to scan for references.
    pub deferred: Vec<Range<usize>>,
}

impl Parser<'_> {
    /// Parse a run of attributes. `@if` is only recognized when `top_level`.
    pub(crate) fn parse_attributes(&mut self, top_level: bool) -> Result<Attributes, ParseError> {
        let mut attrs = Attributes::default();
        while self.cursor.check(Tag::At) {
            let at = self.cursor.advance();
            let (name, _) = self.cursor.expect_ident()?;

            if top_level && name == "if" {
                self.cursor.expect(Tag::LeftParen)?;
                let condition = self.parse_condition()?;
                self.cursor.expect(Tag::RightParen)?;
                attrs.condition = Some(match attrs.condition.take() {
                    Some(previous) => Condition::And(Box::new(previous), Box::new(condition)),
                    None => condition,
                });
                self.elide_from(at.span);
                continue;
            }

            if self.cursor.check(Tag::LeftParen) {
                let args = self.skip_parens()?;
                if !matches!(name, "builtin" | "interpolate" | "diagnostic" | "if") {
                    attrs.deferred.push(args);
                }
            }
        }
        Ok(attrs)
    }

    /// `or := and ("||" and)*`
    fn parse_condition(&mut self) -> Result<Condition, ParseError> {
        let mut lhs = self.parse_condition_and()?;
        while self.cursor.eat(Tag::PipePipe) {
            let rhs = self.parse_condition_and()?;
            lhs = Condition::Or(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    /// `and := unary ("&&" unary)*`
    fn parse_condition_and(&mut self) -> Result<Condition, ParseError> {
        let mut lhs = self.parse_condition_unary()?;
        while self.cursor.eat(Tag::AmpAmp) {
            let rhs = self.parse_condition_unary()?;
            lhs = Condition::And(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_condition_unary(&mut self) -> Result<Condition, ParseError> {
        if self.cursor.eat(Tag::Bang) {
            let inner = self.parse_condition_unary()?;
            return Ok(Condition::Not(Box::new(inner)));
        }
        if self.cursor.eat(Tag::LeftParen) {
            let inner = self.parse_condition()?;
            self.cursor.expect(Tag::RightParen)?;
            return Ok(inner);
        }
        let (name, _) = self.cursor.expect_ident()?;
        Ok(match name {
            "true" => Condition::Literal(true),
            "false" => Condition::Literal(false),
            _ => Condition::Name(name.to_owned()),
        })
    }
}
