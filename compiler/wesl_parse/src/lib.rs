//! Scope-collecting parser for WESL.
//!
//! The parser recognizes imports, directives and top-level declarations,
//! and records every identifier occurrence in the module's scope tree and
//! element tree. Statement and expression text is otherwise treated as an
//! opaque token run: only identifiers, blocks and local declarations matter
//! to the linker.
//!
//! Each top-level item is built speculatively. When an item fails, its
//! elements and scopes are rolled back wholesale and parsing resumes at the
//! next `;` or closing `}`.

mod cursor;
mod error;
mod grammar;
mod keywords;
mod recovery;

pub use cursor::Cursor;
pub use error::ParseError;
pub use keywords::is_keyword;
pub use recovery::{skip_item, TokenSet};

use rustc_hash::FxHashSet;
use tracing::debug;
use wesl_diagnostic::Diagnostic;
use wesl_ir::{
    ElementArena, ElementId, ExportPolicy, IdentId, ImportStatement, Module, ModuleParts,
    ModulePath, ScopeTree,
};
use wesl_lexer::Token;

/// Parser state for one module.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    scopes: ScopeTree,
    elements: ElementArena,
    root_elements: Vec<ElementId>,
    imports: Vec<ImportStatement>,
    /// Declarations carrying an `export` marker.
    exported: FxHashSet<IdentId>,
    errors: Vec<ParseError>,
    /// Element of the top-level item being parsed. Local declarations name
    /// their enclosing item.
    item: ElementId,
    /// Identifier and elided children of the current item.
    children: Vec<ElementId>,
}

impl<'a> Parser<'a> {
    /// `tokens` must end with an `Eof` token and hold no error tokens.
    pub fn new(tokens: &'a [Token], source: &'a str) -> Self {
        Parser {
            cursor: Cursor::new(tokens, source),
            scopes: ScopeTree::new(),
            elements: ElementArena::new(),
            root_elements: Vec::new(),
            imports: Vec::new(),
            exported: FxHashSet::default(),
            errors: Vec::new(),
            item: ElementId::new(0),
            children: Vec::new(),
        }
    }

    /// Parse every top-level item.
    pub fn parse_module(mut self) -> (ModuleParts, Vec<ParseError>) {
        while !self.cursor.is_at_end() {
            let start = self.cursor.position();
            let scope_snapshot = self.scopes.snapshot();
            let element_count = self.elements.len();

            if let Err(error) = self.parse_item() {
                self.scopes.rollback(scope_snapshot);
                self.elements.truncate(element_count);
                self.children.clear();
                let fatal = error.fatal;
                self.errors.push(error);
                if fatal {
                    break;
                }
                recovery::skip_item(&mut self.cursor, start);
            }
        }

        if let Err(error) = self.scopes.finish() {
            let span = self.cursor.current_span();
            self.errors.push(ParseError::scope_invariant(&error, span));
        }

        let exports = if self.exported.is_empty() {
            ExportPolicy::All
        } else {
            ExportPolicy::Marked(self.exported)
        };
        let parts = ModuleParts {
            scopes: self.scopes,
            elements: self.elements,
            root_elements: self.root_elements,
            imports: self.imports,
            exports,
        };
        (parts, self.errors)
    }
}

/// Parse result: the module plus any errors.
///
/// The module is always produced; items that failed to parse are absent.
#[derive(Clone, Debug)]
pub struct ParseOutput {
    pub module: Module,
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// First error that makes the module unusable for linking.
    pub fn fatal_error(&self) -> Option<&ParseError> {
        self.errors.iter().find(|e| e.fatal)
    }

    /// Errors as diagnostics in this module.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.errors
            .iter()
            .map(|e| e.to_diagnostic(self.module.path()))
            .collect()
    }
}

/// Lex and parse one module.
pub fn parse(path: ModulePath, source: String) -> ParseOutput {
    let tokens = wesl_lexer::lex(&source);
    let mut errors = Vec::new();
    let mut significant = Vec::with_capacity(tokens.len());
    for token in &tokens {
        let text = source.get(token.span.to_range()).unwrap_or("");
        match ParseError::lexical(*token, text) {
            Some(error) => errors.push(error),
            None => significant.push(*token),
        }
    }

    let (parts, parse_errors) = Parser::new(&significant, &source).parse_module();
    errors.extend(parse_errors);
    debug!(
        module = %path,
        items = parts.root_elements.len(),
        errors = errors.len(),
        "parsed module"
    );

    ParseOutput {
        module: Module::new(path, source, parts),
        errors,
    }
}

#[cfg(test)]
mod tests;
