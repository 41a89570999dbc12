//! Parse error types.

use wesl_diagnostic::{Diagnostic, ErrorCode};
use wesl_ir::{ModulePath, ScopeError, Span};
use wesl_lexer::{Tag, Token};

/// Parse error with error code for rich diagnostics.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParseError {
    /// Error code for searchability.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
    /// Location of the error.
    pub span: Span,
    /// Label text at `span`.
    pub context: Option<String>,
    /// Opening delimiter of an unclosed pair.
    pub opened: Option<Span>,
    /// A broken parser invariant; the module cannot be linked.
    pub fatal: bool,
}

impl ParseError {
    /// Create a new parse error.
    #[cold]
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        ParseError {
            code,
            message: message.into(),
            span,
            context: None,
            opened: None,
            fatal: false,
        }
    }

    /// Add context for better error messages.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    #[cold]
    pub fn unexpected(expected: &str, found: &str, span: Span) -> Self {
        ParseError::new(
            ErrorCode::E1001,
            format!("unexpected token: expected {expected}, found `{found}`"),
            span,
        )
        .with_context(format!("expected {expected}"))
    }

    #[cold]
    pub fn expected_ident(found: &str, span: Span) -> Self {
        ParseError::new(
            ErrorCode::E1002,
            format!("expected identifier, found `{found}`"),
            span,
        )
        .with_context("expected identifier here")
    }

    #[cold]
    pub fn unclosed(delimiter: char, opened: Span, span: Span) -> Self {
        let mut error = ParseError::new(
            ErrorCode::E1003,
            format!("unclosed delimiter `{delimiter}`"),
            span,
        )
        .with_context("reached end of file");
        error.opened = Some(opened);
        error
    }

    #[cold]
    pub fn invalid_import(reason: &str, span: Span) -> Self {
        ParseError::new(ErrorCode::E1004, format!("invalid import: {reason}"), span)
            .with_context(reason.to_owned())
    }

    /// Error for a lexer error token, `None` for any other token.
    #[cold]
    pub fn lexical(token: Token, text: &str) -> Option<Self> {
        match token.tag {
            Tag::UnterminatedComment => Some(
                ParseError::new(ErrorCode::E0001, "unterminated block comment", token.span)
                    .with_context("comment starts here"),
            ),
            Tag::InvalidByte => Some(
                ParseError::new(
                    ErrorCode::E0002,
                    format!("invalid character `{}`", text.escape_debug()),
                    token.span,
                )
                .with_context("not valid in WESL source"),
            ),
            _ => None,
        }
    }

    /// A scope-tree discipline violation.
    #[cold]
    pub fn scope_invariant(error: &ScopeError, span: Span) -> Self {
        let mut error = ParseError::new(
            ErrorCode::E1001,
            format!("internal parser error: {error}"),
            span,
        );
        error.fatal = true;
        error
    }

    /// Convert to a full [`Diagnostic`] for rendering.
    pub fn to_diagnostic(&self, module: &ModulePath) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code)
            .with_message(&self.message)
            .in_module(module.clone())
            .with_label(self.span, self.context.as_deref().unwrap_or("here"));
        if let Some(opened) = self.opened {
            diag = diag.with_secondary_label(opened, "unclosed delimiter opened here");
        }
        diag
    }
}
