//! Diagnostic system for the WESL linker.
//!
//! Every user-facing problem carries:
//! - an error code for searchability
//! - a message saying what went wrong
//! - a primary span saying where
//! - the module the span belongs to
//!
//! Recoverable problems are collected as [`Diagnostic`] values and returned
//! with the link output; fatal failures are `thiserror` enums in the crates
//! that raise them.

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod queue;
pub mod span_utils;

pub use diagnostic::{
    expected_identifier, invalid_import, malformed_import, missing_parameter, not_exported,
    unclosed_delimiter, unexpected_token, unknown_import, unresolved_identifier, Diagnostic, Label,
    Severity,
};
pub use emitter::SourceLookup;
pub use error_code::ErrorCode;
pub use queue::DiagnosticQueue;
