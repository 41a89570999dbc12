//! Diagnostic emitters.
//!
//! Emitters render diagnostics for people or tools. Source text is looked up
//! through [`SourceLookup`] so that a diagnostic only needs to carry its
//! module path and spans.

mod terminal;

pub use terminal::{ColorMode, TerminalEmitter};

use wesl_ir::ModulePath;

use crate::Diagnostic;

/// Access to the source text of modules, for snippets.
pub trait SourceLookup {
    /// Source text of `module`, if known.
    fn source(&self, module: &ModulePath) -> Option<&str>;

    /// Name shown in `--> name:line:col` headers.
    fn display_name(&self, module: &ModulePath) -> String {
        module.to_string()
    }
}

/// A lookup that knows no sources. Diagnostics render without snippets.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoSources;

impl SourceLookup for NoSources {
    fn source(&self, _module: &ModulePath) -> Option<&str> {
        None
    }
}

/// Trait for emitting diagnostics in various formats.
pub trait DiagnosticEmitter {
    /// Emit a single diagnostic.
    fn emit(&mut self, diagnostic: &Diagnostic, sources: &dyn SourceLookup);

    /// Emit multiple diagnostics.
    fn emit_all(&mut self, diagnostics: &[Diagnostic], sources: &dyn SourceLookup) {
        for diag in diagnostics {
            self.emit(diag, sources);
        }
    }

    /// Flush any buffered output.
    fn flush(&mut self);

    /// Emit a summary of errors/warnings.
    fn emit_summary(&mut self, error_count: usize, warning_count: usize);
}
