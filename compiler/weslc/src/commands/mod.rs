//! Command handlers for the `weslc` CLI.
//!
//! Each submodule implements one command. Handlers return a [`Report`] or
//! a [`CommandError`]; `main` turns those into exit codes.

use std::io;
use std::path::PathBuf;

use wesl_diagnostic::emitter::{DiagnosticEmitter, SourceLookup};
use wesl_diagnostic::Diagnostic;
use wesl_link::LinkError;

use crate::options::OptionsError;
use crate::package::PackageError;

mod check;
mod explain;
mod link;

pub use check::check_package;
pub use explain::explain_error;
pub use link::link_package;

/// Diagnostic counts of a finished command.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    pub errors: usize,
    pub warnings: usize,
}

impl Report {
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    fn count(&mut self, diagnostics: &[Diagnostic]) {
        for diagnostic in diagnostics {
            if diagnostic.is_error() {
                self.errors += 1;
            } else {
                self.warnings += 1;
            }
        }
    }
}

/// Failures that end a command without output.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Options(#[from] OptionsError),
    #[error(transparent)]
    Package(#[from] PackageError),
    #[error(transparent)]
    Link(#[from] LinkError),
    #[error("cannot write `{}`: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot serialize the source map: {0}")]
    SourceMap(#[from] serde_json::Error),
}

/// Render `diagnostics` and add them to `report`.
fn report_diagnostics(
    emitter: &mut dyn DiagnosticEmitter,
    sources: &dyn SourceLookup,
    diagnostics: &[Diagnostic],
    report: &mut Report,
) {
    emitter.emit_all(diagnostics, sources);
    report.count(diagnostics);
}
