//! Diagnostic queue for collecting, deduplicating and sorting diagnostics.
//!
//! Diagnostics from different modules are ordered by module path first and
//! then by position, so output is stable regardless of discovery order.

use wesl_ir::ModulePath;

use crate::span_utils::offset_to_line_col;
use crate::Diagnostic;

/// Configuration for diagnostic processing.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of errors kept (0 = unlimited).
    pub error_limit: usize,
    /// Drop a parser error on a line that already has one.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: true,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
struct QueuedDiagnostic {
    diagnostic: Diagnostic,
    line: u32,
    column: u32,
    /// Insertion order, the final tie-breaker.
    seq: usize,
}

/// Queue for collecting diagnostics.
///
/// # Example
///
/// ```text
/// let mut queue = DiagnosticQueue::new();
/// queue.add_with_source(diagnostic, source);
/// let sorted = queue.flush();
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct DiagnosticQueue {
    diagnostics: Vec<QueuedDiagnostic>,
    error_count: usize,
    warning_count: usize,
    /// Module and line of the last parser error, for dedup.
    last_syntax: Option<(Option<ModulePath>, u32)>,
    config: DiagnosticConfig,
}

impl DiagnosticQueue {
    /// Create a new diagnostic queue with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a diagnostic queue with custom configuration.
    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            config,
            ..Self::default()
        }
    }

    /// Add a diagnostic at a known 1-based position.
    ///
    /// Returns `true` if the diagnostic was kept.
    pub fn add(&mut self, diag: Diagnostic, line: u32, column: u32) -> bool {
        let is_error = diag.is_error();

        if is_error && self.limit_reached() {
            return false;
        }

        if self.config.deduplicate && diag.code.is_parser_error() {
            let key = (diag.module.clone(), line);
            if self.last_syntax.as_ref() == Some(&key) {
                return false;
            }
            self.last_syntax = Some(key);
        }

        if is_error {
            self.error_count += 1;
        } else {
            self.warning_count += 1;
        }

        let seq = self.diagnostics.len();
        self.diagnostics.push(QueuedDiagnostic {
            diagnostic: diag,
            line,
            column,
            seq,
        });
        true
    }

    /// Add a diagnostic with its position computed from `source`.
    pub fn add_with_source(&mut self, diag: Diagnostic, source: &str) -> bool {
        let (line, column) = diag
            .primary_span()
            .map_or((1, 1), |span| offset_to_line_col(source, span.start));
        self.add(diag, line, column)
    }

    /// Add a diagnostic that has no meaningful position.
    pub fn push(&mut self, diag: Diagnostic) -> bool {
        self.add(diag, 0, 0)
    }

    /// Check if the error limit has been reached.
    pub fn limit_reached(&self) -> bool {
        self.config.error_limit > 0 && self.error_count >= self.config.error_limit
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Sort by module, line, column, then insertion order, and drain.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        self.diagnostics.sort_by(|a, b| {
            a.diagnostic
                .module
                .cmp(&b.diagnostic.module)
                .then(a.line.cmp(&b.line))
                .then(a.column.cmp(&b.column))
                .then(a.seq.cmp(&b.seq))
        });

        let result = self.diagnostics.drain(..).map(|d| d.diagnostic).collect();

        self.error_count = 0;
        self.warning_count = 0;
        self.last_syntax = None;

        result
    }

    /// Get diagnostics without clearing the queue.
    pub fn peek(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().map(|d| &d.diagnostic)
    }
}

impl Extend<Diagnostic> for DiagnosticQueue {
    fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, iter: I) {
        for diag in iter {
            self.push(diag);
        }
    }
}
