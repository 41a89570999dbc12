//! The `check` command: parse and link without writing anything.

use wesl_diagnostic::emitter::DiagnosticEmitter;
use wesl_link::link;

use super::{report_diagnostics, CommandError, Report};
use crate::options::LinkOptions;
use crate::package::load_package;

/// Report every parse and link diagnostic of the package.
pub fn check_package(
    options: &LinkOptions,
    emitter: &mut dyn DiagnosticEmitter,
) -> Result<Report, CommandError> {
    let package = load_package(options)?;
    let mut report = Report::default();
    report_diagnostics(emitter, &package, &package.diagnostics, &mut report);

    let output = link(&package.registry, &options.link_config(package.root.clone()))?;
    report_diagnostics(emitter, &package, &output.diagnostics, &mut report);
    if report != Report::default() {
        emitter.emit_summary(report.errors, report.warnings);
    }
    emitter.flush();
    Ok(report)
}
