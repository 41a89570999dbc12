//! The `link` command: write the linked shader and, optionally, its source
//! map as JSON.

use std::fs;
use std::path::Path;

use tracing::info;
use wesl_diagnostic::emitter::DiagnosticEmitter;
use wesl_link::link;

use super::{report_diagnostics, CommandError, Report};
use crate::options::LinkOptions;
use crate::package::load_package;

/// Link the package `options` describes.
///
/// The output is written even when linking reported errors; only fatal
/// failures return `Err`.
pub fn link_package(
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

    match &options.output {
        Some(path) => write(path, &output.text)?,
        None => print!("{}", output.text),
    }
    if let Some(path) = &options.source_map {
        let json = serde_json::to_string_pretty(&output.source_map)?;
        write(path, &json)?;
    }

    info!(
        root = %package.root,
        bytes = output.text.len(),
        declarations = output.reachable.len(),
        errors = report.errors,
        "linked"
    );
    Ok(report)
}

fn write(path: &Path, text: &str) -> Result<(), CommandError> {
    fs::write(path, text).map_err(|source| CommandError::Write {
        path: path.to_path_buf(),
        source,
    })
}
