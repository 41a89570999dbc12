//! The `explain` command: describe an error code.

use wesl_diagnostic::ErrorCode;

/// Description of `code`, or `None` if it is not a known code.
pub fn explain_error(code: &str) -> Option<String> {
    let code = code.parse::<ErrorCode>().ok()?;
    Some(format!("{code}: {}", code.description()))
}
