use super::*;

#[test]
fn test_diagnostic_builder() {
    let diag = Diagnostic::error(ErrorCode::E2001)
        .with_message("unresolved identifier `foo`")
        .in_module(ModulePath::parse("package::main"))
        .with_label(Span::new(0, 3), "not found in this scope")
        .with_note("imports are resolved before locals");

    assert_eq!(diag.code, ErrorCode::E2001);
    assert!(diag.is_error());
    assert_eq!(diag.labels.len(), 1);
    assert!(diag.labels[0].is_primary);
    assert_eq!(diag.notes.len(), 1);
    assert_eq!(diag.module, Some(ModulePath::parse("package::main")));
    assert_eq!(diag.primary_span(), Some(Span::new(0, 3)));
}

#[test]
fn test_warning_is_not_error() {
    let diag = Diagnostic::warning(ErrorCode::E2005).with_message("missing value");
    assert!(!diag.is_error());
    assert_eq!(diag.primary_span(), None);
}

#[test]
fn test_unclosed_delimiter() {
    let diag = unclosed_delimiter(Span::new(0, 1), Span::new(10, 10), '{');

    assert_eq!(diag.code, ErrorCode::E1003);
    assert_eq!(diag.labels.len(), 2);
    assert!(diag.labels[0].is_primary);
    assert!(!diag.labels[1].is_primary);
    assert!(diag.labels[0].message.contains('}'));
}

#[test]
fn test_parser_helpers_use_parser_codes() {
    assert!(unexpected_token(Span::new(0, 1), "`;`", "}")
        .code
        .is_parser_error());
    assert!(expected_identifier(Span::new(0, 1), "(")
        .code
        .is_parser_error());
    assert!(invalid_import(Span::new(0, 1), "empty path")
        .code
        .is_parser_error());
}

#[test]
fn test_diagnostic_display() {
    let diag = Diagnostic::error(ErrorCode::E1001)
        .with_message("test error")
        .in_module(ModulePath::parse("package::a"))
        .with_label(Span::new(0, 5), "here");

    let output = diag.to_string();
    assert!(output.contains("error [E1001]: test error"));
    assert!(output.contains("--> package::a 0..5: here"));
}

#[test]
fn test_link_helpers() {
    let span = Span::new(4, 7);
    let module = ModulePath::parse("package::lib");
    let codes = [
        unresolved_identifier(span, "bar").code,
        unknown_import(span, "package::nope").code,
        not_exported(span, "foo", &module).code,
        malformed_import(span, "import path is empty").code,
    ];
    assert_eq!(
        codes,
        [ErrorCode::E2001, ErrorCode::E2002, ErrorCode::E2003, ErrorCode::E2004]
    );
    assert!(codes.iter().all(ErrorCode::is_link_error));

    let warning = missing_parameter(span, "SIZE");
    assert!(!warning.is_error());
    assert_eq!(warning.primary_span(), Some(span));
    assert!(warning.message.contains("`SIZE`"));
}
