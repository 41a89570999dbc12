use super::*;

#[test]
fn test_offset_to_line_col() {
    let source = "abc\ndefgh\nij";
    assert_eq!(offset_to_line_col(source, 0), (1, 1));
    assert_eq!(offset_to_line_col(source, 2), (1, 3));
    assert_eq!(offset_to_line_col(source, 4), (2, 1));
    assert_eq!(offset_to_line_col(source, 7), (2, 4));
    assert_eq!(offset_to_line_col(source, 10), (3, 1));
}

#[test]
fn test_offset_past_end_clamps() {
    assert_eq!(offset_to_line_col("ab", 99), (1, 3));
    assert_eq!(offset_to_line_col("", 0), (1, 1));
}

#[test]
fn test_line_number_from_span() {
    let source = "line1\nline2\nline3";
    assert_eq!(line_number(source, Span::new(0, 5)), 1);
    assert_eq!(line_number(source, Span::new(6, 11)), 2);
    assert_eq!(line_number(source, Span::new(12, 17)), 3);
}

#[test]
fn test_line_offset_table_unicode() {
    let source = "αβγ\nδε";
    let table = LineOffsetTable::build(source);
    assert_eq!(table.offset_to_line_col(source, 2), (1, 2));
    assert_eq!(table.offset_to_line_col(source, 7), (2, 1));
}

#[test]
fn test_line_offset_table_matches_linear_scan() {
    let source = "fn main() {\n  foo();\n\n}\n// tail";
    let table = LineOffsetTable::build(source);
    for offset in 0..u32::try_from(source.len()).unwrap_or(0) {
        assert_eq!(
            table.offset_to_line_col(source, offset),
            offset_to_line_col(source, offset),
            "mismatch at offset {offset}"
        );
    }
}

#[test]
fn test_line_text() {
    let source = "first\r\nsecond\nthird";
    let table = LineOffsetTable::build(source);
    assert_eq!(table.line_count(), 3);
    assert_eq!(table.line_text(source, 1), Some("first"));
    assert_eq!(table.line_text(source, 2), Some("second"));
    assert_eq!(table.line_text(source, 3), Some("third"));
    assert_eq!(table.line_text(source, 4), None);
    assert_eq!(table.line_text(source, 0), None);
}
