use super::*;

#[test]
fn test_sentinel_and_padding() {
    let buf = SourceBuffer::new("fn main() {}");
    assert_eq!(buf.len(), 12);
    assert_eq!(buf.as_bytes(), b"fn main() {}");
    assert_eq!(buf.buf.len() % CACHE_LINE, 0);
    assert!(buf.buf[12..].iter().all(|&b| b == 0));
}

#[test]
fn test_exact_cache_line_gets_extra_line() {
    let source = "a".repeat(CACHE_LINE);
    let buf = SourceBuffer::new(&source);
    assert_eq!(buf.buf.len(), CACHE_LINE * 2);
    assert_eq!(buf.buf[CACHE_LINE], 0);
}

#[test]
fn test_empty_source() {
    let buf = SourceBuffer::new("");
    assert!(buf.is_empty());
    assert_eq!(buf.buf.len(), CACHE_LINE);
    assert!(buf.cursor().is_eof());
}
