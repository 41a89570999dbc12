use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::SourceBuffer;

fn scan(source: &str) -> Vec<RawToken> {
    let buf = SourceBuffer::new(source);
    RawScanner::new(buf.cursor()).collect()
}

fn scan_tags(source: &str) -> Vec<Tag> {
    scan(source).iter().map(|t| t.tag).collect()
}

// --- Property Tests ---

proptest! {
    #[test]
    fn total_len_equals_source_len(source in "\\PC{0,200}") {
        let total: u32 = scan(&source).iter().map(|t| t.len).sum();
        prop_assert_eq!(total as usize, source.len());
    }

    #[test]
    fn every_token_has_positive_length(source in "[ -~\\n\\t]{0,200}") {
        for token in scan(&source) {
            prop_assert!(token.len > 0, "zero-length {:?}", token.tag);
        }
    }

    #[test]
    fn tokens_end_on_char_boundaries(source in "\\PC{0,100}") {
        let mut offset = 0usize;
        for token in scan(&source) {
            offset += token.len as usize;
            prop_assert!(source.is_char_boundary(offset));
        }
    }
}

#[test]
fn test_eof_repeats() {
    let buf = SourceBuffer::new("x");
    let mut scanner = RawScanner::new(buf.cursor());
    assert_eq!(scanner.next_token().tag, Tag::Ident);
    for _ in 0..3 {
        assert_eq!(scanner.next_token(), RawToken { tag: Tag::Eof, len: 0 });
    }
}

#[test]
fn test_all_bytes_produce_tokens() {
    for byte in 1u8..0x80 {
        let source = String::from(char::from(byte));
        let tokens = scan(&source);
        assert!(!tokens.is_empty(), "byte {byte:#x}");
        assert_eq!(tokens.iter().map(|t| t.len).sum::<u32>(), 1);
    }
}

// --- Whitespace & Comments ---

#[test]
fn test_whitespace_and_newlines() {
    assert_eq!(
        scan_tags(" \t\n\r\n\r x"),
        vec![
            Tag::Whitespace,
            Tag::Newline,
            Tag::Newline,
            Tag::Whitespace,
            Tag::Whitespace,
            Tag::Ident,
        ]
    );
}

#[test]
fn test_path_wildcard_splits_slash_star() {
    let buf = SourceBuffer::new("/*;");
    let mut scanner = RawScanner::new(buf.cursor());
    scanner.set_path_wildcard(true);
    assert_eq!(scanner.next_token(), RawToken { tag: Tag::Slash, len: 1 });
    scanner.set_path_wildcard(false);
    assert_eq!(scanner.next_token(), RawToken { tag: Tag::Star, len: 1 });
    assert_eq!(scanner.next_token().tag, Tag::Semicolon);

    assert_eq!(scan_tags("/*;"), vec![Tag::UnterminatedComment]);
}

#[test]
fn test_line_comment_stops_before_newline() {
    let tokens = scan("// hi\nx");
    assert_eq!(tokens[0], RawToken { tag: Tag::LineComment, len: 5 });
    assert_eq!(tokens[1].tag, Tag::Newline);
}

#[test]
fn test_nested_block_comment() {
    let tokens = scan("/* a /* b */ c */x");
    assert_eq!(tokens[0], RawToken { tag: Tag::BlockComment, len: 17 });
    assert_eq!(tokens[1].tag, Tag::Ident);
}

#[test]
fn test_unterminated_block_comment() {
    assert_eq!(
        scan("/* /* */"),
        vec![RawToken { tag: Tag::UnterminatedComment, len: 8 }]
    );
}

#[test]
fn test_slash_alone() {
    assert_eq!(scan_tags("a / b"), vec![Tag::Ident, Tag::Whitespace, Tag::Slash, Tag::Whitespace, Tag::Ident]);
}

// --- Identifiers ---

#[test]
fn test_identifiers() {
    assert_eq!(scan("_foo"), vec![RawToken { tag: Tag::Ident, len: 4 }]);
    assert_eq!(scan("__x1"), vec![RawToken { tag: Tag::Ident, len: 4 }]);
    assert_eq!(scan_tags("_ = f()")[0], Tag::Underscore);
    assert_eq!(scan("Δx"), vec![RawToken { tag: Tag::Ident, len: 3 }]);
}

#[test]
fn test_ext_reference_is_three_tokens() {
    assert_eq!(scan_tags("ext.N"), vec![Tag::Ident, Tag::Dot, Tag::Ident]);
}

// --- Operators ---

#[test]
fn test_compound_operators() {
    assert_eq!(
        scan_tags(":: -> == != <= << && ||"),
        vec![
            Tag::ColonColon,
            Tag::Whitespace,
            Tag::Arrow,
            Tag::Whitespace,
            Tag::EqEq,
            Tag::Whitespace,
            Tag::BangEq,
            Tag::Whitespace,
            Tag::LessEq,
            Tag::Whitespace,
            Tag::Shl,
            Tag::Whitespace,
            Tag::AmpAmp,
            Tag::Whitespace,
            Tag::PipePipe,
        ]
    );
}

#[test]
fn test_greater_is_always_single() {
    assert_eq!(scan_tags(">>="), vec![Tag::Greater, Tag::Greater, Tag::Eq]);
}

#[test]
fn test_invalid_bytes() {
    assert_eq!(scan_tags("$#\\\"?"), vec![Tag::InvalidByte; 5]);
    assert_eq!(scan_tags("a\0b"), vec![Tag::Ident, Tag::InvalidByte, Tag::Ident]);
}

// --- Numbers ---

#[test]
fn test_integer_literals() {
    for source in ["0", "42", "7i", "7u", "0x1F", "0xffu"] {
        assert_eq!(scan(source), vec![RawToken { tag: Tag::Int, len: source.len() as u32 }], "{source}");
    }
}

#[test]
fn test_float_literals() {
    for source in ["1.", "1.5", ".5", "1e3", "1.5e-3", "2f", "1.0h", "0x1.8p3", "0x1p-2f"] {
        assert_eq!(scan(source), vec![RawToken { tag: Tag::Float, len: source.len() as u32 }], "{source}");
    }
}

#[test]
fn test_exponent_needs_digits() {
    assert_eq!(scan_tags("1else"), vec![Tag::Int, Tag::Ident]);
}
