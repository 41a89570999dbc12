use pretty_assertions::assert_eq;

use super::*;

fn tags(source: &str) -> Vec<Tag> {
    lex(source).iter().map(|t| t.tag).collect()
}

fn texts(source: &str) -> Vec<&str> {
    lex(source)
        .iter()
        .map(|t| &source[t.span.to_range()])
        .collect()
}

#[test]
fn test_function_header() {
    assert_eq!(
        tags("fn main() -> vec4f {"),
        vec![
            Tag::Ident,
            Tag::Ident,
            Tag::LeftParen,
            Tag::RightParen,
            Tag::Arrow,
            Tag::Ident,
            Tag::LeftBrace,
            Tag::Eof,
        ]
    );
}

#[test]
fn test_trivia_is_dropped() {
    let source = "a // line\n/* block /* nested */ */ b";
    assert_eq!(texts(source), vec!["a", "b", ""]);
}

#[test]
fn test_import_path() {
    let source = "import package::util::{a, b as c};";
    assert_eq!(
        texts(source),
        vec![
            "import", "package", "::", "util", "::", "{", "a", ",", "b", "as", "c", "}", ";", ""
        ]
    );
}

#[test]
fn test_slash_wildcard_in_import_path() {
    let source = "import ../util/*;\nimport a/* as b;\n/* x */ c/*d*/";
    assert_eq!(
        texts(source),
        vec![
            "import", ".", ".", "/", "util", "/", "*", ";", "import", "a", "/", "*", "as", "b", ";",
            "c", ""
        ]
    );
}

#[test]
fn test_comment_after_import_path_segment_needs_space() {
    assert_eq!(texts("import a /* note */;"), vec!["import", "a", ";", ""]);
}

#[test]
fn test_error_tokens_are_kept() {
    let list = lex("a $ b /* open");
    let errors: Vec<_> = list.errors().map(|t| t.tag).collect();
    assert_eq!(errors, vec![Tag::InvalidByte, Tag::UnterminatedComment]);
    assert_eq!(list.eof().tag, Tag::Eof);
    assert_eq!(list.eof().span, Span::new(13, 13));
}

#[test]
fn test_empty_source() {
    let list = lex("  \n ");
    assert!(list.is_empty());
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].tag, Tag::Eof);
}

#[test]
fn test_template_closers_split() {
    assert_eq!(
        tags("array<vec2<f32>>"),
        vec![
            Tag::Ident,
            Tag::Less,
            Tag::Ident,
            Tag::Less,
            Tag::Ident,
            Tag::Greater,
            Tag::Greater,
            Tag::Eof,
        ]
    );
}
