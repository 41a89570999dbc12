//! Words that never name a declaration.

/// WGSL and WESL keywords. Identifier tokens with these spellings are not
/// recorded as references.
pub fn is_keyword(text: &str) -> bool {
    matches!(
        text,
        "alias"
            | "as"
            | "break"
            | "case"
            | "const"
            | "const_assert"
            | "continue"
            | "continuing"
            | "default"
            | "diagnostic"
            | "discard"
            | "else"
            | "enable"
            | "export"
            | "false"
            | "fn"
            | "for"
            | "if"
            | "import"
            | "let"
            | "loop"
            | "override"
            | "requires"
            | "return"
            | "struct"
            | "switch"
            | "true"
            | "var"
            | "while"
    )
}
