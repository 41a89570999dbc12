//! Import segment trees.
//!
//! One `import` statement produces one [`ImportTree`]. Grouped imports
//! (`a::{b, c as d}`) nest further trees inside a [`PathSegment::List`].

use std::fmt;

use crate::{Condition, ElementId, Span};

/// A sequence of path segments.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct ImportTree {
    pub segments: Vec<PathSegment>,
}

/// One segment of an import path.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum PathSegment {
    /// `name` or `name as alias`.
    Simple { name: String, alias: Option<String> },
    /// `{a, b as c}`: each alternative continues the accumulated prefix.
    List(Vec<ImportTree>),
    /// `*` or `* as alias`.
    Wildcard { alias: Option<String> },
    /// Parenthesized sub-path spliced in place.
    Tree(ImportTree),
}

impl PathSegment {
    pub fn simple(name: impl Into<String>) -> Self {
        PathSegment::Simple {
            name: name.into(),
            alias: None,
        }
    }

    pub fn renamed(name: impl Into<String>, alias: impl Into<String>) -> Self {
        PathSegment::Simple {
            name: name.into(),
            alias: Some(alias.into()),
        }
    }
}

impl ImportTree {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        ImportTree { segments }
    }

    /// Tree of simple segments from a `::`-separated path.
    pub fn from_path(path: &str) -> Self {
        ImportTree {
            segments: path.split("::").map(PathSegment::simple).collect(),
        }
    }

    /// Builder: append a segment.
    #[must_use]
    pub fn then(mut self, segment: PathSegment) -> Self {
        self.segments.push(segment);
        self
    }
}

impl fmt::Display for ImportTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("::")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Simple { name, alias: None } => f.write_str(name),
            PathSegment::Simple {
                name,
                alias: Some(alias),
            } => write!(f, "{name} as {alias}"),
            PathSegment::List(items) => {
                f.write_str("{")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("}")
            }
            PathSegment::Wildcard { alias: None } => f.write_str("*"),
            PathSegment::Wildcard { alias: Some(alias) } => write!(f, "* as {alias}"),
            PathSegment::Tree(tree) => write!(f, "({tree})"),
        }
    }
}

/// A parsed `import` statement.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ImportStatement {
    pub tree: ImportTree,
    pub span: Span,
    /// The statement's `Import` element, elided on emission.
    pub element: ElementId,
    pub condition: Option<Condition>,
}
