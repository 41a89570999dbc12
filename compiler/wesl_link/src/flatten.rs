//! Import path flattening.
//!
//! Expands one [`ImportTree`] into alternative-free [`FlatImport`]s. Each
//! flat import pairs the path a module uses locally (`import_path`) with the
//! path of what it names (`module_path`):
//!
//! ```text
//! import package::lights::{Light, shade as shadeLight};
//!   ["Light"]      -> ["package", "lights", "Light"]
//!   ["shadeLight"] -> ["package", "lights", "shade"]
//! ```
//!
//! Wildcards are not expanded here; the binder matches them against the
//! target module's exports.

use smallvec::{smallvec, SmallVec};
use wesl_ir::{ImportTree, PathSegment, Span};

/// Path segments, usually short.
pub type Segments = SmallVec<[String; 4]>;

/// One flattened import.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FlatImport {
    /// Path as written at use sites in the importing module: the imported
    /// name, or a wildcard's alias. Empty for a plain wildcard.
    pub import_path: Segments,
    /// Path of the imported module or symbol, possibly relative.
    pub module_path: Segments,
    /// `module_path` names a module whose exports are all imported.
    pub wildcard: bool,
    /// Span of the `import` statement.
    pub span: Span,
}

impl FlatImport {
    /// Local alias this import introduces for a single symbol, if it
    /// renames one (`import a::foo as bar;` introduces `bar`).
    pub fn rename(&self) -> Option<&str> {
        if self.wildcard {
            return None;
        }
        let local = self.import_path.last()?;
        let target = self.module_path.last()?;
        (local != target).then_some(local.as_str())
    }
}

/// Malformed import trees.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, thiserror::Error)]
pub enum FlattenError {
    #[error("import path is empty")]
    EmptyPath,
    #[error("`*` must be the last segment of an import path")]
    WildcardNotLast,
}

/// Expand `tree` into flat imports, in source order.
pub fn flatten(tree: &ImportTree, span: Span) -> Result<Vec<FlatImport>, FlattenError> {
    let mut out = Vec::new();
    let remaining: Vec<&PathSegment> = tree.segments.iter().collect();
    expand(&remaining, Segments::new(), span, &mut out)?;
    Ok(out)
}

/// Only the last segment of an import is visible at use sites, so the
/// import path is built when a run ends rather than accumulated.
fn expand(
    remaining: &[&PathSegment],
    module_path: Segments,
    span: Span,
    out: &mut Vec<FlatImport>,
) -> Result<(), FlattenError> {
    let Some((first, rest)) = remaining.split_first() else {
        return Err(FlattenError::EmptyPath);
    };

    match first {
        PathSegment::Simple { name, alias } => {
            let mut module_path = module_path;
            module_path.push(name.clone());
            if rest.is_empty() {
                let local = alias.as_ref().unwrap_or(name).clone();
                out.push(FlatImport {
                    import_path: smallvec![local],
                    module_path,
                    wildcard: false,
                    span,
                });
                Ok(())
            } else {
                expand(rest, module_path, span, out)
            }
        }
        PathSegment::List(alternatives) => {
            if alternatives.is_empty() {
                return Err(FlattenError::EmptyPath);
            }
            for alternative in alternatives {
                let spliced: Vec<&PathSegment> =
                    alternative.segments.iter().chain(rest.iter().copied()).collect();
                expand(&spliced, module_path.clone(), span, out)?;
            }
            Ok(())
        }
        PathSegment::Tree(inner) => {
            let spliced: Vec<&PathSegment> =
                inner.segments.iter().chain(rest.iter().copied()).collect();
            expand(&spliced, module_path, span, out)
        }
        PathSegment::Wildcard { alias } => {
            if !rest.is_empty() {
                return Err(FlattenError::WildcardNotLast);
            }
            out.push(FlatImport {
                import_path: alias.iter().cloned().collect(),
                module_path,
                wildcard: true,
                span,
            });
            Ok(())
        }
    }
}
