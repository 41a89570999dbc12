//! Canonical module paths.
//!
//! A module path is a `::`-joined sequence of segments such as
//! `package::util::math`. The first segment names the package. Import paths
//! may start with relative segments (`.`/`self`, `..`/`super`) or the
//! `package` keyword; [`ModulePath::resolve`] turns those into absolute
//! paths against the importing module.

use std::fmt;

use smallvec::SmallVec;

/// Segment naming the importing module itself.
const SELF_SEGMENTS: [&str; 2] = [".", "self"];

/// Segment naming the importing module's parent.
const SUPER_SEGMENTS: [&str; 2] = ["..", "super"];

/// Segment naming the importing module's root package.
const PACKAGE_SEGMENT: &str = "package";

/// Absolute path of a module in the registry.
#[derive(Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ModulePath {
    segments: SmallVec<[String; 4]>,
}

impl ModulePath {
    /// Create a path from segments.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ModulePath {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a `::`-separated path. Empty segments are dropped.
    pub fn parse(text: &str) -> Self {
        ModulePath {
            segments: text
                .split("::")
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The package segment (first segment), if any.
    pub fn package(&self) -> Option<&str> {
        self.segments.first().map(String::as_str)
    }

    /// The last segment, if any.
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Path with one more segment appended.
    #[must_use]
    pub fn join(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        ModulePath { segments }
    }

    /// Path without its last segment, or `None` for an empty path.
    pub fn parent(&self) -> Option<Self> {
        let (_, init) = self.segments.split_last()?;
        Some(ModulePath {
            segments: init.iter().cloned().collect(),
        })
    }

    /// Split into the containing module path and the final symbol.
    pub fn split_symbol(&self) -> Option<(ModulePath, &str)> {
        let (last, init) = self.segments.split_last()?;
        Some((
            ModulePath {
                segments: init.iter().cloned().collect(),
            },
            last.as_str(),
        ))
    }

    /// Whether `segments` begins with a relative or `package` segment.
    pub fn is_relative(segments: &[String]) -> bool {
        segments.first().is_some_and(|first| {
            SELF_SEGMENTS.contains(&first.as_str())
                || SUPER_SEGMENTS.contains(&first.as_str())
                || first == PACKAGE_SEGMENT
        })
    }

    /// Resolve an import path against this (importing) module's path.
    ///
    /// - `.`/`self` keep the importer's path
    /// - each leading `..`/`super` pops one segment from the importer's path
    /// - a leading `package` is replaced by the importer's package segment
    /// - anything else is already absolute
    ///
    /// Returns `None` when `..` climbs past the package root.
    pub fn resolve(&self, segments: &[String]) -> Option<ModulePath> {
        let Some(first) = segments.first() else {
            return Some(ModulePath::default());
        };

        if first == PACKAGE_SEGMENT {
            let mut resolved = ModulePath::new(self.package());
            resolved.segments.extend(segments[1..].iter().cloned());
            return Some(resolved);
        }

        if SELF_SEGMENTS.contains(&first.as_str()) {
            let mut resolved = self.clone();
            resolved.segments.extend(segments[1..].iter().cloned());
            return Some(resolved);
        }

        let supers = segments
            .iter()
            .take_while(|s| SUPER_SEGMENTS.contains(&s.as_str()))
            .count();
        if supers == 0 {
            return Some(ModulePath::new(segments.iter().cloned()));
        }

        if supers >= self.segments.len() {
            return None;
        }
        let keep = self.segments.len() - supers;
        let mut resolved = ModulePath {
            segments: self.segments[..keep].iter().cloned().collect(),
        };
        resolved.segments.extend(segments[supers..].iter().cloned());
        Some(resolved)
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("::")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl fmt::Debug for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModulePath({self})")
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
