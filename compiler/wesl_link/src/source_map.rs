//! Output → source position mapping.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use wesl_ir::{ModulePath, Span};

/// One run of output text and where it came from.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SourceMapEntry {
    pub output: Span,
    pub module: ModulePath,
    pub source: Span,
}

/// A position in an input module.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SourcePosition<'a> {
    pub module: &'a ModulePath,
    pub offset: u32,
}

/// Entries in output order, non-overlapping.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SourceMap {
    entries: Vec<SourceMapEntry>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Entries must be pushed in output order.
    pub fn push(&mut self, entry: SourceMapEntry) {
        debug_assert!(
            self.entries
                .last()
                .is_none_or(|last| last.output.end <= entry.output.start),
            "source map entries out of order"
        );
        if !entry.output.is_empty() {
            self.entries.push(entry);
        }
    }

    pub fn entries(&self) -> &[SourceMapEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Original position of the output byte at `offset`.
    ///
    /// Inside a renamed identifier the position is clamped to the end of
    /// the original spelling.
    pub fn lookup(&self, offset: u32) -> Option<SourcePosition<'_>> {
        let index = self.entries.partition_point(|e| e.output.end <= offset);
        let entry = self.entries.get(index)?;
        if !entry.output.contains(offset) {
            return None;
        }
        let delta = (offset - entry.output.start).min(entry.source.len().saturating_sub(1));
        Some(SourcePosition {
            module: &entry.module,
            offset: entry.source.start + delta,
        })
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
