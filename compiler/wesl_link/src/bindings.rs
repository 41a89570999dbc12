//! Per-link binding table.

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;
use wesl_ir::{DeclKey, RefKey};

/// What a reference resolved to.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Resolution {
    /// A declaration, local or global, in some module.
    Decl(DeclKey),
    /// A WGSL predeclared name. Emitted unchanged.
    Std,
    /// An `ext.NAME` parameter, substituted at emission.
    External(String),
}

/// Reference → resolution. Unresolved references have no entry.
#[derive(Clone, Debug, Default)]
pub struct Bindings {
    map: FxHashMap<RefKey, Resolution>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a binding. The first write wins.
    pub fn insert(&mut self, reference: RefKey, resolution: Resolution) {
        match self.map.entry(reference) {
            Entry::Occupied(existing) => debug_assert_eq!(
                existing.get(),
                &resolution,
                "reference {reference:?} rebound to a different target"
            ),
            Entry::Vacant(slot) => {
                slot.insert(resolution);
            }
        }
    }

    #[inline]
    pub fn get(&self, reference: RefKey) -> Option<&Resolution> {
        self.map.get(&reference)
    }

    pub fn contains(&self, reference: RefKey) -> bool {
        self.map.contains_key(&reference)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RefKey, &Resolution)> {
        self.map.iter().map(|(key, resolution)| (*key, resolution))
    }
}
