//! Output names for global declarations.
//!
//! Names are assigned lazily, the first time the emitter writes a
//! declaration or a reference to it, so dead declarations never take a
//! name. The first declaration to ask for a name gets it verbatim; later
//! ones get a numeric suffix.

use rustc_hash::{FxHashMap, FxHashSet};
use wesl_ir::DeclKey;

/// Names taken in one output.
#[derive(Clone, Debug, Default)]
pub struct UniqueNames {
    used: FxHashSet<String>,
    /// Function-local names. Suffixed candidates and aliases avoid them.
    blocked: FxHashSet<String>,
}

impl UniqueNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// A context whose suffixed names avoid `blocked`.
    pub fn with_blocked(blocked: impl IntoIterator<Item = String>) -> Self {
        UniqueNames {
            used: FxHashSet::default(),
            blocked: blocked.into_iter().collect(),
        }
    }

    pub fn is_used(&self, name: &str) -> bool {
        self.used.contains(name)
    }

    /// Take `proposed`, or the first free `proposed0`, `proposed1`, ...
    pub fn reserve(&mut self, proposed: &str) -> String {
        if self.used.insert(proposed.to_owned()) {
            return proposed.to_owned();
        }
        self.reserve_suffixed(proposed)
    }

    /// Like [`reserve`](Self::reserve), but `proposed` itself must also
    /// avoid the blocked names.
    ///
    /// Aliases from renaming imports are new spellings, so a function-local
    /// of the same name in the declaration's module would capture them.
    pub fn reserve_alias(&mut self, proposed: &str) -> String {
        if !self.blocked.contains(proposed) && self.used.insert(proposed.to_owned()) {
            return proposed.to_owned();
        }
        self.reserve_suffixed(proposed)
    }

    fn reserve_suffixed(&mut self, proposed: &str) -> String {
        let mut suffix = 0u64;
        loop {
            let candidate = format!("{proposed}{suffix}");
            if !self.used.contains(&candidate) && !self.blocked.contains(&candidate) {
                self.used.insert(candidate.clone());
                return candidate;
            }
            suffix += 1;
        }
    }
}

/// Declaration → output name, written once per declaration.
#[derive(Clone, Debug, Default)]
pub struct Mangler {
    names: UniqueNames,
    assigned: FxHashMap<DeclKey, String>,
}

impl Mangler {
    pub fn new(names: UniqueNames) -> Self {
        Mangler {
            names,
            assigned: FxHashMap::default(),
        }
    }

    /// Output name of `decl`, assigning one from `proposed` on first use.
    pub fn unique_name(&mut self, decl: DeclKey, proposed: &str) -> &str {
        let names = &mut self.names;
        self.assigned
            .entry(decl)
            .or_insert_with(|| names.reserve(proposed))
    }

    /// Output name of `decl` when it was first reached through a renaming
    /// import as `alias`.
    pub fn unique_alias(&mut self, decl: DeclKey, alias: &str) -> &str {
        let names = &mut self.names;
        self.assigned
            .entry(decl)
            .or_insert_with(|| names.reserve_alias(alias))
    }

    /// Name already assigned to `decl`.
    pub fn get(&self, decl: DeclKey) -> Option<&str> {
        self.assigned.get(&decl).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }

    /// Every assignment, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (DeclKey, &str)> {
        self.assigned.iter().map(|(decl, name)| (*decl, name.as_str()))
    }
}
