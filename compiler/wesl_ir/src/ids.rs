//! Typed arena indices.
//!
//! Every arena in the IR (scopes, identifiers, elements) and the module
//! registry hand out `u32` indices wrapped in a newtype, so an `IdentId` can
//! never be confused with a `ScopeId`.

use std::fmt;

macro_rules! define_index {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Create from a raw index.
            #[inline]
            pub const fn new(index: u32) -> Self {
                $name(index)
            }

            /// Create from an arena length.
            ///
            /// # Panics
            /// Panics if the arena has grown past `u32::MAX` entries.
            #[inline]
            pub fn from_usize(index: usize) -> Self {
                match u32::try_from(index) {
                    Ok(raw) => $name(raw),
                    Err(_) => panic!(concat!(stringify!($name), " overflow: {}"), index),
                }
            }

            /// Get the index into the arena.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            /// Get the raw u32 value.
            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}

define_index!(
    /// Index of a module in a registry.
    ModuleId
);
define_index!(
    /// Index of a scope in a module's scope tree.
    ScopeId
);
define_index!(
    /// Index of an identifier in a module's scope tree.
    IdentId
);
define_index!(
    /// Index of an element in a module's element arena.
    ElementId
);

/// An identifier qualified by the module that owns it.
///
/// Identity of declarations and references across the whole registry.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdentKey {
    pub module: ModuleId,
    pub ident: IdentId,
}

impl IdentKey {
    #[inline]
    pub const fn new(module: ModuleId, ident: IdentId) -> Self {
        IdentKey { module, ident }
    }
}

/// Key of a declaration identifier.
pub type DeclKey = IdentKey;

/// Key of a reference identifier.
pub type RefKey = IdentKey;

/// A scope qualified by the module that owns it.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct ScopeKey {
    pub module: ModuleId,
    pub scope: ScopeId,
}

impl ScopeKey {
    #[inline]
    pub const fn new(module: ModuleId, scope: ScopeId) -> Self {
        ScopeKey { module, scope }
    }
}
