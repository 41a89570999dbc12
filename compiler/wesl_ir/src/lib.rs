//! WESL IR - the data model shared by the parser and the linker.
//!
//! This crate contains the core data structures of the WESL linker:
//! - Spans for source locations
//! - Typed indices for modules, scopes, identifiers and elements
//! - Module paths (`package::util::math`)
//! - The lexical scope tree with declaration/reference identifiers
//! - The element tree used for text emission
//! - Import segment trees
//! - `@if` conditions
//!
//! # Design Philosophy
//!
//! - **Flatten Everything**: scopes, identifiers and elements live in
//!   per-module arenas and refer to each other by `u32` index.
//! - **Immutable After Parse**: a [`Module`] is never mutated once built, so a
//!   registry of modules can be shared by several link operations. Facts
//!   discovered while linking (bindings, mangled names) live in side tables
//!   keyed by [`IdentKey`].

pub mod builtins;
mod condition;
mod element;
mod ids;
mod import;
mod module;
mod module_path;
mod scope;
mod span;

pub use condition::{Condition, Conditions};
pub use element::{Element, ElementArena, ElementKind};
pub use ids::{DeclKey, ElementId, IdentId, IdentKey, ModuleId, RefKey, ScopeId, ScopeKey};
pub use import::{ImportStatement, ImportTree, PathSegment};
pub use module::{ExportPolicy, Module, ModuleParts};
pub use module_path::ModulePath;
pub use scope::{
    DeclInfo, Ident, IdentKind, Scope, ScopeError, ScopeItem, ScopeKind, ScopeSnapshot, ScopeTree,
};
pub use span::Span;
