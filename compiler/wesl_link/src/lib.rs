//! WESL linker.
//!
//! Links a root module and the modules it imports into one WGSL text:
//!
//! 1. [`Registry`] holds parsed modules and their flattened imports.
//! 2. [`bind`] resolves every identifier reachable from the root and
//!    records which global declarations the output needs.
//! 3. [`emit`] writes the root source and the reachable declarations,
//!    renaming references through a [`Mangler`] so global names stay
//!    unique.
//!
//! [`link`] runs all three.

mod binder;
mod bindings;
mod emitter;
mod flatten;
mod linker;
mod mangler;
mod registry;
mod source_map;
mod stack;

pub use binder::{bind, BindOutput};
pub use bindings::{Bindings, Resolution};
pub use emitter::{emit, EmitOutput};
pub use flatten::{flatten, FlatImport, FlattenError, Segments};
pub use linker::{link, LinkConfig, LinkError, LinkOutput};
pub use mangler::{Mangler, UniqueNames};
pub use registry::{ImportError, ModuleImport, Registry, RegistryError};
pub use source_map::{SourceMap, SourceMapEntry, SourcePosition};
