//! Module registry.
//!
//! Holds every parsed module of a link by canonical path. Modules are
//! immutable once registered, so a registry can be shared by any number of
//! concurrent link calls.
//!
//! Flattening a module's imports depends only on the module, so it happens
//! once at registration.

use rustc_hash::FxHashMap;
use tracing::debug;
use wesl_diagnostic::SourceLookup;
use wesl_ir::{Condition, Module, ModuleId, ModulePath, Span};

use crate::flatten::{flatten, FlatImport, FlattenError};

/// A flattened import with the condition of its statement.
#[derive(Clone, Debug)]
pub struct ModuleImport {
    pub flat: FlatImport,
    pub condition: Option<Condition>,
}

/// An import statement that failed to flatten.
#[derive(Clone, Debug)]
pub struct ImportError {
    pub error: FlattenError,
    pub span: Span,
    pub condition: Option<Condition>,
}

#[derive(Clone, Debug)]
struct Entry {
    module: Module,
    imports: Vec<ModuleImport>,
    import_errors: Vec<ImportError>,
}

/// Fatal registration errors.
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("module `{0}` is already registered")]
    DuplicateModule(ModulePath),
}

/// All modules of a link, by path.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    entries: Vec<Entry>,
    by_path: FxHashMap<ModulePath, ModuleId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module under its own path.
    pub fn register(&mut self, module: Module) -> Result<ModuleId, RegistryError> {
        if self.by_path.contains_key(module.path()) {
            return Err(RegistryError::DuplicateModule(module.path().clone()));
        }

        let mut imports = Vec::new();
        let mut import_errors = Vec::new();
        for statement in module.imports() {
            match flatten(&statement.tree, statement.span) {
                Ok(flat) => imports.extend(flat.into_iter().map(|flat| ModuleImport {
                    flat,
                    condition: statement.condition.clone(),
                })),
                Err(error) => import_errors.push(ImportError {
                    error,
                    span: statement.span,
                    condition: statement.condition.clone(),
                }),
            }
        }

        let id = ModuleId::from_usize(self.entries.len());
        debug!(module = %module.path(), imports = imports.len(), "registered module");
        self.by_path.insert(module.path().clone(), id);
        self.entries.push(Entry {
            module,
            imports,
            import_errors,
        });
        Ok(id)
    }

    pub fn lookup(&self, path: &ModulePath) -> Option<ModuleId> {
        self.by_path.get(path).copied()
    }

    #[inline]
    pub fn module(&self, id: ModuleId) -> &Module {
        &self.entries[id.index()].module
    }

    /// Flattened imports of a module, in source order.
    pub fn imports(&self, id: ModuleId) -> &[ModuleImport] {
        &self.entries[id.index()].imports
    }

    /// Import statements of a module that could not be flattened.
    pub fn import_errors(&self, id: ModuleId) -> &[ImportError] {
        &self.entries[id.index()].import_errors
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Modules in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (ModuleId, &Module)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (ModuleId::from_usize(i), &entry.module))
    }

    /// Resolve a possibly relative path against `importer`.
    ///
    /// Returns `None` if `..` climbs past the package root.
    pub fn resolve_relative(&self, importer: ModuleId, segments: &[String]) -> Option<ModulePath> {
        self.module(importer).path().resolve(segments)
    }

    /// Resolve a possibly relative module path to a registered module.
    pub fn resolve_module(&self, importer: ModuleId, segments: &[String]) -> Option<ModuleId> {
        self.resolve_relative(importer, segments)
            .and_then(|path| self.lookup(&path))
    }
}

impl SourceLookup for Registry {
    fn source(&self, module: &ModulePath) -> Option<&str> {
        self.lookup(module).map(|id| self.module(id).source())
    }
}
