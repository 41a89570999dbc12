//! Link orchestration: root lookup, binding, emission.

use rustc_hash::FxHashMap;
use tracing::{debug, info};
use wesl_diagnostic::{Diagnostic, DiagnosticQueue, SourceLookup};
use wesl_ir::{Conditions, DeclKey, ModulePath, ScopeError};

use crate::binder::bind;
use crate::emitter::emit;
use crate::mangler::{Mangler, UniqueNames};
use crate::registry::Registry;
use crate::source_map::SourceMap;

/// What to link and how.
#[derive(Clone, Debug)]
pub struct LinkConfig {
    /// Module whose declarations seed the output.
    pub root: ModulePath,
    /// Values for `ext.NAME` references.
    pub params: FxHashMap<String, String>,
    /// Values for `@if` condition names. Unknown names are false.
    pub conditions: Conditions,
}

impl LinkConfig {
    pub fn new(root: ModulePath) -> Self {
        LinkConfig {
            root,
            params: FxHashMap::default(),
            conditions: Conditions::new(),
        }
    }

    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_condition(mut self, name: impl Into<String>, value: bool) -> Self {
        self.conditions.set(name, value);
        self
    }
}

/// Result of a successful link. `diagnostics` may still hold errors.
#[derive(Clone, Debug, Default)]
pub struct LinkOutput {
    pub text: String,
    pub source_map: SourceMap,
    /// Sorted by module, then position.
    pub diagnostics: Vec<Diagnostic>,
    /// Reachable global declarations in discovery order.
    pub reachable: Vec<DeclKey>,
}

impl LinkOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Failures that prevent producing any output.
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum LinkError {
    #[error("root module `{0}` is not registered")]
    RootNotFound(ModulePath),
    #[error("malformed scope tree in `{module}`: {error}")]
    ScopeInvariant {
        module: ModulePath,
        #[source]
        error: ScopeError,
    },
}

/// Link `config.root` against every module in `registry`.
pub fn link(registry: &Registry, config: &LinkConfig) -> Result<LinkOutput, LinkError> {
    let root = registry
        .lookup(&config.root)
        .ok_or_else(|| LinkError::RootNotFound(config.root.clone()))?;
    info!(root = %config.root, modules = registry.len(), "linking");

    let bound = bind(registry, root, &config.conditions);
    check_reachable(registry, &bound.reachable)?;

    let mut mangler = Mangler::new(UniqueNames::with_blocked(bound.local_names.iter().cloned()));
    let emitted = emit(
        registry,
        root,
        &bound,
        &mut mangler,
        &config.params,
        &config.conditions,
    );

    let mut queue = DiagnosticQueue::new();
    for diagnostic in bound.diagnostics.iter().chain(&emitted.diagnostics) {
        let source = diagnostic
            .module
            .as_ref()
            .and_then(|path| registry.source(path))
            .unwrap_or("");
        queue.add_with_source(diagnostic.clone(), source);
    }
    debug!(
        errors = queue.error_count(),
        warnings = queue.warning_count(),
        names = mangler.len(),
        "link finished"
    );

    Ok(LinkOutput {
        text: emitted.text,
        source_map: emitted.source_map,
        diagnostics: queue.flush(),
        reachable: bound.reachable,
    })
}

/// Every reachable declaration's scope must hang off its module root.
fn check_reachable(registry: &Registry, reachable: &[DeclKey]) -> Result<(), LinkError> {
    for decl in reachable {
        let module = registry.module(decl.module);
        let opens = module.ident(decl.ident).decl().and_then(|info| info.opens);
        if let Some(scope) = opens {
            module
                .scopes()
                .check_reachable(scope)
                .map_err(|error| LinkError::ScopeInvariant {
                    module: module.path().clone(),
                    error,
                })?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
