//! Parsed modules.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::{
    Condition, Conditions, Element, ElementArena, ElementId, ElementKind, Ident, IdentId,
    ImportStatement, ModulePath, ScopeId, ScopeTree, Span,
};

/// Which module-scope declarations a module exports.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub enum ExportPolicy {
    /// No `export` marker in the module: everything is exported.
    #[default]
    All,
    /// Only the marked declarations are exported.
    Marked(FxHashSet<IdentId>),
}

impl ExportPolicy {
    pub fn exports(&self, decl: IdentId) -> bool {
        match self {
            ExportPolicy::All => true,
            ExportPolicy::Marked(marked) => marked.contains(&decl),
        }
    }
}

/// Parser output that makes up a module's body.
#[derive(Clone, Debug, Default)]
pub struct ModuleParts {
    pub scopes: ScopeTree,
    pub elements: ElementArena,
    pub root_elements: Vec<ElementId>,
    pub imports: Vec<ImportStatement>,
    pub exports: ExportPolicy,
}

/// One parsed source file. Immutable once built.
#[derive(Clone, Debug)]
pub struct Module {
    path: ModulePath,
    source: String,
    scopes: ScopeTree,
    elements: ElementArena,
    root_elements: Vec<ElementId>,
    imports: Vec<ImportStatement>,
    exports: ExportPolicy,
    /// Module-scope declarations by name, in source order.
    globals: FxHashMap<String, SmallVec<[IdentId; 1]>>,
}

impl Module {
    pub fn new(path: ModulePath, source: String, parts: ModuleParts) -> Self {
        let ModuleParts {
            scopes,
            elements,
            root_elements,
            imports,
            exports,
        } = parts;

        let mut globals: FxHashMap<String, SmallVec<[IdentId; 1]>> = FxHashMap::default();
        for decl in scopes.module_decls() {
            globals
                .entry(scopes.ident(decl).name.clone())
                .or_default()
                .push(decl);
        }

        Module {
            path,
            source,
            scopes,
            elements,
            root_elements,
            imports,
            exports,
            globals,
        }
    }

    pub fn path(&self) -> &ModulePath {
        &self.path
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn scopes(&self) -> &ScopeTree {
        &self.scopes
    }

    pub fn elements(&self) -> &ElementArena {
        &self.elements
    }

    /// Top-level elements in source order.
    pub fn root_elements(&self) -> &[ElementId] {
        &self.root_elements
    }

    pub fn imports(&self) -> &[ImportStatement] {
        &self.imports
    }

    pub fn exports(&self) -> &ExportPolicy {
        &self.exports
    }

    #[inline]
    pub fn ident(&self, id: IdentId) -> &Ident {
        self.scopes.ident(id)
    }

    #[inline]
    pub fn element(&self, id: ElementId) -> &Element {
        self.elements.get(id)
    }

    /// Source text covered by `span`. Out-of-range spans yield `""`.
    pub fn text(&self, span: Span) -> &str {
        self.source.get(span.to_range()).unwrap_or("")
    }

    /// The element a declaration identifier names.
    pub fn decl_element(&self, decl: IdentId) -> Option<&Element> {
        self.ident(decl)
            .decl()
            .map(|info| self.elements.get(info.element))
    }

    /// Whether a declaration survives its `@if` condition.
    ///
    /// Only module-scope declarations carry conditions; locals are always
    /// active.
    pub fn decl_active(&self, decl: IdentId, conditions: &Conditions) -> bool {
        let ident = self.ident(decl);
        if !ident.is_global_decl() {
            return ident.decl().is_some();
        }
        self.decl_element(decl)
            .is_some_and(|element| Condition::is_active(element.condition.as_ref(), conditions))
    }

    /// Whether a scope belongs to an active item.
    ///
    /// A scope opened by a declaration follows that declaration; a
    /// `const_assert` scope follows the assertion's condition.
    pub fn scope_active(&self, scope: ScopeId, conditions: &Conditions) -> bool {
        if let Some(owner) = self.scopes.scope(scope).owner {
            return self.decl_active(owner, conditions);
        }
        self.root_elements
            .iter()
            .map(|id| self.elements.get(*id))
            .find(|element| matches!(element.kind, ElementKind::ConstAssert { scope: s } if s == scope))
            .is_none_or(|element| Condition::is_active(element.condition.as_ref(), conditions))
    }

    /// Module-scope declarations named `name`, active or not.
    pub fn globals_named(&self, name: &str) -> impl Iterator<Item = IdentId> + '_ {
        self.globals.get(name).into_iter().flatten().copied()
    }

    /// First active module-scope declaration named `name`.
    pub fn declared(&self, name: &str, conditions: &Conditions) -> Option<IdentId> {
        self.globals_named(name)
            .find(|decl| self.decl_active(*decl, conditions))
    }

    /// First active, exported module-scope declaration named `name`.
    pub fn exported_decl(&self, name: &str, conditions: &Conditions) -> Option<IdentId> {
        self.globals_named(name)
            .find(|decl| self.exports.exports(*decl) && self.decl_active(*decl, conditions))
    }

    /// Active module-scope declarations in source order.
    pub fn active_globals<'a>(
        &'a self,
        conditions: &'a Conditions,
    ) -> impl Iterator<Item = IdentId> + 'a {
        self.scopes
            .module_decls()
            .filter(move |decl| self.decl_active(*decl, conditions))
    }
}
