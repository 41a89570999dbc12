//! Identifier binding.
//!
//! The binder walks scope trees starting at the root module and resolves
//! every reference it meets to a declaration, in this order:
//!
//! 1. WGSL predeclared names bind to [`Resolution::Std`]
//! 2. `ext.NAME` binds to [`Resolution::External`]
//! 3. lexical lookup in the reference's own module
//! 4. the module's imports, first matching import wins
//! 5. a multi-segment name as a fully qualified path
//!
//! Resolving a reference to a global declaration in another module is what
//! makes that declaration reachable: the binder queues it and later walks
//! the scope the declaration opens. Reachability and binding are therefore
//! a single pass. Each scope is walked at most once, which is what makes
//! mutually recursive declarations terminate.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use tracing::{debug, trace};
use wesl_diagnostic::{self as diag, Diagnostic};
use wesl_ir::{
    builtins, Condition, Conditions, DeclKey, IdentId, IdentKind, Module, ModuleId, RefKey,
    ScopeId, ScopeItem, ScopeKey, ScopeKind, ScopeTree, Span,
};

use crate::bindings::{Bindings, Resolution};
use crate::flatten::FlatImport;
use crate::registry::Registry;
use crate::stack::ensure_sufficient_stack;

/// Everything one binding pass found out.
#[derive(Clone, Debug, Default)]
pub struct BindOutput {
    pub bindings: Bindings,
    /// Reachable global declarations in discovery order. Active root
    /// declarations come first, in source order.
    pub reachable: Vec<DeclKey>,
    /// Output names requested by renaming imports, for declarations first
    /// reached through one.
    pub aliases: FxHashMap<DeclKey, String>,
    /// Names of every local declaration walked.
    pub local_names: FxHashSet<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl BindOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Bind every reachable reference starting from `root`.
pub fn bind(registry: &Registry, root: ModuleId, conditions: &Conditions) -> BindOutput {
    let mut binder = Binder::new(registry, conditions);
    let module = registry.module(root);

    for decl in module.active_globals(conditions) {
        binder.discover(DeclKey::new(root, decl), None);
    }
    binder.bind_scope(root, ScopeTree::ROOT);

    debug!(
        module = %module.path(),
        reachable = binder.reachable.len(),
        bindings = binder.bindings.len(),
        diagnostics = binder.diagnostics.len(),
        "bound identifiers"
    );
    BindOutput {
        bindings: binder.bindings,
        reachable: binder.reachable,
        aliases: binder.aliases,
        local_names: binder.local_names,
        diagnostics: binder.diagnostics,
    }
}

/// A declaration found through an import or a qualified path.
struct Found<'r> {
    decl: DeclKey,
    /// Local name given by a renaming import.
    alias: Option<&'r str>,
}

/// Why a non-local lookup failed.
enum LookupError {
    /// No import matched and the name is not a qualified path.
    NoMatch,
    /// The matching import was reported already.
    Reported,
    /// A qualified path names no registered module.
    UnknownModule(String),
    /// The module declares the symbol without exporting it.
    NotExported { module: ModuleId, symbol: String },
    /// The module neither declares nor re-exports the symbol.
    Missing { module: ModuleId, symbol: String },
}

struct Binder<'r> {
    registry: &'r Registry,
    conditions: &'r Conditions,
    bindings: Bindings,
    known: FxHashSet<DeclKey>,
    reachable: Vec<DeclKey>,
    aliases: FxHashMap<DeclKey, String>,
    visited: FxHashSet<ScopeKey>,
    /// Modules whose import errors were reported.
    entered: FxHashSet<ModuleId>,
    /// Import statements already reported as unknown.
    reported: FxHashSet<(ModuleId, Span)>,
    /// (module, symbol) lookups on the current re-export chain.
    chain: SmallVec<[(ModuleId, String); 4]>,
    local_names: FxHashSet<String>,
    diagnostics: Vec<Diagnostic>,
}

impl<'r> Binder<'r> {
    fn new(registry: &'r Registry, conditions: &'r Conditions) -> Self {
        Binder {
            registry,
            conditions,
            bindings: Bindings::new(),
            known: FxHashSet::default(),
            reachable: Vec::new(),
            aliases: FxHashMap::default(),
            visited: FxHashSet::default(),
            entered: FxHashSet::default(),
            reported: FxHashSet::default(),
            chain: SmallVec::new(),
            local_names: FxHashSet::default(),
            diagnostics: Vec::new(),
        }
    }

    /// Record a global declaration as reachable. Returns it if it was new.
    fn discover(&mut self, decl: DeclKey, alias: Option<&str>) -> Option<DeclKey> {
        let registry = self.registry;
        let ident = registry.module(decl.module).ident(decl.ident);
        if !ident.is_global_decl() || !self.known.insert(decl) {
            return None;
        }
        if let Some(alias) = alias {
            self.aliases.insert(decl, alias.to_owned());
        }
        trace!(decl = %ident.name, module = decl.module.raw(), "discovered declaration");
        self.reachable.push(decl);
        Some(decl)
    }

    fn bind_scope(&mut self, module_id: ModuleId, scope: ScopeId) {
        if !self.visited.insert(ScopeKey::new(module_id, scope)) {
            return;
        }
        self.enter_module(module_id);

        let registry = self.registry;
        let module = registry.module(module_id);
        let tree = module.scopes();
        let current = tree.scope(scope);

        let mut discovered: SmallVec<[DeclKey; 4]> = SmallVec::new();
        for item in &current.items {
            let ScopeItem::Ident(id) = *item else {
                continue;
            };
            let ident = tree.ident(id);
            match ident.kind {
                IdentKind::Ref => discovered.extend(self.bind_ref(module_id, module, id)),
                IdentKind::Decl(info) if !info.global => {
                    self.local_names.insert(ident.name.clone());
                }
                IdentKind::Decl(_) => {}
            }
        }

        for child in tree.children(scope) {
            if current.kind == ScopeKind::Module && !module.scope_active(child, self.conditions) {
                continue;
            }
            ensure_sufficient_stack(|| self.bind_scope(module_id, child));
        }

        for decl in discovered {
            let opens = registry
                .module(decl.module)
                .ident(decl.ident)
                .decl()
                .and_then(|info| info.opens);
            if let Some(opens) = opens {
                ensure_sufficient_stack(|| self.bind_scope(decl.module, opens));
            }
        }
    }

    /// Report the module's broken imports the first time it is seen: those
    /// that could not be flattened and those naming no registered module,
    /// whether or not anything uses them.
    fn enter_module(&mut self, module_id: ModuleId) {
        if !self.entered.insert(module_id) {
            return;
        }
        let registry = self.registry;
        let path = registry.module(module_id).path();
        for error in registry.import_errors(module_id) {
            if Condition::is_active(error.condition.as_ref(), self.conditions) {
                self.diagnostics.push(
                    diag::malformed_import(error.span, &error.error.to_string())
                        .in_module(path.clone()),
                );
            }
        }

        for import in registry.imports(module_id) {
            if !Condition::is_active(import.condition.as_ref(), self.conditions) {
                continue;
            }
            let flat = &import.flat;
            let module_exists =
                |segments: &[String]| registry.resolve_module(module_id, segments).is_some();
            // A non-wildcard path names either a module or a symbol in its parent.
            let found = module_exists(flat.module_path.as_slice())
                || (!flat.wildcard
                    && flat
                        .module_path
                        .split_last()
                        .is_some_and(|(_, parent)| module_exists(parent)));
            if !found {
                self.report_unknown_import(module_id, flat);
            }
        }
    }

    /// Bind one reference. Returns a newly discovered global declaration.
    fn bind_ref(&mut self, module_id: ModuleId, module: &'r Module, id: IdentId) -> Option<DeclKey> {
        let key = RefKey::new(module_id, id);
        if self.bindings.contains(key) {
            return None;
        }
        let ident = module.ident(id);
        let name = ident.name.as_str();

        if builtins::is_builtin(name) {
            self.bindings.insert(key, Resolution::Std);
            return None;
        }
        if let Some(param) = name.strip_prefix("ext.") {
            self.bindings.insert(key, Resolution::External(param.to_owned()));
            return None;
        }

        let conditions = self.conditions;
        let local = module
            .scopes()
            .resolve_local(id, |decl| module.decl_active(decl, conditions));
        if let Some(decl) = local {
            let decl = DeclKey::new(module_id, decl);
            self.bindings.insert(key, Resolution::Decl(decl));
            return self.discover(decl, None);
        }

        match self.resolve_import(module_id, name) {
            Ok(found) => {
                trace!(reference = name, module = %module.path(), "bound through import");
                self.bindings.insert(key, Resolution::Decl(found.decl));
                self.discover(found.decl, found.alias)
            }
            Err(error) => {
                self.report(module, ident.span, name, error);
                None
            }
        }
    }

    /// Look `name` up through the imports of `module_id`, then as a fully
    /// qualified path.
    fn resolve_import(&mut self, module_id: ModuleId, name: &str) -> Result<Found<'r>, LookupError> {
        let registry = self.registry;
        let segments: SmallVec<[&str; 4]> = name.split("::").collect();

        for import in registry.imports(module_id) {
            if !Condition::is_active(import.condition.as_ref(), self.conditions) {
                continue;
            }
            let flat = &import.flat;
            let Some(suffix) = strip_prefix(&segments, &flat.import_path) else {
                continue;
            };

            if flat.wildcard {
                let [symbol] = suffix else {
                    continue;
                };
                let Some(target) = registry.resolve_module(module_id, &flat.module_path) else {
                    self.report_unknown_import(module_id, flat);
                    continue;
                };
                match self.find_export(target, symbol) {
                    Ok(decl) => return Ok(Found { decl, alias: None }),
                    Err(_) => continue,
                }
            }

            let path: Vec<String> = flat
                .module_path
                .iter()
                .cloned()
                .chain(suffix.iter().map(|s| (*s).to_owned()))
                .collect();
            let alias = if suffix.is_empty() { flat.rename() } else { None };
            return match self.resolve_path(module_id, &path) {
                Ok(decl) => Ok(Found { decl, alias }),
                Err(LookupError::UnknownModule(_)) => {
                    self.report_unknown_import(module_id, flat);
                    Err(LookupError::Reported)
                }
                Err(error) => Err(error),
            };
        }

        if segments.len() > 1 {
            let path: Vec<String> = segments.iter().map(|s| (*s).to_owned()).collect();
            return self
                .resolve_path(module_id, &path)
                .map(|decl| Found { decl, alias: None });
        }
        Err(LookupError::NoMatch)
    }

    /// Resolve `[...module, symbol]` against `importer`.
    fn resolve_path(&mut self, importer: ModuleId, path: &[String]) -> Result<DeclKey, LookupError> {
        let Some((symbol, module_segments)) = path.split_last() else {
            return Err(LookupError::NoMatch);
        };
        let target = self
            .registry
            .resolve_module(importer, module_segments)
            .ok_or_else(|| LookupError::UnknownModule(module_segments.join("::")))?;
        self.find_export(target, symbol)
    }

    /// Find the exported declaration `symbol` in `target`, following the
    /// target's own imports when it re-exports the name.
    fn find_export(&mut self, target: ModuleId, symbol: &str) -> Result<DeclKey, LookupError> {
        let module = self.registry.module(target);
        if let Some(decl) = module.exported_decl(symbol, self.conditions) {
            return Ok(DeclKey::new(target, decl));
        }
        if module.declared(symbol, self.conditions).is_some() {
            return Err(LookupError::NotExported {
                module: target,
                symbol: symbol.to_owned(),
            });
        }

        let missing = || LookupError::Missing {
            module: target,
            symbol: symbol.to_owned(),
        };
        let link = (target, symbol.to_owned());
        if self.chain.contains(&link) {
            return Err(missing());
        }
        self.chain.push(link);
        let result = ensure_sufficient_stack(|| self.resolve_import(target, symbol));
        self.chain.pop();

        match result {
            Ok(found) => Ok(found.decl),
            Err(LookupError::NoMatch) => Err(missing()),
            Err(error) => Err(error),
        }
    }

    fn report_unknown_import(&mut self, module_id: ModuleId, flat: &FlatImport) {
        if !self.reported.insert((module_id, flat.span)) {
            return;
        }
        let module = self.registry.module(module_id);
        let path = flat.module_path.join("::");
        let mut diagnostic = diag::unknown_import(flat.span, &path).in_module(module.path().clone());
        if self
            .registry
            .resolve_relative(module_id, &flat.module_path)
            .is_none()
        {
            diagnostic = diagnostic.with_note("the relative path climbs above the package root");
        }
        self.diagnostics.push(diagnostic);
    }

    fn report(&mut self, module: &Module, span: Span, name: &str, error: LookupError) {
        let diagnostic = match error {
            LookupError::Reported => return,
            LookupError::NoMatch => diag::unresolved_identifier(span, name),
            LookupError::UnknownModule(path) => diag::unresolved_identifier(span, name)
                .with_note(format!("no module `{path}` is registered")),
            LookupError::NotExported {
                module: target,
                symbol,
            } => diag::not_exported(span, &symbol, self.registry.module(target).path()),
            LookupError::Missing {
                module: target,
                symbol,
            } => diag::unresolved_identifier(span, name).with_note(format!(
                "`{}` has no declaration named `{symbol}`",
                self.registry.module(target).path()
            )),
        };
        self.diagnostics.push(diagnostic.in_module(module.path().clone()));
    }
}

/// `segments` without the leading `prefix`, if it starts with it.
fn strip_prefix<'a, 'b>(segments: &'a [&'b str], prefix: &[String]) -> Option<&'a [&'b str]> {
    if prefix.len() > segments.len() {
        return None;
    }
    let (head, rest) = segments.split_at(prefix.len());
    head.iter()
        .zip(prefix)
        .all(|(a, b)| *a == b.as_str())
        .then_some(rest)
}
