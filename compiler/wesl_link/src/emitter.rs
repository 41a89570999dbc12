//! Linked text emission.
//!
//! The root module's source is copied in order with its imports and
//! inactive items removed. Every reachable declaration from other modules
//! follows, one blank line apart, in discovery order. Within an item only
//! identifier occurrences change: each is replaced by the output name of
//! what it refers to.

use rustc_hash::FxHashMap;
use tracing::debug;
use wesl_diagnostic::{self as diag, Diagnostic};
use wesl_ir::{
    Condition, Conditions, DeclKey, Element, ElementKind, IdentId, IdentKind, Module, ModuleId,
    RefKey, Span,
};

use crate::binder::BindOutput;
use crate::bindings::Resolution;
use crate::mangler::Mangler;
use crate::registry::Registry;
use crate::source_map::{SourceMap, SourceMapEntry};

/// Linked text plus how it maps back to the inputs.
#[derive(Clone, Debug, Default)]
pub struct EmitOutput {
    pub text: String,
    pub source_map: SourceMap,
    pub diagnostics: Vec<Diagnostic>,
}

/// Emit the linked text for `root`.
///
/// Root declarations are named first so that they keep their names.
pub fn emit(
    registry: &Registry,
    root: ModuleId,
    bound: &BindOutput,
    mangler: &mut Mangler,
    params: &FxHashMap<String, String>,
    conditions: &Conditions,
) -> EmitOutput {
    let mut emitter = Emitter {
        registry,
        bound,
        mangler,
        params,
        conditions,
        out: EmitOutput::default(),
    };

    for decl in bound.reachable.iter().filter(|decl| decl.module == root) {
        emitter.decl_name(*decl);
    }
    emitter.emit_root(root);

    let mut externals = 0usize;
    for decl in bound.reachable.iter().filter(|decl| decl.module != root) {
        emitter.emit_external(*decl);
        externals += 1;
    }
    if externals > 0 {
        emitter.out.text.push('\n');
    }

    debug!(
        module = %registry.module(root).path(),
        bytes = emitter.out.text.len(),
        externals,
        "emitted linked text"
    );
    emitter.out
}

struct Emitter<'a> {
    registry: &'a Registry,
    bound: &'a BindOutput,
    mangler: &'a mut Mangler,
    params: &'a FxHashMap<String, String>,
    conditions: &'a Conditions,
    out: EmitOutput,
}

impl Emitter<'_> {
    fn emit_root(&mut self, root: ModuleId) {
        let registry = self.registry;
        let module = registry.module(root);
        let source = module.source();
        let mut pos = 0usize;

        for id in module.root_elements() {
            let element = module.element(*id);
            let start = element.span.start as usize;
            self.copy(module, pos, start);

            let dropped = matches!(element.kind, ElementKind::Import)
                || !Condition::is_active(element.condition.as_ref(), self.conditions);
            if dropped {
                pos = skip_newline(source, element.span.end as usize);
            } else {
                self.emit_element(root, module, element);
                pos = element.span.end as usize;
            }
        }
        self.copy(module, pos, source.len());
    }

    fn emit_external(&mut self, decl: DeclKey) {
        let registry = self.registry;
        let module = registry.module(decl.module);
        let Some(element) = module.decl_element(decl.ident) else {
            return;
        };
        let text = &mut self.out.text;
        if !text.is_empty() {
            if !text.ends_with('\n') {
                text.push('\n');
            }
            text.push('\n');
        }
        self.emit_element(decl.module, module, element);
    }

    fn emit_element(&mut self, module_id: ModuleId, module: &Module, element: &Element) {
        let mut pos = element.span.start as usize;
        for child in &element.children {
            let child = module.element(*child);
            self.copy(module, pos, child.span.start as usize);
            if let ElementKind::Ident(ident) = child.kind {
                self.emit_ident(module_id, module, ident, child.span);
            }
            pos = child.span.end as usize;
        }
        self.copy(module, pos, element.span.end as usize);
    }

    fn emit_ident(&mut self, module_id: ModuleId, module: &Module, id: IdentId, span: Span) {
        let bound = self.bound;
        let ident = module.ident(id);
        let name = match ident.kind {
            IdentKind::Decl(info) if info.global => self.decl_name(DeclKey::new(module_id, id)),
            IdentKind::Decl(_) => ident.name.clone(),
            IdentKind::Ref => match bound.bindings.get(RefKey::new(module_id, id)) {
                Some(Resolution::Decl(target)) => self.decl_name(*target),
                Some(Resolution::External(param)) => match self.params.get(param) {
                    Some(value) => value.clone(),
                    None => {
                        self.out.diagnostics.push(
                            diag::missing_parameter(span, param).in_module(module.path().clone()),
                        );
                        ident.name.clone()
                    }
                },
                Some(Resolution::Std) | None => ident.name.clone(),
            },
        };
        self.write(module, &name, span);
    }

    /// Output name of a declaration. Locals keep their spelling.
    fn decl_name(&mut self, decl: DeclKey) -> String {
        let registry = self.registry;
        let ident = registry.module(decl.module).ident(decl.ident);
        if !ident.is_global_decl() {
            return ident.name.clone();
        }
        match self.bound.aliases.get(&decl) {
            Some(alias) => self.mangler.unique_alias(decl, alias).to_owned(),
            None => self.mangler.unique_name(decl, &ident.name).to_owned(),
        }
    }

    /// Copy `start..end` of the module source verbatim.
    fn copy(&mut self, module: &Module, start: usize, end: usize) {
        if start >= end {
            return;
        }
        let text = module.source().get(start..end).unwrap_or("");
        self.write(module, text, span_of(start, end));
    }

    fn write(&mut self, module: &Module, text: &str, source: Span) {
        let start = self.out.text.len();
        self.out.text.push_str(text);
        let output = span_of(start, self.out.text.len());
        self.out.source_map.push(SourceMapEntry {
            output,
            module: module.path().clone(),
            source,
        });
    }
}

/// Offset just past the line break at `offset`, if there is one.
fn skip_newline(source: &str, offset: usize) -> usize {
    let rest = source.get(offset..).unwrap_or("");
    if rest.starts_with("\r\n") {
        offset + 2
    } else if rest.starts_with('\n') {
        offset + 1
    } else {
        offset
    }
}

fn span_of(start: usize, end: usize) -> Span {
    let clamp = |n: usize| u32::try_from(n).unwrap_or(u32::MAX);
    Span::new(clamp(start), clamp(end))
}
