//! Lexical scope tree.
//!
//! Each module owns one [`ScopeTree`]: a `Module` root scope plus nested
//! `Body` scopes for function bodies, blocks, loop headers and the
//! right-hand side of global declarations. Scopes hold their identifiers
//! and child scopes interleaved in source order, which is what lexical
//! lookup needs: a reference in a body scope sees only declarations that
//! precede it.
//!
//! The tree is built with an explicit open/close discipline by the parser
//! and is read-only afterwards.

use crate::{ElementId, IdentId, ScopeId, Span};

/// Kind of a lexical scope.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ScopeKind {
    /// Module root. Declarations are visible regardless of order.
    Module,
    /// Function body, block, loop header or declaration right-hand side.
    Body,
}

/// An entry in a scope, in source order.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ScopeItem {
    Ident(IdentId),
    Child(ScopeId),
}

/// A lexical scope.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Scope {
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    /// Index of this scope's `ScopeItem::Child` entry in the parent.
    pub position: u32,
    /// Declaration whose body this scope is, if any.
    pub owner: Option<IdentId>,
    pub items: Vec<ScopeItem>,
}

/// Declaration-specific identifier data.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct DeclInfo {
    /// Element that this identifier names (fn, struct, var, alias, ...).
    pub element: ElementId,
    /// Scope opened by this declaration's body, if any.
    pub opens: Option<ScopeId>,
    /// Declared at module scope.
    pub global: bool,
}

/// Declaration or reference.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum IdentKind {
    Decl(DeclInfo),
    Ref,
}

/// One identifier occurrence.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Ident {
    /// Exact source spelling. Qualified references keep their `::` path.
    pub name: String,
    pub span: Span,
    /// Scope the identifier belongs to.
    pub scope: ScopeId,
    /// Index of this identifier's `ScopeItem::Ident` entry in its scope.
    pub position: u32,
    pub kind: IdentKind,
}

impl Ident {
    #[inline]
    pub fn is_ref(&self) -> bool {
        matches!(self.kind, IdentKind::Ref)
    }

    #[inline]
    pub fn decl(&self) -> Option<&DeclInfo> {
        match &self.kind {
            IdentKind::Decl(info) => Some(info),
            IdentKind::Ref => None,
        }
    }

    /// Declared at module scope.
    #[inline]
    pub fn is_global_decl(&self) -> bool {
        self.decl().is_some_and(|d| d.global)
    }

    /// Last `::` segment of the spelling.
    pub fn simple_name(&self) -> &str {
        self.name.rsplit("::").next().unwrap_or(&self.name)
    }
}

/// Violations of the open/close discipline. These indicate a parser defect.
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum ScopeError {
    #[error("attempted to close scope {found:?} but the innermost open scope is {open:?}")]
    CloseMismatch { open: ScopeId, found: ScopeId },
    #[error("attempted to close the module root scope")]
    CloseRoot,
    #[error("{count} scope(s) still open at end of module")]
    Unclosed { count: usize },
    #[error("scope {0:?} is not reachable from the module root")]
    Unreachable(ScopeId),
}

/// Saved builder state for discarding a partially built item.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct ScopeSnapshot {
    scopes: usize,
    idents: usize,
    open: usize,
    current: ScopeId,
    current_items: usize,
}

/// Scope tree of one module.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
    idents: Vec<Ident>,
    /// Stack of open scopes while building. Always starts with the root.
    open: Vec<ScopeId>,
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeTree {
    /// The module root scope.
    pub const ROOT: ScopeId = ScopeId::new(0);

    /// Create a tree holding only the module root scope.
    pub fn new() -> Self {
        ScopeTree {
            scopes: vec![Scope {
                kind: ScopeKind::Module,
                parent: None,
                position: 0,
                owner: None,
                items: Vec::new(),
            }],
            idents: Vec::new(),
            open: vec![Self::ROOT],
        }
    }

    // -- Building --

    /// Innermost open scope.
    #[inline]
    pub fn current(&self) -> ScopeId {
        self.open.last().copied().unwrap_or(Self::ROOT)
    }

    /// Open a body scope nested in the current scope.
    ///
    /// When `owner` is a declaration, its `opens` field is pointed at the
    /// new scope.
    pub fn open_scope(&mut self, owner: Option<IdentId>) -> ScopeId {
        let parent = self.current();
        let id = ScopeId::from_usize(self.scopes.len());
        let parent_items = &mut self.scopes[parent.index()].items;
        let position = u32::try_from(parent_items.len()).unwrap_or(u32::MAX);
        parent_items.push(ScopeItem::Child(id));
        self.scopes.push(Scope {
            kind: ScopeKind::Body,
            parent: Some(parent),
            position,
            owner,
            items: Vec::new(),
        });
        if let Some(owner) = owner {
            if let IdentKind::Decl(info) = &mut self.idents[owner.index()].kind {
                info.opens = Some(id);
            }
        }
        self.open.push(id);
        id
    }

    /// Close `scope`, which must be the innermost open scope.
    pub fn close_scope(&mut self, scope: ScopeId) -> Result<(), ScopeError> {
        if scope == Self::ROOT {
            return Err(ScopeError::CloseRoot);
        }
        let open = self.current();
        if open != scope {
            return Err(ScopeError::CloseMismatch { open, found: scope });
        }
        self.open.pop();
        Ok(())
    }

    /// Allocate an identifier in the current scope without making it
    /// visible yet. Call [`attach`](Self::attach) to append it to the scope.
    ///
    /// Local declarations use this so that their own initializer does not
    /// see them: `let x = x + 1;` refers to an outer `x`.
    pub fn new_ident(&mut self, name: impl Into<String>, span: Span, kind: IdentKind) -> IdentId {
        let id = IdentId::from_usize(self.idents.len());
        self.idents.push(Ident {
            name: name.into(),
            span,
            scope: self.current(),
            position: u32::MAX,
            kind,
        });
        id
    }

    /// Append a previously allocated identifier to its scope.
    pub fn attach(&mut self, ident: IdentId) {
        let scope = self.idents[ident.index()].scope;
        let items = &mut self.scopes[scope.index()].items;
        self.idents[ident.index()].position = u32::try_from(items.len()).unwrap_or(u32::MAX);
        items.push(ScopeItem::Ident(ident));
    }

    /// Allocate an identifier and append it to the current scope.
    pub fn add_ident(&mut self, name: impl Into<String>, span: Span, kind: IdentKind) -> IdentId {
        let id = self.new_ident(name, span, kind);
        self.attach(id);
        id
    }

    /// Record the builder state so a failed item can be discarded.
    pub fn snapshot(&self) -> ScopeSnapshot {
        let current = self.current();
        ScopeSnapshot {
            scopes: self.scopes.len(),
            idents: self.idents.len(),
            open: self.open.len(),
            current,
            current_items: self.scopes[current.index()].items.len(),
        }
    }

    /// Discard everything built since `snapshot`.
    pub fn rollback(&mut self, snapshot: ScopeSnapshot) {
        self.scopes.truncate(snapshot.scopes);
        self.idents.truncate(snapshot.idents);
        self.open.truncate(snapshot.open);
        self.scopes[snapshot.current.index()]
            .items
            .truncate(snapshot.current_items);
    }

    /// Check that every opened scope was closed.
    pub fn finish(&self) -> Result<(), ScopeError> {
        if self.open.len() > 1 {
            return Err(ScopeError::Unclosed {
                count: self.open.len() - 1,
            });
        }
        Ok(())
    }

    // -- Queries --

    #[inline]
    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    #[inline]
    pub fn ident(&self, id: IdentId) -> &Ident {
        &self.idents[id.index()]
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    pub fn ident_count(&self) -> usize {
        self.idents.len()
    }

    /// All identifiers with their ids, in allocation order.
    pub fn idents(&self) -> impl Iterator<Item = (IdentId, &Ident)> {
        self.idents
            .iter()
            .enumerate()
            .map(|(i, ident)| (IdentId::from_usize(i), ident))
    }

    /// Direct child scopes of `id`, in source order.
    pub fn children(&self, id: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        self.scope(id).items.iter().filter_map(|item| match item {
            ScopeItem::Child(child) => Some(*child),
            ScopeItem::Ident(_) => None,
        })
    }

    /// Declarations attached directly to the module root scope.
    pub fn module_decls(&self) -> impl Iterator<Item = IdentId> + '_ {
        self.scope(Self::ROOT)
            .items
            .iter()
            .filter_map(move |item| match item {
                ScopeItem::Ident(id) if self.ident(*id).decl().is_some() => Some(*id),
                _ => None,
            })
    }

    /// Verify that `scope` hangs off the module root.
    pub fn check_reachable(&self, scope: ScopeId) -> Result<(), ScopeError> {
        let mut current = scope;
        // A well-formed tree reaches the root in at most `scopes.len()` steps.
        for _ in 0..=self.scopes.len() {
            if current == Self::ROOT {
                return Ok(());
            }
            match self.scopes.get(current.index()).and_then(|s| s.parent) {
                Some(parent) => current = parent,
                None => return Err(ScopeError::Unreachable(scope)),
            }
        }
        Err(ScopeError::Unreachable(scope))
    }

    /// Find the declaration a reference binds to within this module.
    ///
    /// Scans backward from the reference through its scope, then through each
    /// enclosing scope from the position of the child that contains the
    /// reference. At module scope every declaration accepted by `visible` is
    /// in view regardless of position. The first match wins.
    pub fn resolve_local(
        &self,
        reference: IdentId,
        visible: impl Fn(IdentId) -> bool,
    ) -> Option<IdentId> {
        let ident = self.ident(reference);
        let name = ident.name.as_str();
        let mut scope_id = ident.scope;
        let mut limit = ident.position as usize;

        loop {
            let scope = self.scope(scope_id);
            let found = match scope.kind {
                ScopeKind::Module => scope.items.iter().find_map(|item| match item {
                    ScopeItem::Ident(id) => self.matching_decl(*id, name, &visible),
                    ScopeItem::Child(_) => None,
                }),
                ScopeKind::Body => {
                    let end = limit.min(scope.items.len());
                    scope.items[..end].iter().rev().find_map(|item| match item {
                        ScopeItem::Ident(id) => self.matching_decl(*id, name, &visible),
                        ScopeItem::Child(_) => None,
                    })
                }
            };
            if found.is_some() {
                return found;
            }
            let parent = scope.parent?;
            limit = scope.position as usize;
            scope_id = parent;
        }
    }

    fn matching_decl(
        &self,
        id: IdentId,
        name: &str,
        visible: &impl Fn(IdentId) -> bool,
    ) -> Option<IdentId> {
        let ident = self.ident(id);
        (ident.decl().is_some() && ident.name == name && visible(id)).then_some(id)
    }
}

#[cfg(test)]
mod tests;
