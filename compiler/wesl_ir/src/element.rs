//! Element tree for text emission.
//!
//! Elements cover top-level items of a module. Their children are the
//! identifier occurrences and elided fragments inside the item's span, in
//! source order; everything between children is raw text that the emitter
//! copies verbatim.

use crate::{Condition, ElementId, IdentId, ScopeId, Span};

/// What an element is.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ElementKind {
    Fn { name: IdentId },
    Struct { name: IdentId },
    /// Global `var`, `const` or `override`.
    Var { name: IdentId },
    Alias { name: IdentId },
    /// `const_assert`; its expression lives in `scope`.
    ConstAssert { scope: ScopeId },
    Import,
    /// `enable`, `requires` or `diagnostic` directive.
    Directive,
    /// One identifier occurrence.
    Ident(IdentId),
    /// Text dropped on emission (`@if(...)`, `export`).
    Elided,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Element {
    pub kind: ElementKind,
    pub span: Span,
    pub children: Vec<ElementId>,
    /// `@if` condition guarding a top-level item.
    pub condition: Option<Condition>,
}

impl Element {
    pub fn new(kind: ElementKind, span: Span) -> Self {
        Element {
            kind,
            span,
            children: Vec::new(),
            condition: None,
        }
    }

    /// The declaration identifier named by this element, if it declares one.
    pub fn decl_ident(&self) -> Option<IdentId> {
        match self.kind {
            ElementKind::Fn { name }
            | ElementKind::Struct { name }
            | ElementKind::Var { name }
            | ElementKind::Alias { name } => Some(name),
            _ => None,
        }
    }
}

/// Arena of a module's elements.
///
/// Declaration identifiers need their element's id before the element is
/// complete, so ids can be reserved and filled in later.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct ElementArena {
    elements: Vec<Element>,
}

impl ElementArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a completed element.
    pub fn alloc(&mut self, element: Element) -> ElementId {
        let id = ElementId::from_usize(self.elements.len());
        self.elements.push(element);
        id
    }

    /// Reserve an id for an element that will be filled in later.
    pub fn reserve(&mut self) -> ElementId {
        self.alloc(Element::new(ElementKind::Elided, Span::DUMMY))
    }

    /// Replace a reserved element.
    pub fn fill(&mut self, id: ElementId, element: Element) {
        self.elements[id.index()] = element;
    }

    #[inline]
    pub fn get(&self, id: ElementId) -> &Element {
        &self.elements[id.index()]
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Drop every element allocated at or after `len`.
    pub fn truncate(&mut self, len: usize) {
        self.elements.truncate(len);
    }
}
