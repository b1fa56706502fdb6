//! Fibers
//!
//! A fiber is the per-pass rendering state of one element. Links between
//! fibers are arena handles; `previous` points into the last committed pass.

use std::rc::Rc;

use crate::arena::{GenArena, GenIndex};
use crate::element::{Component, ElementType, Props};
use crate::error::{RenderError, RenderResult};
use crate::hooks::Hook;

/// Fiber handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FiberId(pub(crate) GenIndex);

/// Commit action for a fiber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectTag {
    Add,
    Update,
    Delete,
}

/// What a fiber renders
#[derive(Debug, Clone)]
pub enum FiberKind {
    /// Wraps the render target container
    Root,
    Host(String),
    Text,
    Component(Component),
}

impl FiberKind {
    /// Whether an element of type `ty` can reuse this fiber's node
    pub fn matches(&self, ty: &ElementType) -> bool {
        match (self, ty) {
            (FiberKind::Host(a), ElementType::Host(b)) => a == b,
            (FiberKind::Text, ElementType::Text) => true,
            (FiberKind::Component(a), ElementType::Component(b)) => a.same_as(b),
            _ => false,
        }
    }
}

impl From<&ElementType> for FiberKind {
    fn from(ty: &ElementType) -> Self {
        match ty {
            ElementType::Host(tag) => FiberKind::Host(tag.clone()),
            ElementType::Text => FiberKind::Text,
            ElementType::Component(c) => FiberKind::Component(c.clone()),
        }
    }
}

/// Rendering state of one element in one pass
#[derive(Debug)]
pub struct Fiber<N> {
    pub(crate) kind: FiberKind,
    pub(crate) props: Rc<Props>,
    pub(crate) node: Option<N>,
    pub(crate) parent: Option<FiberId>,
    pub(crate) child: Option<FiberId>,
    pub(crate) sibling: Option<FiberId>,
    pub(crate) previous: Option<FiberId>,
    pub(crate) effect: Option<EffectTag>,
    pub(crate) hooks: Vec<Hook>,
    pub(crate) pass: u64,
}

impl<N> Fiber<N> {
    pub(crate) fn new(kind: FiberKind, props: Rc<Props>, pass: u64) -> Self {
        Self {
            kind,
            props,
            node: None,
            parent: None,
            child: None,
            sibling: None,
            previous: None,
            effect: None,
            hooks: Vec::new(),
            pass,
        }
    }

    pub fn kind(&self) -> &FiberKind {
        &self.kind
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    /// Render target node owned by this fiber
    pub fn node(&self) -> Option<&N> {
        self.node.as_ref()
    }

    pub fn parent(&self) -> Option<FiberId> {
        self.parent
    }

    pub fn child(&self) -> Option<FiberId> {
        self.child
    }

    pub fn sibling(&self) -> Option<FiberId> {
        self.sibling
    }

    pub fn previous(&self) -> Option<FiberId> {
        self.previous
    }

    pub fn effect(&self) -> Option<EffectTag> {
        self.effect
    }

    /// Render pass that allocated this fiber
    pub fn pass(&self) -> u64 {
        self.pass
    }
}

/// Arena of fibers across the pending and committed passes
#[derive(Debug)]
pub struct FiberArena<N> {
    fibers: GenArena<Fiber<N>>,
}

impl<N> FiberArena<N> {
    pub fn new() -> Self {
        Self { fibers: GenArena::new() }
    }

    pub(crate) fn alloc(&mut self, fiber: Fiber<N>) -> FiberId {
        FiberId(self.fibers.insert(fiber))
    }

    pub fn get(&self, id: FiberId) -> Option<&Fiber<N>> {
        self.fibers.get(id.0)
    }

    pub(crate) fn fiber(&self, id: FiberId) -> RenderResult<&Fiber<N>> {
        self.fibers.get(id.0).ok_or(RenderError::MissingFiber(id))
    }

    pub(crate) fn fiber_mut(&mut self, id: FiberId) -> RenderResult<&mut Fiber<N>> {
        self.fibers.get_mut(id.0).ok_or(RenderError::MissingFiber(id))
    }

    /// Drop every fiber not allocated by `pass`
    pub(crate) fn retain_pass(&mut self, pass: u64) -> usize {
        self.fibers.retain(|f| f.pass == pass)
    }

    pub fn len(&self) -> usize {
        self.fibers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fibers.is_empty()
    }

    /// Children of `id` in sibling order
    pub fn children(&self, id: FiberId) -> Children<'_, N> {
        Children {
            arena: self,
            next: self.get(id).and_then(|f| f.child),
        }
    }
}

impl<N> Default for FiberArena<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a fiber's child list
pub struct Children<'a, N> {
    arena: &'a FiberArena<N>,
    next: Option<FiberId>,
}

impl<'a, N> Iterator for Children<'a, N> {
    type Item = FiberId;

    fn next(&mut self) -> Option<FiberId> {
        let id = self.next?;
        self.next = self.arena.get(id).and_then(|f| f.sibling);
        Some(id)
    }
}
