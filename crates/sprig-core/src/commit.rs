//! Render-Target Mutator
//!
//! Node creation during the walk, and the commit pass that attaches,
//! updates and removes nodes. Component and root fibers own no node of their
//! own (the root owns the container), so placement and removal walk past
//! component fibers to the nearest fiber that does.

use crate::element::Props;
use crate::error::{RenderError, RenderResult};
use crate::fiber::{EffectTag, FiberArena, FiberId, FiberKind};
use crate::host::RenderTarget;
use crate::props::sync_props;

/// Effects applied by one commit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitSummary {
    pub added: usize,
    pub updated: usize,
    pub deleted: usize,
}

impl CommitSummary {
    /// No node was attached or removed
    pub fn is_structurally_unchanged(&self) -> bool {
        self.added == 0 && self.deleted == 0
    }
}

/// Create the node for a host or text fiber, applying its full prop set
pub(crate) fn create_node<T: RenderTarget>(
    target: &mut T,
    kind: &FiberKind,
    props: &Props,
) -> RenderResult<Option<T::Node>> {
    let node = match kind {
        FiberKind::Host(tag) => target.create_node(tag),
        FiberKind::Text => target.create_text_node(),
        FiberKind::Root | FiberKind::Component(_) => return Ok(None),
    }
    .map_err(RenderError::target)?;
    sync_props(target, &node, &Props::new(), props)?;
    Ok(Some(node))
}

/// Node of the nearest ancestor of `id` that owns one
fn host_parent_node<N: Clone>(arena: &FiberArena<N>, id: FiberId) -> RenderResult<Option<N>> {
    let mut current = arena.fiber(id)?.parent;
    while let Some(ancestor) = current {
        let fiber = arena.fiber(ancestor)?;
        if let Some(node) = &fiber.node {
            return Ok(Some(node.clone()));
        }
        current = fiber.parent;
    }
    Ok(None)
}

/// Node of `id`, or of its first descendant that owns one
fn first_host_node<N: Clone>(arena: &FiberArena<N>, id: FiberId) -> RenderResult<Option<N>> {
    let mut current = Some(id);
    while let Some(fiber_id) = current {
        let fiber = arena.fiber(fiber_id)?;
        if let Some(node) = &fiber.node {
            return Ok(Some(node.clone()));
        }
        current = fiber.child;
    }
    Ok(None)
}

/// Detach a deleted fiber's node from the render target
pub(crate) fn commit_deletion<T: RenderTarget>(
    arena: &FiberArena<T::Node>,
    target: &mut T,
    id: FiberId,
) -> RenderResult<()> {
    let Some(node) = first_host_node(arena, id)? else {
        tracing::trace!(?id, "deleted fiber owns no node");
        return Ok(());
    };
    let Some(parent) = host_parent_node(arena, id)? else {
        tracing::warn!(?id, "deleted fiber has no attached ancestor");
        return Ok(());
    };
    target.remove_child(&parent, &node).map_err(RenderError::target)
}

/// Apply the effects of every fiber below `root`, in pre-order
pub(crate) fn commit_tree<T: RenderTarget>(
    arena: &FiberArena<T::Node>,
    target: &mut T,
    root: FiberId,
) -> RenderResult<CommitSummary> {
    let mut summary = CommitSummary::default();
    let mut stack: Vec<FiberId> = arena.fiber(root)?.child.into_iter().collect();

    while let Some(id) = stack.pop() {
        let fiber = arena.fiber(id)?;
        match fiber.effect {
            Some(EffectTag::Add) => {
                if let Some(node) = &fiber.node {
                    if let Some(parent) = host_parent_node(arena, id)? {
                        target.append_child(&parent, node).map_err(RenderError::target)?;
                    }
                }
                summary.added += 1;
            }
            Some(EffectTag::Update) => {
                if let Some(node) = &fiber.node {
                    let previous = fiber.previous.and_then(|prev| arena.get(prev));
                    match previous {
                        Some(prev) => {
                            sync_props(target, node, &prev.props, &fiber.props)?;
                        }
                        None => tracing::warn!(?id, "updated fiber lost its previous fiber"),
                    }
                }
                summary.updated += 1;
            }
            Some(EffectTag::Delete) | None => {}
        }

        if let Some(sibling) = fiber.sibling {
            stack.push(sibling);
        }
        if let Some(child) = fiber.child {
            stack.push(child);
        }
    }

    Ok(summary)
}
