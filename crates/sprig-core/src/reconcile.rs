//! Diff/Reconciler
//!
//! Positional child diff. The n-th new element is compared with the n-th
//! fiber of the previous pass under the same parent; there is no key
//! matching, so a reorder shows up as a run of type changes or updates.

use crate::element::Element;
use crate::error::RenderResult;
use crate::fiber::{EffectTag, Fiber, FiberArena, FiberId, FiberKind};

/// Build the child list of `parent` from `elements`
///
/// New fibers are tagged `Add` or `Update`; previous fibers with no
/// same-typed successor are pushed onto `deletions`. The previous tree is
/// only read.
pub(crate) fn reconcile_children<N: Clone>(
    arena: &mut FiberArena<N>,
    deletions: &mut Vec<FiberId>,
    parent: FiberId,
    elements: &[Element],
    pass: u64,
) -> RenderResult<()> {
    let mut old = arena
        .fiber(parent)?
        .previous
        .and_then(|prev| arena.get(prev))
        .and_then(|prev| prev.child);
    let mut last_new: Option<FiberId> = None;
    let mut index = 0;

    while index < elements.len() || old.is_some() {
        let element = elements.get(index);
        let old_fiber = old.and_then(|id| arena.get(id));
        let same_type = match (old_fiber, element) {
            (Some(fiber), Some(element)) => fiber.kind.matches(element.ty()),
            _ => false,
        };
        let reused_node = if same_type {
            old_fiber.and_then(|f| f.node.clone())
        } else {
            None
        };
        let old_sibling = old_fiber.and_then(|f| f.sibling);
        let old_live = old_fiber.is_some();

        let mut created = None;
        if let Some(element) = element {
            let mut fiber = Fiber::new(FiberKind::from(element.ty()), element.props().clone(), pass);
            fiber.parent = Some(parent);
            if same_type {
                fiber.node = reused_node;
                fiber.previous = old;
                fiber.effect = Some(EffectTag::Update);
            } else {
                fiber.effect = Some(EffectTag::Add);
            }
            created = Some(arena.alloc(fiber));
        }

        if !same_type && old_live {
            if let Some(old_id) = old {
                tracing::trace!(?old_id, "previous fiber scheduled for deletion");
                deletions.push(old_id);
            }
        }

        if let Some(new_id) = created {
            match last_new {
                None => arena.fiber_mut(parent)?.child = Some(new_id),
                Some(prev) => arena.fiber_mut(prev)?.sibling = Some(new_id),
            }
            last_new = Some(new_id);
        }

        old = old_sibling;
        index += 1;
    }

    Ok(())
}
