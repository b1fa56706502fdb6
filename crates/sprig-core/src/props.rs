//! Property Synchronizer
//!
//! Computes the attribute and listener delta between two prop maps and
//! applies it to one render target node.

use crate::element::{CHILDREN, PropValue, Props};
use crate::error::{RenderError, RenderResult};
use crate::event::EventHandler;
use crate::host::RenderTarget;

/// Classification of a prop key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropKind {
    /// The reserved child list
    Children,
    /// Event handler, carrying the normalized event name
    Event(String),
    /// Plain attribute
    Attribute,
}

impl PropKind {
    /// Classify a key: `children`, `on` + uppercase letter, or attribute
    pub fn classify(key: &str) -> Self {
        if key == CHILDREN {
            return PropKind::Children;
        }
        match key.strip_prefix("on") {
            Some(rest) if rest.starts_with(|c: char| c.is_ascii_uppercase()) => {
                PropKind::Event(rest.to_ascii_lowercase())
            }
            _ => PropKind::Attribute,
        }
    }
}

/// One mutation produced by `diff_props`
#[derive(Debug, Clone, PartialEq)]
pub enum PropChange {
    Detach { event: String, handler: EventHandler },
    Reset { key: String },
    Set { key: String, value: PropValue },
    Attach { event: String, handler: EventHandler },
}

/// Compute the changes turning `prev` into `next`
///
/// Order: stale listeners detached, removed attributes reset, new or changed
/// attributes set, new or changed listeners attached.
pub fn diff_props(prev: &Props, next: &Props) -> Vec<PropChange> {
    let changed = |key: &str| prev.get(key) != next.get(key);
    let mut changes = Vec::new();

    for (key, value) in prev.iter() {
        if let PropKind::Event(event) = PropKind::classify(key) {
            if changed(key) {
                match value.as_handler() {
                    Some(handler) => changes.push(PropChange::Detach {
                        event,
                        handler: handler.clone(),
                    }),
                    None => tracing::warn!(key, "event prop without a handler ignored"),
                }
            }
        }
    }

    for (key, _) in prev.iter() {
        if PropKind::classify(key) == PropKind::Attribute && !next.contains_key(key) {
            changes.push(PropChange::Reset { key: key.to_string() });
        }
    }

    for (key, value) in next.iter() {
        if PropKind::classify(key) == PropKind::Attribute && changed(key) {
            changes.push(PropChange::Set {
                key: key.to_string(),
                value: value.clone(),
            });
        }
    }

    for (key, value) in next.iter() {
        if let PropKind::Event(event) = PropKind::classify(key) {
            if changed(key) {
                match value.as_handler() {
                    Some(handler) => changes.push(PropChange::Attach {
                        event,
                        handler: handler.clone(),
                    }),
                    None => tracing::warn!(key, "event prop without a handler ignored"),
                }
            }
        }
    }

    changes
}

/// Apply changes to `node`
pub fn apply_changes<T: RenderTarget>(
    target: &mut T,
    node: &T::Node,
    changes: &[PropChange],
) -> RenderResult<()> {
    for change in changes {
        tracing::trace!(?node, ?change, "prop change");
        let result = match change {
            PropChange::Detach { event, handler } => target.remove_event_listener(node, event, handler),
            PropChange::Reset { key } => target.set_property(node, key, &PropValue::empty()),
            PropChange::Set { key, value } => target.set_property(node, key, value),
            PropChange::Attach { event, handler } => target.add_event_listener(node, event, handler),
        };
        result.map_err(RenderError::target)?;
    }
    Ok(())
}

/// Diff and apply in one go, returning the number of changes applied
pub fn sync_props<T: RenderTarget>(
    target: &mut T,
    node: &T::Node,
    prev: &Props,
    next: &Props,
) -> RenderResult<usize> {
    let changes = diff_props(prev, next);
    apply_changes(target, node, &changes)?;
    Ok(changes.len())
}
