//! DOM Events
//!
//! Listener storage on elements and bubbling dispatch.

use sprig_core::{Event, EventHandler};

use crate::{DomResult, DomTree, ElementData, NodeId};

/// Listener registered on an element
#[derive(Debug, Clone)]
pub struct Listener {
    pub event: String,
    pub handler: EventHandler,
}

impl ElementData {
    /// Register a listener; registering the same handler twice is a no-op
    pub fn add_listener(&mut self, event: &str, handler: &EventHandler) {
        let exists = self
            .listeners
            .iter()
            .any(|l| l.event == event && l.handler.same_as(handler));
        if !exists {
            self.listeners.push(Listener {
                event: event.to_string(),
                handler: handler.clone(),
            });
        }
    }

    /// Remove a listener, returning whether it was registered
    pub fn remove_listener(&mut self, event: &str, handler: &EventHandler) -> bool {
        let before = self.listeners.len();
        self.listeners
            .retain(|l| !(l.event == event && l.handler.same_as(handler)));
        self.listeners.len() != before
    }

    /// Handlers for an event, in registration order
    pub fn handlers_for(&self, event: &str) -> Vec<EventHandler> {
        self.listeners
            .iter()
            .filter(|l| l.event == event)
            .map(|l| l.handler.clone())
            .collect()
    }
}

impl DomTree {
    /// Number of listeners on a node for an event
    pub fn listener_count(&self, id: NodeId, event: &str) -> usize {
        self.get(id)
            .and_then(|n| n.as_element())
            .map(|e| e.listeners.iter().filter(|l| l.event == event).count())
            .unwrap_or(0)
    }

    /// Dispatch an event at `target`, bubbling to ancestors
    ///
    /// Handlers are collected per node before any of them runs, so a handler
    /// may freely touch shared state. Returns `false` if a handler called
    /// `prevent_default`.
    pub fn dispatch_event(&self, target: NodeId, event: &Event) -> DomResult<bool> {
        self.get(target).ok_or(crate::DomError::NotFound(target))?;

        let path = std::iter::once(target).chain(self.ancestors(target));
        for id in path {
            let handlers = match self.get(id).and_then(|n| n.as_element()) {
                Some(el) => el.handlers_for(&event.kind),
                None => Vec::new(),
            };
            for handler in handlers {
                handler.call(event);
            }
            if event.is_propagation_stopped() || !event.bubbles {
                break;
            }
        }

        tracing::trace!(kind = %event.kind, ?target, "dispatched event");
        Ok(!event.is_default_prevented())
    }
}
