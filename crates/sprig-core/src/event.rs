//! Events and event handlers
//!
//! Handlers are stored in element props and attached to render target nodes
//! by the property synchronizer. Handler identity is reference identity, so
//! re-rendering with the same `EventHandler` clone leaves the listener alone.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Event delivered to a handler
#[derive(Debug, Clone)]
pub struct Event {
    /// Normalized event name ("click", "input", ...)
    pub kind: String,
    /// Current `value` of the dispatch target, if it has one
    pub value: Option<String>,
    pub bubbles: bool,
    pub cancelable: bool,
    default_prevented: Cell<bool>,
    propagation_stopped: Cell<bool>,
}

impl Event {
    /// Create a bubbling, cancelable event
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: None,
            bubbles: true,
            cancelable: true,
            default_prevented: Cell::new(false),
            propagation_stopped: Cell::new(false),
        }
    }

    /// Attach the target value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Create a non-bubbling event
    pub fn non_bubbling(mut self) -> Self {
        self.bubbles = false;
        self
    }

    /// Prevent default action
    pub fn prevent_default(&self) {
        if self.cancelable {
            self.default_prevented.set(true);
        }
    }

    /// Stop propagation
    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented.get()
    }

    /// Check if propagation was stopped
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }
}

/// Reference-counted event callback
#[derive(Clone)]
pub struct EventHandler(Rc<dyn Fn(&Event)>);

impl EventHandler {
    pub fn new(f: impl Fn(&Event) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke the handler
    pub fn call(&self, event: &Event) {
        (self.0)(event)
    }

    /// Reference identity
    pub fn same_as(&self, other: &EventHandler) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for EventHandler {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventHandler({:p})", Rc::as_ptr(&self.0) as *const ())
    }
}
