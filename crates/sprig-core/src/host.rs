//! Render target capability
//!
//! The engine never touches a concrete document. Everything it needs from the
//! live tree goes through this trait, so tests can record mutations and hosts
//! can back it with any node store.

use std::fmt;

use crate::element::PropValue;
use crate::event::EventHandler;

/// Mutable tree the engine commits into
pub trait RenderTarget {
    /// Opaque node handle
    type Node: Clone + PartialEq + fmt::Debug;
    /// Failure reported by the target
    type Error: std::error::Error + Send + Sync + 'static;

    /// Create a detached element node
    fn create_node(&mut self, tag: &str) -> Result<Self::Node, Self::Error>;

    /// Create a detached, empty text node
    fn create_text_node(&mut self) -> Result<Self::Node, Self::Error>;

    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<(), Self::Error>;

    fn remove_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<(), Self::Error>;

    /// Write a plain property (attribute, or `nodeValue` on text nodes)
    fn set_property(
        &mut self,
        node: &Self::Node,
        key: &str,
        value: &PropValue,
    ) -> Result<(), Self::Error>;

    fn add_event_listener(
        &mut self,
        node: &Self::Node,
        event: &str,
        handler: &EventHandler,
    ) -> Result<(), Self::Error>;

    fn remove_event_listener(
        &mut self,
        node: &Self::Node,
        event: &str,
        handler: &EventHandler,
    ) -> Result<(), Self::Error>;
}
