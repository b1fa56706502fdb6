//! Document - High-level document API

use sprig_core::Event;

use crate::{DomResult, DomTree, NodeId};

/// HTML Document
///
/// Starts out as `<html><head></head><body></body></html>`; `body()` is the
/// usual render container.
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a new document with the basic structure
    pub fn new() -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        let mut doc = Self {
            tree,
            html_element: html,
            head_element: head,
            body_element: body,
        };
        // Fresh detached elements, so none of these can fail
        let root = doc.tree.root();
        let linked = doc
            .tree
            .append_child(root, html)
            .and_then(|_| doc.tree.append_child(html, head))
            .and_then(|_| doc.tree.append_child(html, body));
        debug_assert!(linked.is_ok());
        doc
    }

    /// Create an empty document (no structure)
    pub fn empty() -> Self {
        Self {
            tree: DomTree::new(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Document node
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Get element by its `id` attribute
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.find_first(self.tree.root(), &|tree: &DomTree, node: NodeId| {
            tree.get_attribute(node, "id") == Some(id)
        })
    }

    /// All elements with a tag name, in document order
    pub fn get_elements_by_tag_name(&self, tag: &str) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect(self.tree.root(), tag, &mut out);
        out
    }

    fn find_first(
        &self,
        start: NodeId,
        pred: &dyn Fn(&DomTree, NodeId) -> bool,
    ) -> Option<NodeId> {
        for (node_id, _) in self.tree.children(start) {
            if pred(&self.tree, node_id) {
                return Some(node_id);
            }
            if let Some(found) = self.find_first(node_id, pred) {
                return Some(found);
            }
        }
        None
    }

    fn collect(&self, start: NodeId, tag: &str, out: &mut Vec<NodeId>) {
        for (node_id, node) in self.tree.children(start) {
            if node.as_element().is_some_and(|e| e.name == tag) {
                out.push(node_id);
            }
            self.collect(node_id, tag, out);
        }
    }

    /// Serialized content of <body>
    pub fn body_html(&self) -> String {
        self.tree.inner_html(self.body_element)
    }

    /// Set the `value` attribute, as typing into a field would
    pub fn set_value(&mut self, node: NodeId, value: &str) -> DomResult<()> {
        self.tree.set_attribute(node, "value", value.to_string())
    }

    /// Fire an event of `kind` at `target`
    ///
    /// The event carries the target's current `value` attribute. Returns
    /// `false` if a handler prevented the default action.
    pub fn fire(&self, target: NodeId, kind: &str) -> DomResult<bool> {
        let mut event = Event::new(kind);
        if let Some(value) = self.tree.get_attribute(target, "value") {
            event = event.with_value(value);
        }
        self.dispatch_event(target, &event)
    }

    /// Dispatch a prepared event at `target`
    pub fn dispatch_event(&self, target: NodeId, event: &Event) -> DomResult<bool> {
        self.tree.dispatch_event(target, event)
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
