//! Render target backing for `Document`

use sprig_core::{EventHandler, NODE_VALUE, PropValue, RenderTarget};

use crate::{DomError, Document, NodeData, NodeId};

impl RenderTarget for Document {
    type Node = NodeId;
    type Error = DomError;

    fn create_node(&mut self, tag: &str) -> Result<NodeId, DomError> {
        Ok(self.tree.create_element(tag))
    }

    fn create_text_node(&mut self) -> Result<NodeId, DomError> {
        Ok(self.tree.create_text(""))
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<(), DomError> {
        self.tree.append_child(*parent, *child)
    }

    fn remove_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<(), DomError> {
        self.tree.remove_child(*parent, *child)
    }

    fn set_property(&mut self, node: &NodeId, key: &str, value: &PropValue) -> Result<(), DomError> {
        let Some(text) = value.to_attr_string() else {
            tracing::warn!(key, ?node, "handler value written as a plain property, ignored");
            return Ok(());
        };
        let target = self.tree.get_mut(*node).ok_or(DomError::NotFound(*node))?;
        match &mut target.data {
            NodeData::Text(t) if key == NODE_VALUE => t.content = text,
            NodeData::Text(_) => tracing::debug!(key, "ignoring property on text node"),
            NodeData::Element(el) => el.set_attr(key, text),
            NodeData::Document => return Err(DomError::InvalidNodeType("document")),
        }
        Ok(())
    }

    fn add_event_listener(
        &mut self,
        node: &NodeId,
        event: &str,
        handler: &EventHandler,
    ) -> Result<(), DomError> {
        let target = self.tree.get_mut(*node).ok_or(DomError::NotFound(*node))?;
        let kind = target.kind_name();
        target
            .as_element_mut()
            .ok_or(DomError::InvalidNodeType(kind))?
            .add_listener(event, handler);
        Ok(())
    }

    fn remove_event_listener(
        &mut self,
        node: &NodeId,
        event: &str,
        handler: &EventHandler,
    ) -> Result<(), DomError> {
        let target = self.tree.get_mut(*node).ok_or(DomError::NotFound(*node))?;
        let kind = target.kind_name();
        let removed = target
            .as_element_mut()
            .ok_or(DomError::InvalidNodeType(kind))?
            .remove_listener(event, handler);
        if !removed {
            tracing::debug!(event, ?node, "listener was not registered");
        }
        Ok(())
    }
}
