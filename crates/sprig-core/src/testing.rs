//! Recording render target for unit tests

use std::collections::HashMap;

use crate::element::PropValue;
use crate::event::EventHandler;
use crate::host::RenderTarget;

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    CreateNode(usize, String),
    CreateText(usize),
    Append { parent: usize, child: usize },
    Remove { parent: usize, child: usize },
    Set { node: usize, key: String, value: PropValue },
    AddListener { node: usize, event: String, handler: EventHandler },
    RemoveListener { node: usize, event: String, handler: EventHandler },
}

#[derive(Debug, thiserror::Error)]
#[error("node {child} is not a child of {parent}")]
pub struct NotAChild {
    parent: usize,
    child: usize,
}

/// In-memory target; node 0 is the container
#[derive(Debug, Default)]
pub struct RecordingTarget {
    next: usize,
    pub ops: Vec<Op>,
    pub tags: HashMap<usize, String>,
    pub children: HashMap<usize, Vec<usize>>,
    pub props: HashMap<(usize, String), PropValue>,
    pub listeners: HashMap<(usize, String), Vec<EventHandler>>,
}

impl RecordingTarget {
    pub const CONTAINER: usize = 0;

    pub fn new() -> Self {
        let mut target = Self { next: 1, ..Default::default() };
        target.tags.insert(Self::CONTAINER, "root".into());
        target
    }

    pub fn children_of(&self, node: usize) -> Vec<usize> {
        self.children.get(&node).cloned().unwrap_or_default()
    }

    pub fn tag(&self, node: usize) -> Option<&str> {
        self.tags.get(&node).map(String::as_str)
    }

    pub fn prop(&self, node: usize, key: &str) -> Option<&PropValue> {
        self.props.get(&(node, key.to_string()))
    }

    pub fn take_ops(&mut self) -> Vec<Op> {
        std::mem::take(&mut self.ops)
    }

    fn alloc(&mut self) -> usize {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl RenderTarget for RecordingTarget {
    type Node = usize;
    type Error = NotAChild;

    fn create_node(&mut self, tag: &str) -> Result<usize, NotAChild> {
        let id = self.alloc();
        self.tags.insert(id, tag.to_string());
        self.ops.push(Op::CreateNode(id, tag.to_string()));
        Ok(id)
    }

    fn create_text_node(&mut self) -> Result<usize, NotAChild> {
        let id = self.alloc();
        self.tags.insert(id, "#text".into());
        self.ops.push(Op::CreateText(id));
        Ok(id)
    }

    fn append_child(&mut self, parent: &usize, child: &usize) -> Result<(), NotAChild> {
        self.children.entry(*parent).or_default().push(*child);
        self.ops.push(Op::Append { parent: *parent, child: *child });
        Ok(())
    }

    fn remove_child(&mut self, parent: &usize, child: &usize) -> Result<(), NotAChild> {
        let list = self.children.entry(*parent).or_default();
        let pos = list
            .iter()
            .position(|c| c == child)
            .ok_or(NotAChild { parent: *parent, child: *child })?;
        list.remove(pos);
        self.ops.push(Op::Remove { parent: *parent, child: *child });
        Ok(())
    }

    fn set_property(&mut self, node: &usize, key: &str, value: &PropValue) -> Result<(), NotAChild> {
        self.props.insert((*node, key.to_string()), value.clone());
        self.ops.push(Op::Set { node: *node, key: key.to_string(), value: value.clone() });
        Ok(())
    }

    fn add_event_listener(
        &mut self,
        node: &usize,
        event: &str,
        handler: &EventHandler,
    ) -> Result<(), NotAChild> {
        self.listeners
            .entry((*node, event.to_string()))
            .or_default()
            .push(handler.clone());
        self.ops.push(Op::AddListener {
            node: *node,
            event: event.to_string(),
            handler: handler.clone(),
        });
        Ok(())
    }

    fn remove_event_listener(
        &mut self,
        node: &usize,
        event: &str,
        handler: &EventHandler,
    ) -> Result<(), NotAChild> {
        if let Some(list) = self.listeners.get_mut(&(*node, event.to_string())) {
            list.retain(|h| !h.same_as(handler));
        }
        self.ops.push(Op::RemoveListener {
            node: *node,
            event: event.to_string(),
            handler: handler.clone(),
        });
        Ok(())
    }
}
