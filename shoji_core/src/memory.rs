// Copyright 2026 the Shoji Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory [`Document`] implementation.
//!
//! [`MemoryDocument`] keeps elements in an arena indexed by [`NodeId`]. It
//! supports the selectors the passes use (`tag`, `.class`, `tag.class`),
//! keeps inline styles apart from attributes, and stores at most one
//! activation listener per element. [`MemoryDocument::click`] fires and
//! consumes that listener, which gives the same once-only behavior the
//! browser provides.

use core::cell::RefCell;
use std::rc::Rc;

use crate::dom::{ActivationHandler, Document};
use crate::error::{DomError, EnhanceError};
use crate::markup::escape;
use crate::trace::FacadeActivated;

/// Elements that have no closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta", "source", "wbr"];

/// Handle to an element of a [`MemoryDocument`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

#[derive(Default)]
struct Node {
    tag: String,
    attributes: Vec<(String, String)>,
    style: Vec<(String, String)>,
    text: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    listener: Option<ActivationHandler>,
}

#[derive(Default)]
struct Arena {
    nodes: Vec<Node>,
}

impl Arena {
    fn node(&self, id: NodeId) -> Result<&Node, DomError> {
        self.nodes
            .get(id.0)
            .ok_or_else(|| DomError::new(format!("unknown node {}", id.0)))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, DomError> {
        self.nodes
            .get_mut(id.0)
            .ok_or_else(|| DomError::new(format!("unknown node {}", id.0)))
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, mut node: NodeId) -> bool {
        loop {
            if node == ancestor {
                return true;
            }
            match self.nodes.get(node.0).and_then(|n| n.parent) {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }

    fn detach(&mut self, id: NodeId) -> Result<(), DomError> {
        if let Some(parent) = self.node_mut(id)?.parent.take() {
            self.node_mut(parent)?.children.retain(|&child| child != id);
        }
        Ok(())
    }

    fn serialize(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.nodes.get(id.0) else {
            return;
        };
        out.push('<');
        out.push_str(&node.tag);
        for (name, value) in &node.attributes {
            out.push_str(&format!(" {name}=\"{}\"", escape(value)));
        }
        if !node.style.is_empty() {
            let css: Vec<String> = node
                .style
                .iter()
                .map(|(property, value)| format!("{property}: {value};"))
                .collect();
            out.push_str(&format!(" style=\"{}\"", escape(&css.join(" "))));
        }
        out.push('>');
        if VOID_ELEMENTS.contains(&node.tag.as_str()) {
            return;
        }
        out.push_str(&escape(&node.text));
        for &child in &node.children {
            self.serialize(child, out);
        }
        out.push_str("</");
        out.push_str(&node.tag);
        out.push('>');
    }
}

/// A document held entirely in memory.
///
/// Cloning produces another handle to the same document.
#[derive(Clone)]
pub struct MemoryDocument {
    arena: Rc<RefCell<Arena>>,
}

impl core::fmt::Debug for MemoryDocument {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MemoryDocument")
            .field("nodes_len", &self.arena.borrow().nodes.len())
            .finish_non_exhaustive()
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Creates a document containing only an empty `<body>`.
    #[must_use]
    pub fn new() -> Self {
        let mut arena = Arena::default();
        arena.nodes.push(Node {
            tag: "body".to_owned(),
            ..Node::default()
        });
        Self {
            arena: Rc::new(RefCell::new(arena)),
        }
    }

    /// Returns the `<body>` element.
    #[must_use]
    pub fn body(&self) -> NodeId {
        NodeId(0)
    }

    /// Creates an element with attributes and appends it to `parent`.
    ///
    /// # Errors
    ///
    /// Fails when `parent` is not an element of this document.
    pub fn append_new(
        &self,
        parent: NodeId,
        tag: &str,
        attributes: &[(&str, &str)],
    ) -> Result<NodeId, DomError> {
        let element = self.create_element(tag)?;
        for (name, value) in attributes {
            self.set_attribute(&element, name, value)?;
        }
        self.append_child(&parent, &element)?;
        Ok(element)
    }

    /// Returns the tag name of `element`.
    #[must_use]
    pub fn tag(&self, element: NodeId) -> Option<String> {
        self.arena.borrow().node(element).ok().map(|n| n.tag.clone())
    }

    /// Returns the text set on `element` (not including descendants).
    #[must_use]
    pub fn text(&self, element: NodeId) -> Option<String> {
        self.arena.borrow().node(element).ok().map(|n| n.text.clone())
    }

    /// Returns the names of the attributes of `element`, in the order they
    /// were first set.
    #[must_use]
    pub fn attribute_names(&self, element: NodeId) -> Vec<String> {
        self.arena.borrow().node(element).map_or_else(
            |_| Vec::new(),
            |n| n.attributes.iter().map(|(name, _)| name.clone()).collect(),
        )
    }

    /// Returns the inline style `property` of `element`.
    #[must_use]
    pub fn style(&self, element: NodeId, property: &str) -> Option<String> {
        let arena = self.arena.borrow();
        let node = arena.node(element).ok()?;
        node.style
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.clone())
    }

    /// Returns the children of `element`.
    #[must_use]
    pub fn children(&self, element: NodeId) -> Vec<NodeId> {
        self.arena
            .borrow()
            .node(element)
            .map_or_else(|_| Vec::new(), |n| n.children.clone())
    }

    /// Returns the parent of `element`, if it is attached.
    #[must_use]
    pub fn parent(&self, element: NodeId) -> Option<NodeId> {
        self.arena.borrow().node(element).ok()?.parent
    }

    /// Returns `true` if `element` is reachable from `<body>`.
    #[must_use]
    pub fn is_connected(&self, element: NodeId) -> bool {
        self.arena.borrow().is_inclusive_ancestor(self.body(), element)
    }

    /// Returns `true` if `element` still has an activation listener.
    #[must_use]
    pub fn has_listener(&self, element: NodeId) -> bool {
        self.arena
            .borrow()
            .node(element)
            .is_ok_and(|n| n.listener.is_some())
    }

    /// Dispatches a click to `element`.
    ///
    /// Runs and removes the activation listener, returning its result.
    /// Returns `None` when no listener is registered, including on every
    /// click after the first.
    pub fn click(&self, element: NodeId) -> Option<Result<FacadeActivated, EnhanceError>> {
        let handler = self.arena.borrow_mut().nodes.get_mut(element.0)?.listener.take()?;
        Some(handler())
    }

    /// Serializes `element` and its subtree as HTML.
    #[must_use]
    pub fn outer_html(&self, element: NodeId) -> String {
        let mut out = String::new();
        self.arena.borrow().serialize(element, &mut out);
        out
    }
}

/// A parsed simple selector: `tag`, `.class` or `tag.class`.
struct Selector<'a> {
    tag: Option<&'a str>,
    class: Option<&'a str>,
}

impl<'a> Selector<'a> {
    fn parse(text: &'a str) -> Result<Self, DomError> {
        let unsupported = || DomError::new(format!("unsupported selector {text:?}"));
        let (tag, class) = match text.split_once('.') {
            Some((tag, class)) => (tag, Some(class)),
            None => (text, None),
        };
        let valid = |part: &str| {
            !part.is_empty()
                && part
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        };
        if !tag.is_empty() && !valid(tag) {
            return Err(unsupported());
        }
        if class.is_some_and(|c| !valid(c)) {
            return Err(unsupported());
        }
        if tag.is_empty() && class.is_none() {
            return Err(unsupported());
        }
        Ok(Self {
            tag: (!tag.is_empty()).then_some(tag),
            class,
        })
    }

    fn matches(&self, node: &Node) -> bool {
        let tag_ok = self.tag.is_none_or(|tag| node.tag.eq_ignore_ascii_case(tag));
        let class_ok = self.class.is_none_or(|class| {
            node.attributes
                .iter()
                .find(|(name, _)| name == "class")
                .is_some_and(|(_, value)| value.split_ascii_whitespace().any(|c| c == class))
        });
        tag_ok && class_ok
    }
}

impl Document for MemoryDocument {
    type Element = NodeId;

    fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>, DomError> {
        let selector = Selector::parse(selector)?;
        let arena = self.arena.borrow();
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = arena
            .node(self.body())?
            .children
            .iter()
            .rev()
            .copied()
            .collect();
        while let Some(id) = stack.pop() {
            let node = arena.node(id)?;
            if selector.matches(node) {
                found.push(id);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        Ok(found)
    }

    fn get_attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        let arena = self.arena.borrow();
        arena
            .node(*element)
            .ok()?
            .attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    }

    fn set_attribute(&self, element: &NodeId, name: &str, value: &str) -> Result<(), DomError> {
        if name.is_empty() || name.contains(|c: char| c.is_whitespace() || c == '=' || c == '"') {
            return Err(DomError::new(format!("invalid attribute name {name:?}")));
        }
        let mut arena = self.arena.borrow_mut();
        let node = arena.node_mut(*element)?;
        match node.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => value.clone_into(existing),
            None => node.attributes.push((name.to_owned(), value.to_owned())),
        }
        Ok(())
    }

    fn set_text_content(&self, element: &NodeId, text: &str) {
        let mut arena = self.arena.borrow_mut();
        let children = match arena.node_mut(*element) {
            Ok(node) => {
                text.clone_into(&mut node.text);
                core::mem::take(&mut node.children)
            }
            Err(_) => return,
        };
        for child in children {
            if let Ok(node) = arena.node_mut(child) {
                node.parent = None;
            }
        }
    }

    fn set_style_property(
        &self,
        element: &NodeId,
        property: &str,
        value: &str,
    ) -> Result<(), DomError> {
        let mut arena = self.arena.borrow_mut();
        let node = arena.node_mut(*element)?;
        match node.style.iter_mut().find(|(name, _)| name == property) {
            Some((_, existing)) => value.clone_into(existing),
            None => node.style.push((property.to_owned(), value.to_owned())),
        }
        Ok(())
    }

    fn create_element(&self, tag: &str) -> Result<NodeId, DomError> {
        if tag.is_empty() || !tag.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-') {
            return Err(DomError::new(format!("invalid tag name {tag:?}")));
        }
        let mut arena = self.arena.borrow_mut();
        arena.nodes.push(Node {
            tag: tag.to_ascii_lowercase(),
            ..Node::default()
        });
        Ok(NodeId(arena.nodes.len() - 1))
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) -> Result<(), DomError> {
        let mut arena = self.arena.borrow_mut();
        arena.node(*parent)?;
        if arena.is_inclusive_ancestor(*child, *parent) {
            return Err(DomError::new("cannot append a node to its own subtree"));
        }
        arena.detach(*child)?;
        arena.node_mut(*parent)?.children.push(*child);
        arena.node_mut(*child)?.parent = Some(*parent);
        Ok(())
    }

    fn replace_with(&self, old: &NodeId, replacement: &NodeId) -> Result<(), DomError> {
        let mut arena = self.arena.borrow_mut();
        let parent = arena
            .node(*old)?
            .parent
            .ok_or_else(|| DomError::new("node to replace has no parent"))?;
        if arena.is_inclusive_ancestor(*replacement, parent) {
            return Err(DomError::new("cannot replace a node with its own ancestor"));
        }
        arena.detach(*replacement)?;
        let siblings = &mut arena.node_mut(parent)?.children;
        let slot = siblings
            .iter()
            .position(|&child| child == *old)
            .ok_or_else(|| DomError::new("node to replace is not a child of its parent"))?;
        siblings[slot] = *replacement;
        arena.node_mut(*old)?.parent = None;
        arena.node_mut(*replacement)?.parent = Some(parent);
        Ok(())
    }

    fn add_activation_listener(
        &self,
        element: &NodeId,
        handler: ActivationHandler,
    ) -> Result<(), DomError> {
        let mut arena = self.arena.borrow_mut();
        arena.node_mut(*element)?.listener = Some(handler);
        Ok(())
    }
}
