//! The interface tree construction uses to build a document.
//!
//! [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
//!
//! The tree builder never touches nodes directly; everything goes through
//! [`TreeSink`]. [`DomTree`] is the implementation the rest of the
//! workspace uses.

use core::fmt;

use heron_dom::{Attribute, DoctypeData, DomTree, NodeId, QualName, QuirksMode};

/// Node creation and insertion primitives.
pub trait TreeSink {
    /// Reference to a node. Cheap to clone and compare.
    type Handle: Clone + PartialEq + fmt::Debug;

    /// The Document node.
    fn document(&self) -> Self::Handle;

    /// Create a detached element. HTML `<template>` elements get their
    /// contents fragment here.
    fn create_element(&mut self, name: QualName, attributes: Vec<Attribute>) -> Self::Handle;

    /// Create a detached text node.
    fn create_text(&mut self, data: &str) -> Self::Handle;

    /// Create a detached comment node.
    fn create_comment(&mut self, data: &str) -> Self::Handle;

    /// Create a detached `DocumentType` node.
    fn create_doctype(&mut self, name: &str, public_id: &str, system_id: &str) -> Self::Handle;

    /// Append `child` to `parent`, removing it from its old parent first.
    fn append_child(&mut self, parent: &Self::Handle, child: &Self::Handle);

    /// Insert `child` into `parent` immediately before `reference`.
    fn insert_before(&mut self, parent: &Self::Handle, child: &Self::Handle, reference: &Self::Handle);

    /// Detach `node` from its parent, if any.
    fn remove_from_parent(&mut self, node: &Self::Handle);

    /// Move every child of `from` to the end of `to`.
    fn reparent_children(&mut self, from: &Self::Handle, to: &Self::Handle);

    /// Parent of `node`.
    fn parent(&self, node: &Self::Handle) -> Option<Self::Handle>;

    /// Last child of `node`.
    fn last_child(&self, node: &Self::Handle) -> Option<Self::Handle>;

    /// Sibling immediately before `node`.
    fn previous_sibling(&self, node: &Self::Handle) -> Option<Self::Handle>;

    /// Name of an element, or `None` for other nodes.
    fn element_name(&self, node: &Self::Handle) -> Option<QualName>;

    /// Whether the element has a null-namespace attribute `name`.
    fn has_attribute(&self, node: &Self::Handle, name: &str) -> bool;

    /// Value of the element's null-namespace attribute `name`.
    fn attribute(&self, node: &Self::Handle, name: &str) -> Option<String>;

    /// Add or replace an attribute.
    fn set_attribute(&mut self, node: &Self::Handle, attribute: Attribute);

    /// Append `data` to an existing text node. Returns `false` if `node` is
    /// not a text node.
    fn append_to_text(&mut self, node: &Self::Handle, data: &str) -> bool;

    /// The contents fragment of a `<template>` element.
    fn template_contents(&self, template: &Self::Handle) -> Self::Handle;

    /// Record the document's mode.
    fn set_quirks_mode(&mut self, mode: QuirksMode);

    /// [§ 13.2.6.1 Insert a character](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-character)
    ///
    /// "If there is a Text node immediately before the adjusted insertion
    /// location, then append data to that Text node's data. Otherwise, create
    /// a new Text node whose data is data."
    fn append_text(&mut self, parent: &Self::Handle, data: &str) {
        if let Some(last) = self.last_child(parent) {
            if self.append_to_text(&last, data) {
                return;
            }
        }
        let text = self.create_text(data);
        self.append_child(parent, &text);
    }

    /// Like [`TreeSink::append_text`], for a location before `reference`.
    fn insert_text_before(&mut self, parent: &Self::Handle, reference: &Self::Handle, data: &str) {
        if let Some(previous) = self.previous_sibling(reference) {
            if self.append_to_text(&previous, data) {
                return;
            }
        }
        let text = self.create_text(data);
        self.insert_before(parent, &text, reference);
    }

    /// [§ 13.2.6.4.7](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    ///
    /// "For each attribute on the token, check to see if the attribute is
    /// already present on the top element of the stack of open elements. If it
    /// is not, add the attribute and its corresponding value to that element."
    fn add_attributes_if_missing(&mut self, node: &Self::Handle, attributes: Vec<Attribute>) {
        for attribute in attributes {
            if !self.has_attribute(node, &attribute.name.local) {
                self.set_attribute(node, attribute);
            }
        }
    }
}

impl TreeSink for DomTree {
    type Handle = NodeId;

    fn document(&self) -> NodeId {
        self.root()
    }

    fn create_element(&mut self, name: QualName, attributes: Vec<Attribute>) -> NodeId {
        let id = Self::create_element(self, name);
        if let Some(element) = self.as_element_mut(id) {
            element.attrs = attributes;
        }
        id
    }

    fn create_text(&mut self, data: &str) -> NodeId {
        Self::create_text(self, data)
    }

    fn create_comment(&mut self, data: &str) -> NodeId {
        Self::create_comment(self, data)
    }

    fn create_doctype(&mut self, name: &str, public_id: &str, system_id: &str) -> NodeId {
        DomTree::create_doctype(
            self,
            DoctypeData {
                name: name.to_string(),
                public_id: public_id.to_string(),
                system_id: system_id.to_string(),
            },
        )
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) {
        Self::append_child(self, *parent, *child);
    }

    fn insert_before(&mut self, parent: &NodeId, child: &NodeId, reference: &NodeId) {
        Self::insert_before(self, *parent, *child, *reference);
    }

    fn remove_from_parent(&mut self, node: &NodeId) {
        self.detach(*node);
    }

    fn reparent_children(&mut self, from: &NodeId, to: &NodeId) {
        Self::reparent_children(self, *from, *to);
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        Self::parent(self, *node)
    }

    fn last_child(&self, node: &NodeId) -> Option<NodeId> {
        Self::last_child(self, *node)
    }

    fn previous_sibling(&self, node: &NodeId) -> Option<NodeId> {
        self.prev_sibling(*node)
    }

    fn element_name(&self, node: &NodeId) -> Option<QualName> {
        self.as_element(*node).map(|element| element.name.clone())
    }

    fn has_attribute(&self, node: &NodeId, name: &str) -> bool {
        self.as_element(*node)
            .is_some_and(|element| element.has_attribute(name))
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.as_element(*node)
            .and_then(|element| element.get_attribute(name))
            .map(str::to_string)
    }

    fn set_attribute(&mut self, node: &NodeId, attribute: Attribute) {
        if let Some(element) = self.as_element_mut(*node) {
            element.set_attribute(attribute.name, attribute.value);
        }
    }

    fn append_to_text(&mut self, node: &NodeId, data: &str) -> bool {
        Self::append_text(self, *node, data)
    }

    fn template_contents(&self, template: &NodeId) -> NodeId {
        Self::template_contents(self, *template).unwrap_or(*template)
    }

    fn set_quirks_mode(&mut self, mode: QuirksMode) {
        Self::set_quirks_mode(self, mode);
    }
}
