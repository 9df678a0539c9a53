//! DOM tree implementation for the Heron parser.
//!
//! This crate provides an arena-based DOM tree structure following the
//! [DOM Living Standard](https://dom.spec.whatwg.org/), plus the two textual
//! views of a tree that tooling needs: HTML serialization ([`serialize`]) and
//! the html5lib tree-construction dump format ([`dump`]).
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues. Detached
//! nodes stay in the arena; they simply have no parent.

pub mod dump;
pub mod serialize;

use serde::Serialize;

/// [§ 1.3 Namespaces](https://infra.spec.whatwg.org/#namespaces)
///
/// The namespaces the HTML parser can put on elements and attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Namespace {
    /// "The HTML namespace is `http://www.w3.org/1999/xhtml`."
    #[default]
    Html,
    /// "The MathML namespace is `http://www.w3.org/1998/Math/MathML`."
    MathMl,
    /// "The SVG namespace is `http://www.w3.org/2000/svg`."
    Svg,
    /// "The XLink namespace is `http://www.w3.org/1999/xlink`."
    XLink,
    /// "The XML namespace is `http://www.w3.org/XML/1998/namespace`."
    Xml,
    /// "The XMLNS namespace is `http://www.w3.org/2000/xmlns/`."
    Xmlns,
    /// The null namespace, used by ordinary attributes.
    None,
}

impl Namespace {
    /// The namespace URI, or the empty string for the null namespace.
    #[must_use]
    pub const fn url(self) -> &'static str {
        match self {
            Self::Html => "http://www.w3.org/1999/xhtml",
            Self::MathMl => "http://www.w3.org/1998/Math/MathML",
            Self::Svg => "http://www.w3.org/2000/svg",
            Self::XLink => "http://www.w3.org/1999/xlink",
            Self::Xml => "http://www.w3.org/XML/1998/namespace",
            Self::Xmlns => "http://www.w3.org/2000/xmlns/",
            Self::None => "",
        }
    }

    /// Look a namespace up by URI.
    #[must_use]
    pub fn from_url(url: &str) -> Option<Self> {
        [
            Self::Html,
            Self::MathMl,
            Self::Svg,
            Self::XLink,
            Self::Xml,
            Self::Xmlns,
            Self::None,
        ]
        .into_iter()
        .find(|ns| ns.url() == url)
    }
}

/// A namespace-qualified name for an element or attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualName {
    /// "An element's namespace" / "An attribute's namespace"
    pub ns: Namespace,
    /// "namespace prefix (null or a non-empty string)"
    pub prefix: Option<String>,
    /// "local name (a non-empty string)"
    pub local: String,
}

impl QualName {
    /// A name in `ns` with no prefix.
    #[must_use]
    pub fn new(ns: Namespace, local: impl Into<String>) -> Self {
        Self {
            ns,
            prefix: None,
            local: local.into(),
        }
    }

    /// An HTML-namespace element name.
    #[must_use]
    pub fn html(local: impl Into<String>) -> Self {
        Self::new(Namespace::Html, local)
    }

    /// A null-namespace attribute name.
    #[must_use]
    pub fn attribute(local: impl Into<String>) -> Self {
        Self::new(Namespace::None, local)
    }
}

/// [§ 4.9.2 Interface Attr](https://dom.spec.whatwg.org/#interface-attr)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Namespace, prefix and local name.
    pub name: QualName,
    /// "An attribute's value"
    pub value: String,
}

/// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#concept-document-mode)
///
/// "Each document has an associated mode: "no-quirks", "quirks", or
/// "limited-quirks"."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuirksMode {
    /// Standards mode.
    #[default]
    NoQuirks,
    /// Almost-standards mode.
    LimitedQuirks,
    /// Full quirks mode.
    Quirks,
}

/// A type-safe index into the DOM tree.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "Each node has an associated node document..."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Node is an abstract interface that is used by all nodes in a tree."
#[derive(Debug, Clone)]
pub struct Node {
    /// "Each node has an associated node type"
    pub node_type: NodeType,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// "An object that participates in a tree has a parent, which is either
    /// null or an object."
    pub parent: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-child)
    /// "A node has an associated list of children"
    pub children: Vec<NodeId>,
}

/// "Each node has an associated node type"
#[derive(Debug, Clone)]
pub enum NodeType {
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    Document {
        /// The document's mode, set by the tree builder from the DOCTYPE.
        quirks_mode: QuirksMode,
    },
    /// [§ 4.6 Interface DocumentType](https://dom.spec.whatwg.org/#interface-documenttype)
    Doctype(DoctypeData),
    /// [§ 4.7 Interface DocumentFragment](https://dom.spec.whatwg.org/#interface-documentfragment)
    ///
    /// Only used for template contents.
    DocumentFragment,
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    Element(ElementData),
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    Text(String),
    /// [§ 4.14 Interface Comment](https://dom.spec.whatwg.org/#interface-comment)
    Comment(String),
}

/// "Doctypes have an associated name, public ID, and system ID."
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctypeData {
    /// The doctype name, empty when the token had none.
    pub name: String,
    /// The public identifier, empty when absent.
    pub public_id: String,
    /// The system identifier, empty when absent.
    pub system_id: String,
}

/// Element-specific data.
///
/// "Elements have an associated namespace, namespace prefix, local name..."
/// and "an attribute list". Attribute order is insertion order.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Namespace, prefix and local name.
    pub name: QualName,
    /// "An element has an associated attribute list"
    pub attrs: Vec<Attribute>,
    /// [§ 4.12.3](https://html.spec.whatwg.org/multipage/scripting.html#template-contents)
    /// The fragment holding a `<template>`'s contents.
    pub template_contents: Option<NodeId>,
}

impl ElementData {
    /// "An element's local name"
    #[must_use]
    pub fn local_name(&self) -> &str {
        &self.name.local
    }

    /// "An element's namespace"
    #[must_use]
    pub const fn namespace(&self) -> Namespace {
        self.name.ns
    }

    /// Whether this is an HTML element with the given local name.
    #[must_use]
    pub fn is_html(&self, local: &str) -> bool {
        self.name.ns == Namespace::Html && self.name.local == local
    }

    /// Value of the null-namespace attribute `name`, if present.
    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.get_attribute_ns(Namespace::None, name)
    }

    /// Value of the attribute `local` in `ns`, if present.
    #[must_use]
    pub fn get_attribute_ns(&self, ns: Namespace, local: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|attr| attr.name.ns == ns && attr.name.local == local)
            .map(|attr| attr.value.as_str())
    }

    /// Whether a null-namespace attribute `name` exists.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.get_attribute(name).is_some()
    }

    /// [§ 4.9 set an attribute value](https://dom.spec.whatwg.org/#concept-element-attributes-set-value)
    ///
    /// Replaces the value of an existing attribute with the same namespace and
    /// local name, otherwise appends a new one.
    pub fn set_attribute(&mut self, name: QualName, value: String) {
        if let Some(existing) = self
            .attrs
            .iter_mut()
            .find(|attr| attr.name.ns == name.ns && attr.name.local == name.local)
        {
            existing.value = value;
        } else {
            self.attrs.push(Attribute { name, value });
        }
    }
}

/// Arena-based DOM tree with O(1) node access.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
///
/// "The DOM represents a document as a tree."
///
/// All nodes live in one vector and refer to each other by [`NodeId`].
#[derive(Debug, Clone)]
pub struct DomTree {
    /// All nodes in the tree, indexed by `NodeId`.
    /// The Document node is always at index 0 (`NodeId::ROOT`).
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new DOM tree with just the Document node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                node_type: NodeType::Document {
                    quirks_mode: QuirksMode::NoQuirks,
                },
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Get the root document node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Number of nodes ever allocated, attached or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (it always holds at least the Document).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// [§ 4.5 createElementNS](https://dom.spec.whatwg.org/#dom-document-createelementns)
    ///
    /// HTML `<template>` elements get an empty contents fragment.
    pub fn create_element(&mut self, name: QualName) -> NodeId {
        let template_contents = (name.ns == Namespace::Html && name.local == "template")
            .then(|| self.alloc(NodeType::DocumentFragment));
        self.alloc(NodeType::Element(ElementData {
            name,
            attrs: Vec::new(),
            template_contents,
        }))
    }

    /// [§ 4.5 createTextNode](https://dom.spec.whatwg.org/#dom-document-createtextnode)
    pub fn create_text(&mut self, data: &str) -> NodeId {
        self.alloc(NodeType::Text(data.to_string()))
    }

    /// [§ 4.5 createComment](https://dom.spec.whatwg.org/#dom-document-createcomment)
    pub fn create_comment(&mut self, data: &str) -> NodeId {
        self.alloc(NodeType::Comment(data.to_string()))
    }

    /// Allocate a `DocumentType` node.
    pub fn create_doctype(&mut self, doctype: DoctypeData) -> NodeId {
        self.alloc(NodeType::Doctype(doctype))
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// "To append a node to a parent, pre-insert node into parent before null."
    ///
    /// `child` is removed from its current parent first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// [§ 4.2.2 Pre-insert](https://dom.spec.whatwg.org/#concept-node-pre-insert)
    ///
    /// Inserts `child` into `parent` immediately before `reference`. If
    /// `reference` is not a child of `parent` the node is appended.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) {
        self.detach(child);
        let siblings = &mut self.nodes[parent.0].children;
        let index = siblings
            .iter()
            .position(|&id| id == reference)
            .unwrap_or(siblings.len());
        siblings.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// [§ 4.2.2 Remove](https://dom.spec.whatwg.org/#concept-node-remove)
    ///
    /// Removes `node` from its parent, if it has one.
    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|&id| id != node);
        }
    }

    /// Moves every child of `from` to the end of `to`, keeping order.
    pub fn reparent_children(&mut self, from: NodeId, to: NodeId) {
        let moved = std::mem::take(&mut self.nodes[from.0].children);
        for &child in &moved {
            self.nodes[child.0].parent = Some(to);
        }
        self.nodes[to.0].children.extend(moved);
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    fn sibling_index(&self, id: NodeId) -> Option<(NodeId, usize)> {
        let parent = self.parent(id)?;
        let index = self.children(parent).iter().position(|&c| c == id)?;
        Some((parent, index))
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let (parent, index) = self.sibling_index(id)?;
        self.children(parent).get(index + 1).copied()
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let (parent, index) = self.sibling_index(id)?;
        index
            .checked_sub(1)
            .and_then(|i| self.children(parent).get(i).copied())
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over the descendants of `id` in tree order, not including `id`.
    ///
    /// Template contents are not descendants of the template.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> DescendantIterator<'_> {
        DescendantIterator {
            tree: self,
            stack: self.children(id).iter().rev().copied().collect(),
        }
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Mutable element data if this node is an element.
    pub fn as_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(|n| match &mut n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Appends `data` to a text node. Returns `false` if `id` is not text.
    pub fn append_text(&mut self, id: NodeId, data: &str) -> bool {
        match self.get_mut(id).map(|n| &mut n.node_type) {
            Some(NodeType::Text(text)) => {
                text.push_str(data);
                true
            }
            _ => false,
        }
    }

    /// The contents fragment of an HTML `<template>` element.
    #[must_use]
    pub fn template_contents(&self, id: NodeId) -> Option<NodeId> {
        self.as_element(id).and_then(|e| e.template_contents)
    }

    /// The document's quirks mode.
    #[must_use]
    pub fn quirks_mode(&self) -> QuirksMode {
        match self.nodes[0].node_type {
            NodeType::Document { quirks_mode } => quirks_mode,
            _ => QuirksMode::NoQuirks,
        }
    }

    /// Record the document's quirks mode.
    pub fn set_quirks_mode(&mut self, mode: QuirksMode) {
        if let NodeType::Document { quirks_mode } = &mut self.nodes[0].node_type {
            *quirks_mode = mode;
        }
    }

    /// [§ 3.1.1 The document element](https://html.spec.whatwg.org/multipage/dom.html#the-html-element-2)
    ///
    /// "The document element of a document is the element whose parent is that
    /// document, if it exists; otherwise null."
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .find(|&&id| self.as_element(id).is_some())
            .copied()
    }

    /// [§ 3.1.3 The head element](https://html.spec.whatwg.org/multipage/dom.html#the-head-element-2)
    ///
    /// "The head element of a document is the first head element that is a
    /// child of the html element, if there is one, or null otherwise."
    #[must_use]
    pub fn head(&self) -> Option<NodeId> {
        self.first_html_child(&["head"])
    }

    /// [§ 3.1.3 The body element](https://html.spec.whatwg.org/multipage/dom.html#the-body-element-2)
    ///
    /// "The body element of a document is the first of the html element's children
    /// that is either a body element or a frameset element, or null if there is
    /// no such element."
    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        self.first_html_child(&["body", "frameset"])
    }

    fn first_html_child(&self, names: &[&str]) -> Option<NodeId> {
        let html = self.document_element()?;
        self.children(html)
            .iter()
            .find(|&&id| {
                self.as_element(id)
                    .is_some_and(|e| names.iter().any(|name| e.is_html(name)))
            })
            .copied()
    }

    /// Concatenated data of every text node under `id`, in tree order.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .filter_map(|node| self.as_text(node))
            .collect()
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Pre-order iterator over the descendants of a node.
pub struct DescendantIterator<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for DescendantIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
