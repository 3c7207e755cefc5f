//! DOM tree implementation for the live stylesheet editor.
//!
//! This crate provides an arena-based DOM tree structure following the
//! [DOM Living Standard](https://dom.spec.whatwg.org/). It is the page the
//! editor loads stylesheets from and writes edits back into.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues. Nodes
//! removed from the tree stay allocated but detached, so a [`NodeId`] handed
//! out once never dangles.

use std::collections::HashMap;

/// Map of attribute names to values for an element.
pub type AttributesMap = HashMap<String, String>;

/// A type-safe index into the DOM tree.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "Each node has an associated node document..."
///
/// NodeId provides O(1) access to any node in the tree without borrowing issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Node is an abstract interface that is used by all nodes in a tree."
///
/// This node stores indices for parent/child/sibling relationships,
/// enabling O(1) traversal in any direction.
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

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-next-sibling)
    pub next_sibling: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-previous-sibling)
    pub prev_sibling: Option<NodeId>,
}

impl Node {
    fn detached(node_type: NodeType) -> Self {
        Self {
            node_type,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        }
    }
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Each node has an associated node type"
#[derive(Debug, Clone)]
pub enum NodeType {
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    Document,
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    Element(ElementData),
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    Text(String),
    /// [§ 4.7 Interface Comment](https://dom.spec.whatwg.org/#interface-comment)
    Comment(String),
}

/// Element-specific data.
///
/// NOTE: We only store tag_name (local name) and attrs. Namespaces and custom
/// elements play no part in stylesheet editing.
#[derive(Debug, Clone, Default)]
pub struct ElementData {
    /// "An element's local name"
    pub tag_name: String,
    /// "An element has an associated attribute list"
    pub attrs: AttributesMap,
}

impl ElementData {
    /// Create element data with the given local name and no attributes.
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_string(),
            attrs: AttributesMap::new(),
        }
    }

    /// Builder-style attribute setter, handy when constructing pages.
    #[must_use]
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        let _ = self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    /// Returns the attribute value if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// ASCII case-insensitive local name comparison.
    pub fn is(&self, tag: &str) -> bool {
        self.tag_name.eq_ignore_ascii_case(tag)
    }
}

/// Arena-based DOM tree with O(1) node access and traversal.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
///
/// All nodes live in a contiguous vector, using indices for all relationships.
/// The Document node is always at index 0 ([`NodeId::ROOT`]).
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new DOM tree with just the Document node.
    pub fn new() -> Self {
        DomTree {
            nodes: vec![Node::detached(NodeType::Document)],
        }
    }

    /// Create a minimal `<html><head></head><body></body></html>` document.
    pub fn with_skeleton() -> Self {
        let mut tree = Self::new();
        let html = tree.create_element(ElementData::new("html"));
        let head = tree.create_element(ElementData::new("head"));
        let body = tree.create_element(ElementData::new("body"));
        tree.append_child(NodeId::ROOT, html);
        tree.append_child(html, head);
        tree.append_child(html, body);
        tree
    }

    /// Get the root document node ID.
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Number of allocated nodes, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (should always have at least the Document).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::detached(node_type));
        id
    }

    /// [§ 4.5 createElement](https://dom.spec.whatwg.org/#dom-document-createelement)
    ///
    /// Allocate a detached element.
    pub fn create_element(&mut self, data: ElementData) -> NodeId {
        self.alloc(NodeType::Element(data))
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// "To append a node to a parent, pre-insert node into parent before null."
    ///
    /// A node that already has a parent is removed from it first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);

        let prev_last_child = self.nodes[parent.0].children.last().copied();
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);

        if let Some(prev_id) = prev_last_child {
            self.nodes[prev_id.0].next_sibling = Some(child);
            self.nodes[child.0].prev_sibling = Some(prev_id);
        }
    }

    /// [§ 4.2.2 Pre-insert](https://dom.spec.whatwg.org/#concept-node-pre-insert)
    ///
    /// Insert `new_child` into `parent` immediately before `reference`.
    /// If `reference` is not a child of `parent`, `new_child` is appended.
    pub fn insert_before(&mut self, parent: NodeId, new_child: NodeId, reference: NodeId) {
        self.detach(new_child);

        let Some(index) = self.nodes[parent.0]
            .children
            .iter()
            .position(|&id| id == reference)
        else {
            self.append_child(parent, new_child);
            return;
        };

        self.nodes[parent.0].children.insert(index, new_child);
        self.nodes[new_child.0].parent = Some(parent);

        let prev = self.nodes[reference.0].prev_sibling;
        self.nodes[new_child.0].prev_sibling = prev;
        self.nodes[new_child.0].next_sibling = Some(reference);
        self.nodes[reference.0].prev_sibling = Some(new_child);
        if let Some(prev_id) = prev {
            self.nodes[prev_id.0].next_sibling = Some(new_child);
        }
    }

    /// [§ 4.2.2 Remove](https://dom.spec.whatwg.org/#concept-node-remove)
    ///
    /// Remove `child` from `parent`. The node stays allocated but detached.
    /// Does nothing if `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        let Some(index) = self.nodes[parent.0]
            .children
            .iter()
            .position(|&id| id == child)
        else {
            return;
        };
        let _ = self.nodes[parent.0].children.remove(index);

        let prev = self.nodes[child.0].prev_sibling;
        let next = self.nodes[child.0].next_sibling;
        if let Some(prev_id) = prev {
            self.nodes[prev_id.0].next_sibling = next;
        }
        if let Some(next_id) = next {
            self.nodes[next_id.0].prev_sibling = prev;
        }

        let node = &mut self.nodes[child.0];
        node.parent = None;
        node.prev_sibling = None;
        node.next_sibling = None;
    }

    /// [§ 4.2.2 Replace](https://dom.spec.whatwg.org/#concept-node-replace)
    ///
    /// Put `new_child` where `old_child` was (same parent, same position) and
    /// detach `old_child`.
    pub fn replace_child(&mut self, parent: NodeId, new_child: NodeId, old_child: NodeId) {
        self.insert_before(parent, new_child, old_child);
        self.remove_child(parent, old_child);
    }

    /// Remove every child of `parent`, in one go.
    pub fn clear_children(&mut self, parent: NodeId) {
        for child in std::mem::take(&mut self.nodes[parent.0].children) {
            let node = &mut self.nodes[child.0];
            node.parent = None;
            node.prev_sibling = None;
            node.next_sibling = None;
        }
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.parent(id) {
            self.remove_child(parent, id);
        }
    }

    /// Get the parent of a node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Get the first child of a node.
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// Get the next sibling of a node.
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// [§ 4.4 connected](https://dom.spec.whatwg.org/#connected)
    ///
    /// "An element is connected if its shadow-including root is a document."
    pub fn is_connected(&self, id: NodeId) -> bool {
        id == NodeId::ROOT || self.ancestors(id).last() == Some(NodeId::ROOT)
    }

    /// Iterate over every node connected to the document, in tree order
    /// (pre-order, depth-first).
    pub fn iter_all(&self) -> TreeOrderIterator<'_> {
        TreeOrderIterator {
            tree: self,
            stack: vec![NodeId::ROOT],
        }
    }

    /// Get element data if this node is an element.
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get mutable element data if this node is an element.
    pub fn as_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(|n| match &mut n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Read an attribute of an element.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.as_element(id).and_then(|e| e.attr(name))
    }

    /// Set an attribute on an element. Non-elements are ignored.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(element) = self.as_element_mut(id) {
            let _ = element.attrs.insert(name.to_string(), value.to_string());
        }
    }

    /// Remove an attribute, returning whether it was present.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> bool {
        self.as_element_mut(id)
            .is_some_and(|e| e.attrs.remove(name).is_some())
    }

    /// [§ 4.4 textContent](https://dom.spec.whatwg.org/#dom-node-textcontent)
    ///
    /// For elements and the document: "the descendant text content of this".
    /// For text and comment nodes: their data.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut text = String::new();
        match self.get(id).map(|n| &n.node_type) {
            Some(NodeType::Text(data) | NodeType::Comment(data)) => text.push_str(data),
            Some(_) => self.collect_text(id, &mut text),
            None => {}
        }
        text
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        for &child in self.children(id) {
            match self.get(child).map(|n| &n.node_type) {
                Some(NodeType::Text(data)) => out.push_str(data),
                Some(NodeType::Element(_)) => self.collect_text(child, out),
                _ => {}
            }
        }
    }

    /// [§ 4.4 textContent setter](https://dom.spec.whatwg.org/#dom-node-textcontent)
    ///
    /// "String replace all with the given value within this."
    ///
    /// When the node already holds exactly one text child its data is replaced
    /// in place, so repeated writes do not grow the arena.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        if !text.is_empty()
            && let [only] = *self.children(id)
            && let Some(NodeType::Text(data)) = self.get_mut(only).map(|n| &mut n.node_type)
        {
            text.clone_into(data);
            return;
        }

        self.clear_children(id);
        if !text.is_empty() {
            let text_node = self.alloc(NodeType::Text(text.to_string()));
            self.append_child(id, text_node);
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

    /// [§ 3.1.4 The head element](https://html.spec.whatwg.org/multipage/dom.html#dom-document-head)
    ///
    /// "The head element of a document is the first head element that is a
    /// child of the html element, if there is one, or null otherwise."
    #[must_use]
    pub fn head(&self) -> Option<NodeId> {
        let html = self.document_element()?;
        self.children(html)
            .iter()
            .find(|&&id| self.as_element(id).is_some_and(|e| e.is("head")))
            .copied()
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

/// Pre-order iterator over connected nodes, starting at the document.
pub struct TreeOrderIterator<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for TreeOrderIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
