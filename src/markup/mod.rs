//! In-memory page document
//!
//! An arena-backed element tree with just enough of the DOM to drive the
//! preference renderer:
//! - lookups by id, class, attribute, and tag
//! - attribute and class mutation
//! - text content and child replacement
//!
//! Nodes detached by a replacement are returned to a free list, so
//! re-rendering a section does not grow the arena.

mod parse;
mod serialize;

pub use parse::parse;

use std::collections::HashSet;

/// Handle to a node inside a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// An element's tag and attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lowercase tag name
    pub tag: String,

    /// Attributes in source order
    pub attributes: Vec<(String, String)>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attributes: Vec::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder-style class setter
    pub fn with_class(self, class: &str) -> Self {
        self.with_attr("class", class)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attributes.retain(|(n, _)| n != name);
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    fn set_classes(&mut self, classes: Vec<String>) {
        if classes.is_empty() {
            self.remove_attr("class");
        } else {
            self.set_attr("class", &classes.join(" "));
        }
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let mut classes: Vec<String> = self.classes().map(str::to_string).collect();
        classes.push(class.to_string());
        self.set_classes(classes);
    }

    pub fn remove_class(&mut self, class: &str) {
        if !self.has_class(class) {
            return;
        }
        let classes = self
            .classes()
            .filter(|c| *c != class)
            .map(str::to_string)
            .collect();
        self.set_classes(classes);
    }
}

/// Node payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The document root
    Document,
    Element(Element),
    /// Text, stored unescaped
    Text(String),
    /// Verbatim body of `<script>` and `<style>`
    RawText(String),
    Comment(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A parsed page
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    free: Vec<NodeId>,
    root: NodeId,
    doctype: Option<String>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document containing only the root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
            }],
            free: Vec::new(),
            root: NodeId(0),
            doctype: None,
        }
    }

    /// A minimal `<html><head></head><body></body></html>` skeleton
    pub fn skeleton() -> Self {
        let mut doc = Self::new();
        doc.doctype = Some("html".to_string());
        let root = doc.root;
        let html = doc.append_element(root, Element::new("html"));
        doc.append_element(html, Element::new("head"));
        doc.append_element(html, Element::new("body"));
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn doctype(&self) -> Option<&str> {
        self.doctype.as_deref()
    }

    pub fn set_doctype(&mut self, doctype: Option<String>) {
        self.doctype = doctype;
    }

    /// Number of nodes reachable from the root, root included
    #[cfg(test)]
    pub fn live_nodes(&self) -> usize {
        self.descendants(self.root).count() + 1
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes[id.0].kind {
            NodeKind::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[id.0].kind {
            NodeKind::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Child elements, skipping text and comments
    pub fn child_elements(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(move |c| self.element(*c).is_some())
    }

    /// All descendants in document order, `id` excluded
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        Descendants { doc: self, stack }
    }

    /// The `<html>` element, if any
    pub fn document_element(&self) -> Option<NodeId> {
        self.child_elements(self.root).next()
    }

    /// First element with the given tag in document order
    pub fn first_by_tag(&self, tag: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .find(|id| self.element(*id).is_some_and(|el| el.tag == tag))
    }

    pub fn body(&self) -> Option<NodeId> {
        self.first_by_tag("body")
    }

    pub fn element_by_id(&self, element_id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .find(|id| self.element(*id).and_then(|el| el.attr("id")) == Some(element_id))
    }

    /// Descendants of `scope` carrying `class`
    pub fn by_class(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .filter(|id| self.element(*id).is_some_and(|el| el.has_class(class)))
            .collect()
    }

    /// Descendants of `scope` with the given tag
    pub fn by_tag(&self, scope: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .filter(|id| self.element(*id).is_some_and(|el| el.tag == tag))
            .collect()
    }

    /// Every element carrying attribute `name`, with its value
    pub fn with_attr(&self, name: &str) -> Vec<(NodeId, String)> {
        self.descendants(self.root)
            .filter_map(|id| {
                self.element(id)
                    .and_then(|el| el.attr(name))
                    .map(|v| (id, v.to_string()))
            })
            .collect()
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|el| el.attr(name))
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(el) = self.element_mut(id) {
            el.set_attr(name, value);
        }
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|el| el.has_class(class))
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(el) = self.element_mut(id) {
            el.add_class(class);
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(el) = self.element_mut(id) {
            el.remove_class(class);
        }
    }

    /// Flip a class, returning whether it is now present
    pub fn toggle_class(&mut self, id: NodeId, class: &str) -> bool {
        if self.has_class(id, class) {
            self.remove_class(id, class);
            false
        } else {
            self.add_class(id, class);
            true
        }
    }

    /// Concatenated text of all descendant text nodes
    #[cfg(test)]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let NodeKind::Text(t) = self.kind(id) {
            out.push_str(t);
        }
        for d in self.descendants(id) {
            if let NodeKind::Text(t) = self.kind(d) {
                out.push_str(t);
            }
        }
        out
    }

    /// Replace all children with a single text node
    pub fn set_text(&mut self, id: NodeId, text: &str) {
        self.clear_children(id);
        if !text.is_empty() {
            self.append(id, NodeKind::Text(text.to_string()));
        }
    }

    /// Create a node and append it as the last child of `parent`
    pub fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let node = Node {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        };
        let id = match self.free.pop() {
            Some(id) => {
                self.nodes[id.0] = node;
                id
            }
            None => {
                self.nodes.push(node);
                NodeId(self.nodes.len() - 1)
            }
        };
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn append_element(&mut self, parent: NodeId, element: Element) -> NodeId {
        self.append(parent, NodeKind::Element(element))
    }

    /// Append an element holding a single text node
    pub fn append_text_element(&mut self, parent: NodeId, element: Element, text: &str) -> NodeId {
        let id = self.append_element(parent, element);
        self.set_text(id, text);
        id
    }

    /// Detach and release every child of `id`
    pub fn clear_children(&mut self, id: NodeId) {
        let children = std::mem::take(&mut self.nodes[id.0].children);
        for child in children {
            self.release(child);
        }
    }

    fn release(&mut self, id: NodeId) {
        let mut stack = vec![id];
        let mut seen = HashSet::new();
        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            let node = &mut self.nodes[current.0];
            stack.append(&mut node.children);
            node.parent = None;
            node.kind = NodeKind::Text(String::new());
            self.free.push(current);
        }
    }
}

/// Pre-order iterator over a subtree
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.children(id).iter().rev().copied());
        Some(id)
    }
}
