//! In-memory document tree.
//!
//! An arena of element and text nodes that stands in for the browser DOM.
//! Nodes are addressed by [`NodeId`]; nothing is ever freed while the
//! document lives, so ids stay valid for the page session. Detached
//! subtrees (e.g. for copy serialization) are extracted into a separate
//! `Document` instead of growing the live arena. Subtrees dropped with
//! [`Document::clear_children`] stay in the arena as unreachable nodes,
//! so each module reload grows it by the size of the regenerated canvas.

use crate::text::html_escape;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
pub enum NodeKind {
    Root,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
pub struct Element {
    pub tag: String,
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, String>,
    /// Current value of form controls (`input`, `select`).
    pub value: String,
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

/// Elements rendered on their own line by `inner_text`.
const BLOCK_TAGS: &[&str] = &[
    "div", "p", "h1", "h2", "h3", "h4", "h5", "h6", "section", "aside", "main", "header", "nav",
    "ul", "li", "br",
];

/// Elements serialized without a closing tag.
const VOID_TAGS: &[&str] = &["br", "input", "hr", "img", "meta"];

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    focused: Option<NodeId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Root,
            }],
            focused: None,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn push(&mut self, parent: Option<NodeId>, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent,
            children: Vec::new(),
            kind,
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }

    /// Append a new element under `parent`.
    pub fn create_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        self.push(
            Some(parent),
            NodeKind::Element(Element {
                tag: tag.to_string(),
                classes: Vec::new(),
                attrs: BTreeMap::new(),
                value: String::new(),
            }),
        )
    }

    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push(Some(parent), NodeKind::Text(text.to_string()))
    }

    pub fn kind(&self, node: NodeId) -> &NodeKind {
        &self.nodes[node.0].kind
    }

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        match &self.nodes[node.0].kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[node.0].kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|e| e.tag.as_str())
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// Next element sibling, skipping text nodes.
    pub fn next_element_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|&c| c == node)?;
        siblings[pos + 1..]
            .iter()
            .copied()
            .find(|&c| self.element(c).is_some())
    }

    pub fn is_descendant_of(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut cursor = self.parent(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// Detach `node` from its parent. The node stays in the arena.
    pub fn remove(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != node);
        }
        if self.focused.is_some_and(|f| f == node || self.is_descendant_of(f, node)) {
            self.focused = None;
        }
    }

    /// Detach every child of `node`.
    /// Detaches every child of `node`. The detached nodes are not reused.
    pub fn clear_children(&mut self, node: NodeId) {
        if self.focused.is_some_and(|f| self.is_descendant_of(f, node)) {
            self.focused = None;
        }
        let children = std::mem::take(&mut self.nodes[node.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
    }

    // ------------------------------------------------------------------
    // Classes and attributes
    // ------------------------------------------------------------------

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .map(|e| e.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.element_mut(node) {
            if !element.classes.iter().any(|c| c == class) {
                element.classes.push(class.to_string());
            }
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.element_mut(node) {
            element.classes.retain(|c| c != class);
        }
    }

    pub fn toggle_class(&mut self, node: NodeId, class: &str, on: bool) {
        if on {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
    }

    /// Replace the whole class list, like assigning `className`.
    pub fn set_classes(&mut self, node: NodeId, classes: &[&str]) {
        if let Some(element) = self.element_mut(node) {
            element.classes = classes.iter().map(|c| c.to_string()).collect();
        }
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)
            .and_then(|e| e.attrs.get(name))
            .map(String::as_str)
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(element) = self.element_mut(node) {
            element.attrs.insert(name.to_string(), value.to_string());
        }
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) {
        if let Some(element) = self.element_mut(node) {
            element.attrs.remove(name);
        }
    }

    pub fn id_of(&self, node: NodeId) -> Option<&str> {
        self.attr(node, "id")
    }

    pub fn value(&self, node: NodeId) -> &str {
        self.element(node).map(|e| e.value.as_str()).unwrap_or("")
    }

    pub fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(element) = self.element_mut(node) {
            element.value = value.to_string();
        }
    }

    // ------------------------------------------------------------------
    // Focus
    // ------------------------------------------------------------------

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn set_focus(&mut self, node: Option<NodeId>) {
        self.focused = node;
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// All attached descendants of `node` in document order.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    /// Descendant elements of `node` carrying `class`, in document order.
    pub fn query_class(&self, node: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(node)
            .into_iter()
            .filter(|&n| self.has_class(n, class))
            .collect()
    }

    pub fn query_first_class(&self, node: NodeId, class: &str) -> Option<NodeId> {
        self.descendants(node)
            .into_iter()
            .find(|&n| self.has_class(n, class))
    }

    pub fn query_tag(&self, node: NodeId, tag: &str) -> Option<NodeId> {
        self.descendants(node)
            .into_iter()
            .find(|&n| self.tag(n) == Some(tag))
    }

    pub fn by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|&n| self.id_of(n) == Some(id))
    }

    /// `node` itself or its nearest ancestor carrying `class`.
    pub fn closest(&self, node: NodeId, class: &str) -> Option<NodeId> {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if self.has_class(current, class) {
                return Some(current);
            }
            cursor = self.parent(current);
        }
        None
    }

    // ------------------------------------------------------------------
    // Text
    // ------------------------------------------------------------------

    pub fn text_content(&self, node: NodeId) -> String {
        match &self.nodes[node.0].kind {
            NodeKind::Text(text) => text.clone(),
            _ => {
                let mut out = String::new();
                for &child in self.children(node) {
                    out.push_str(&self.text_content(child));
                }
                out
            }
        }
    }

    /// Replace all children of `node` with a single text node.
    pub fn set_text_content(&mut self, node: NodeId, text: &str) {
        if self.element(node).is_none() {
            return;
        }
        self.clear_children(node);
        if !text.is_empty() {
            self.append_text(node, text);
        }
    }

    /// Rendered text with block elements on separate lines.
    pub fn inner_text(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.push_inner_text(node, &mut out);
        out
    }

    fn push_inner_text(&self, node: NodeId, out: &mut String) {
        match &self.nodes[node.0].kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Root => {
                for &child in self.children(node) {
                    self.push_inner_text(child, out);
                }
            }
            NodeKind::Element(element) => {
                let block = BLOCK_TAGS.contains(&element.tag.as_str());
                if block {
                    out.push('\n');
                }
                for &child in self.children(node) {
                    self.push_inner_text(child, out);
                }
                if block {
                    out.push('\n');
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Cloning and serialization
    // ------------------------------------------------------------------

    /// Copy the subtree rooted at `node` into a fresh document, under its
    /// root. Returns the document and the id of the copied `node`.
    pub fn extract(&self, node: NodeId) -> (Document, NodeId) {
        let mut out = Document::new();
        let root = out.root();
        let copied = self.copy_into(node, &mut out, root);
        (out, copied)
    }

    fn copy_into(&self, node: NodeId, target: &mut Document, parent: NodeId) -> NodeId {
        let copied = target.push(Some(parent), self.nodes[node.0].kind.clone());
        for &child in self.children(node) {
            self.copy_into(child, target, copied);
        }
        copied
    }

    /// Serialize the children of `node` as HTML.
    pub fn inner_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        for &child in self.children(node) {
            self.push_html(child, &mut out);
        }
        out
    }

    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.push_html(node, &mut out);
        out
    }

    fn push_html(&self, node: NodeId, out: &mut String) {
        match &self.nodes[node.0].kind {
            NodeKind::Root => out.push_str(&self.inner_html(node)),
            NodeKind::Text(text) => out.push_str(&html_escape(text)),
            NodeKind::Element(element) => {
                out.push('<');
                out.push_str(&element.tag);
                if !element.classes.is_empty() {
                    out.push_str(&format!(
                        r#" class="{}""#,
                        html_escape(&element.classes.join(" "))
                    ));
                }
                for (name, value) in &element.attrs {
                    out.push_str(&format!(r#" {}="{}""#, name, html_escape(value)));
                }
                if element.tag == "input" && !element.value.is_empty() {
                    out.push_str(&format!(r#" value="{}""#, html_escape(&element.value)));
                }
                out.push('>');
                if VOID_TAGS.contains(&element.tag.as_str()) {
                    return;
                }
                for &child in self.children(node) {
                    self.push_html(child, out);
                }
                out.push_str(&format!("</{}>", element.tag));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let root = doc.root();
        let card = doc.create_element(root, "div");
        doc.add_class(card, "card-module");
        doc.append_text(card, "Hello ");
        let span = doc.create_element(card, "span");
        doc.add_class(span, "manual-edit");
        doc.set_attr(span, "data-default-text", "[Cx Name]");
        doc.append_text(span, "[Cx Name]");
        let button = doc.create_element(card, "button");
        doc.append_text(button, "Reset");
        (doc, card, span, button)
    }

    #[test]
    fn test_text_content_concatenates_descendants() {
        let (doc, card, _, _) = sample();
        assert_eq!(doc.text_content(card), "Hello [Cx Name]Reset");
    }

    #[test]
    fn test_set_text_content_replaces_children() {
        let (mut doc, _, span, _) = sample();
        doc.set_text_content(span, "Alice");
        assert_eq!(doc.text_content(span), "Alice");
        doc.set_text_content(span, "");
        assert!(doc.children(span).is_empty());
    }

    #[test]
    fn test_closest_walks_ancestors() {
        let (doc, card, span, _) = sample();
        assert_eq!(doc.closest(span, "card-module"), Some(card));
        assert_eq!(doc.closest(span, "manual-edit"), Some(span));
        assert_eq!(doc.closest(card, "manual-edit"), None);
    }

    #[test]
    fn test_extract_leaves_live_tree_untouched() {
        let (doc, card, _, button) = sample();
        let (mut scratch, copy) = doc.extract(card);
        let copied_button = scratch.query_tag(copy, "button").unwrap();
        scratch.remove(copied_button);
        assert_eq!(scratch.text_content(copy), "Hello [Cx Name]");
        assert_eq!(doc.parent(button), Some(card));
    }

    #[test]
    fn test_next_element_sibling_skips_text() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = doc.create_element(root, "div");
        doc.append_text(root, "\n");
        let b = doc.create_element(root, "div");
        assert_eq!(doc.next_element_sibling(a), Some(b));
        assert_eq!(doc.next_element_sibling(b), None);
    }

    #[test]
    fn test_html_escapes_text_and_attributes() {
        let mut doc = Document::new();
        let root = doc.root();
        let p = doc.create_element(root, "p");
        doc.set_attr(p, "title", "a \"b\"");
        doc.append_text(p, "<x> & y");
        let br = doc.create_element(root, "br");
        doc.add_class(br, "gap");
        assert_eq!(
            doc.inner_html(root),
            r#"<p title="a &quot;b&quot;">&lt;x&gt; &amp; y</p><br class="gap">"#
        );
    }

    #[test]
    fn test_remove_clears_focus_inside_subtree() {
        let (mut doc, card, span, _) = sample();
        doc.set_focus(Some(span));
        doc.remove(card);
        assert_eq!(doc.focused(), None);
    }
}
