//! Arena-backed mutable document tree
//!
//! The pipeline needs a document it can scan and then mutate after an async
//! render completes, so nodes are stable ids into an arena rather than
//! references. Parsing goes through `roxmltree`; the arena keeps only what
//! the pipeline needs per node: element name + attributes, or text.

use futures::channel::mpsc::UnboundedSender;
use indextree::{Arena, NodeId};

use crate::dom::observer::{self, Mutation, MutationSubscription};
use crate::error::DomError;

/// Payload of one document node
#[derive(Debug, Clone)]
pub enum NodeData {
    Element {
        name: String,
        /// Attributes in document/insertion order
        attrs: Vec<(String, String)>,
    },
    Text {
        text: String,
    },
}

/// A mutable XML/XHTML document.
///
/// Structural mutators notify every live [`MutationSubscription`]; queries
/// never do.
pub struct Document {
    arena: Arena<NodeData>,
    root: NodeId,
    observers: Vec<UnboundedSender<Mutation>>,
}

impl Document {
    /// Parse a document from an XML or XHTML string.
    ///
    /// Comments and processing instructions are dropped; namespace
    /// declarations are preserved as `xmlns`/`xmlns:prefix` attributes so a
    /// round trip stays well-formed.
    pub fn parse(input: &str) -> Result<Self, DomError> {
        let parsed = roxmltree::Document::parse(input)?;
        let mut arena = Arena::new();
        let root = build_subtree(&mut arena, parsed.root_element())
            .expect("root element always builds");
        Ok(Self {
            arena,
            root,
            observers: Vec::new(),
        })
    }

    /// The document's root element
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The first `<body>` element, or the root when there is none.
    ///
    /// Scratch content (the staging area) hangs off this node.
    pub fn body_or_root(&self) -> NodeId {
        self.descendants(self.root)
            .find(|&id| self.tag_name(id) == Some("body"))
            .unwrap_or(self.root)
    }

    // --- node construction ---

    /// Create a detached element node
    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.arena.new_node(NodeData::Element {
            name: name.to_string(),
            attrs: Vec::new(),
        })
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.arena.new_node(NodeData::Text {
            text: text.to_string(),
        })
    }

    // --- structural mutation ---

    /// Append `child` as the last child of `parent`
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        parent.append(child, &mut self.arena);
        self.emit(Mutation::ChildInserted {
            parent,
            node: child,
        });
    }

    /// Detach `node` (and its subtree) from its parent, if it has one
    pub fn detach(&mut self, node: NodeId) {
        let parent = self.parent(node);
        node.detach(&mut self.arena);
        if let Some(parent) = parent {
            self.emit(Mutation::ChildDetached { parent, node });
        }
    }

    /// Replace `old` with `new` in `old`'s parent.
    ///
    /// `new` is detached from wherever it currently lives first. Fails when
    /// `old` has no parent.
    pub fn replace(&mut self, old: NodeId, new: NodeId) -> Result<(), DomError> {
        let parent = self.parent(old).ok_or(DomError::MissingParent)?;
        self.detach(new);
        old.insert_after(new, &mut self.arena);
        self.emit(Mutation::ChildInserted { parent, node: new });
        self.detach(old);
        Ok(())
    }

    // --- attribute access ---

    /// Element attributes in insertion order (empty for text nodes)
    pub fn attributes(&self, node: NodeId) -> &[(String, String)] {
        match self.data(node) {
            Some(NodeData::Element { attrs, .. }) => attrs,
            _ => &[],
        }
    }

    /// Look up an attribute value
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.attributes(node)
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// An attribute parsed as a leading float (`"16px"` reads as `16.0`)
    pub fn attr_f64(&self, node: NodeId, name: &str) -> Option<f64> {
        self.attribute(node, name).and_then(parse_length)
    }

    /// Set or overwrite an attribute
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(NodeData::Element { attrs, .. }) = self.data_mut(node) {
            match attrs.iter_mut().find(|(n, _)| n == name) {
                Some(entry) => entry.1 = value.to_string(),
                None => attrs.push((name.to_string(), value.to_string())),
            }
            self.emit(Mutation::AttributeChanged {
                node,
                name: name.to_string(),
            });
        }
    }

    /// Remove an attribute if present
    pub fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let Some(NodeData::Element { attrs, .. }) = self.data_mut(node) {
            let before = attrs.len();
            attrs.retain(|(n, _)| n != name);
            if attrs.len() != before {
                self.emit(Mutation::AttributeChanged {
                    node,
                    name: name.to_string(),
                });
            }
        }
    }

    /// Whether an element's `class` attribute contains `token`
    pub fn has_class(&self, node: NodeId, token: &str) -> bool {
        self.attribute(node, "class")
            .is_some_and(|classes| classes.split_whitespace().any(|t| t == token))
    }

    // --- queries ---

    /// The node and all nodes below it, in document order
    pub fn descendants(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        node.descendants(&self.arena)
    }

    /// Direct children, in document order
    pub fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        node.children(&self.arena)
    }

    /// The node's parent, if attached
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.arena.get(node).and_then(|n| n.parent())
    }

    /// Element tag name (`None` for text nodes)
    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        match self.data(node) {
            Some(NodeData::Element { name, .. }) => Some(name),
            _ => None,
        }
    }

    /// Text node payload (`None` for elements)
    pub fn text(&self, node: NodeId) -> Option<&str> {
        match self.data(node) {
            Some(NodeData::Text { text }) => Some(text),
            _ => None,
        }
    }

    /// Concatenated text of the node's subtree
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        for id in self.descendants(node) {
            if let Some(text) = self.text(id) {
                out.push_str(text);
            }
        }
        out
    }

    /// Effective font size of an element, in pixels.
    ///
    /// An explicit `font-size` attribute on the node wins; otherwise the
    /// computed value is approximated by checking a `style` declaration and
    /// then walking up through the ancestors the same way, falling back to
    /// the conventional 16px document default.
    pub fn computed_font_size(&self, node: NodeId) -> f64 {
        if let Some(size) = self.attr_f64(node, "font-size") {
            return size;
        }
        for id in node.ancestors(&self.arena) {
            if let Some(size) = self.style_font_size(id) {
                return size;
            }
            if id != node {
                if let Some(size) = self.attr_f64(id, "font-size") {
                    return size;
                }
            }
        }
        16.0
    }

    fn style_font_size(&self, node: NodeId) -> Option<f64> {
        let style = self.attribute(node, "style")?;
        for decl in style.split(';') {
            let mut parts = decl.splitn(2, ':');
            let property = parts.next()?.trim();
            if property == "font-size" {
                return parts.next().and_then(parse_length);
            }
        }
        None
    }

    // --- observation ---

    /// Subscribe to structural mutations
    pub fn subscribe(&mut self) -> MutationSubscription {
        let (tx, subscription) = observer::channel();
        self.observers.push(tx);
        subscription
    }

    /// Number of live subscriptions
    pub fn observer_count(&mut self) -> usize {
        self.observers.retain(|tx| !tx.is_closed());
        self.observers.len()
    }

    fn emit(&mut self, mutation: Mutation) {
        self.observers
            .retain(|tx| tx.unbounded_send(mutation.clone()).is_ok());
    }

    fn data(&self, node: NodeId) -> Option<&NodeData> {
        self.arena.get(node).map(|n| n.get())
    }

    fn data_mut(&mut self, node: NodeId) -> Option<&mut NodeData> {
        self.arena.get_mut(node).map(|n| n.get_mut())
    }
}

const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

fn build_subtree(arena: &mut Arena<NodeData>, src: roxmltree::Node<'_, '_>) -> Option<NodeId> {
    if src.is_element() {
        let mut attrs = namespace_declarations(src);
        for attr in src.attributes() {
            attrs.push((attr.name().to_string(), attr.value().to_string()));
        }
        let id = arena.new_node(NodeData::Element {
            name: src.tag_name().name().to_string(),
            attrs,
        });
        for child in src.children() {
            if let Some(child_id) = build_subtree(arena, child) {
                id.append(child_id, arena);
            }
        }
        Some(id)
    } else if src.is_text() {
        src.text().map(|text| {
            arena.new_node(NodeData::Text {
                text: text.to_string(),
            })
        })
    } else {
        None
    }
}

/// Namespace bindings this element introduces, as `xmlns` attributes.
///
/// `roxmltree` reports namespaces in scope rather than declarations, so the
/// declarations are recovered by diffing against the parent's scope.
fn namespace_declarations(src: roxmltree::Node<'_, '_>) -> Vec<(String, String)> {
    let parent_scope: Vec<(Option<&str>, &str)> = src
        .parent_element()
        .map(|p| p.namespaces().map(|ns| (ns.name(), ns.uri())).collect())
        .unwrap_or_default();

    let mut out = Vec::new();
    for ns in src.namespaces() {
        if ns.uri() == XML_NS || parent_scope.contains(&(ns.name(), ns.uri())) {
            continue;
        }
        match ns.name() {
            Some(prefix) => out.push((format!("xmlns:{prefix}"), ns.uri().to_string())),
            None => out.push(("xmlns".to_string(), ns.uri().to_string())),
        }
    }
    out
}

/// Parse the leading float of a CSS-ish length, ignoring any unit suffix.
///
/// Mirrors `parseFloat`: `"16px"` is `16.0`, `".5em"` is `0.5`, `"12.5.3"`
/// is `12.5`.
pub(crate) fn parse_length(s: &str) -> Option<f64> {
    let t = s.trim();
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in t.char_indices() {
        match c {
            '0'..='9' => end = i + 1,
            '.' if !seen_dot => {
                seen_dot = true;
                end = i + c.len_utf8();
            }
            '+' | '-' if i == 0 => end = 1,
            _ => break,
        }
    }
    t[..end].parse::<f64>().ok()
}
