#![forbid(unsafe_code)]

//! Host tree nodes.
//!
//! A [`Node`] is one element of the host surface: a named element carrying
//! class tokens and inline style pairs for the style layer, visibility and
//! focusability flags, optional text content, and its links into the tree.
//! Nodes are addressed by [`NodeId`] handles issued by the owning
//! [`Document`](crate::Document); structural mutation (attach, move,
//! remove) goes through the document so parent/child links stay consistent.

/// Opaque handle to a node in a [`Document`](crate::Document).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub(crate) const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw id value (stable for the lifetime of the document).
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// One element of the host tree.
///
/// Style information is opaque to this crate: `classes` and `style` are
/// string tokens handed to an external style layer verbatim.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) name: String,
    pub(crate) classes: Vec<String>,
    pub(crate) style: Vec<(String, String)>,
    pub(crate) anchor: Option<String>,
    pub(crate) text: Option<String>,
    pub(crate) hidden: bool,
    pub(crate) focusable: bool,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            classes: Vec::new(),
            style: Vec::new(),
            anchor: None,
            text: None,
            hidden: false,
            focusable: false,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Element name this node was created with.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Class tokens, in the order they were added.
    #[inline]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Check for a class token.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Append a class token (duplicates are kept; the style layer decides).
    pub fn push_class(&mut self, class: impl Into<String>) {
        self.classes.push(class.into());
    }

    /// Inline style pairs, in application order.
    #[inline]
    pub fn style(&self) -> &[(String, String)] {
        &self.style
    }

    /// Value of an inline style property; later writes win.
    pub fn style_value(&self, property: &str) -> Option<&str> {
        self.style
            .iter()
            .rev()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    /// Set an inline style property (appended; last write wins).
    pub fn set_style_value(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.style.push((property.into(), value.into()));
    }

    /// Anchor string used by [`Document::query`](crate::Document::query).
    #[inline]
    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    /// Set the anchor string.
    pub fn set_anchor(&mut self, anchor: impl Into<String>) {
        self.anchor = Some(anchor.into());
    }

    /// Text content, if any.
    #[inline]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Set the text content.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    /// Whether the node is display-hidden (still present in the tree).
    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Set the display-hidden flag.
    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    /// Whether the node can receive document focus.
    #[inline]
    pub fn is_focusable(&self) -> bool {
        self.focusable
    }

    /// Set the focusable flag.
    pub fn set_focusable(&mut self, focusable: bool) {
        self.focusable = focusable;
    }

    /// Parent node, if attached.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child nodes in document order.
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}
