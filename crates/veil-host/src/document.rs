#![forbid(unsafe_code)]

//! The host document: node arena, tree structure, focus, and scroll state.
//!
//! A [`Document`] owns every [`Node`] and is the single place structural
//! mutation happens, so parent/child links can never disagree. It also
//! carries the two pieces of document-global state overlays care about:
//! the focused node and the body overflow style with its scroll-lock
//! capture.
//!
//! # Invariants
//!
//! 1. Every attached node's `parent` link matches exactly one `children`
//!    entry, and the body root has no parent.
//! 2. `remove` takes the whole subtree with it; handles into a removed
//!    subtree go stale and every accessor treats them as absent.
//! 3. The focused node, if any, exists and is focusable.
//! 4. At most one overflow value is captured at a time; `lock_scroll`
//!    never overwrites an outstanding capture.
//!
//! # Failure Modes
//!
//! - Structural operations on stale ids return `false` and leave the
//!   tree untouched (no panics).
//! - `append_child` refuses cycles (attaching a node under its own
//!   descendant) and refuses to move the body root.

use ahash::AHashMap;

use crate::node::{Node, NodeId};

/// Overflow style of the document body.
///
/// Treated as an opaque captured/restored value by scroll locking; only
/// `Hidden` has intrinsic meaning (the locked state).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    /// Content overflows freely (the usual resting value).
    #[default]
    Visible,
    /// Scrollbars appear as needed.
    Auto,
    /// Scrollbars always present.
    Scroll,
    /// Overflowing content is clipped; scrolling is disabled.
    Hidden,
}

/// The host document tree.
#[derive(Debug)]
pub struct Document {
    nodes: AHashMap<NodeId, Node>,
    next_id: u64,
    body: NodeId,
    focused: Option<NodeId>,
    overflow: Overflow,
    captured_overflow: Option<Overflow>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document containing only the body root.
    #[must_use]
    pub fn new() -> Self {
        let body = NodeId::from_raw(0);
        let mut nodes = AHashMap::new();
        nodes.insert(body, Node::new("body"));
        Self {
            nodes,
            next_id: 1,
            body,
            focused: None,
            overflow: Overflow::default(),
            captured_overflow: None,
        }
    }

    /// The body root node.
    #[inline]
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Number of live nodes, body included.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether `id` refers to a live node.
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Create a detached node with the given element name.
    pub fn create_node(&mut self, name: &str) -> NodeId {
        let id = NodeId::from_raw(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Node::new(name));
        id
    }

    /// Borrow a node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Mutably borrow a node.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    // --- Structure ---

    /// Attach `child` as the last child of `parent`, detaching it from its
    /// current parent first (node migration).
    ///
    /// Returns `false` without mutating when either id is stale, the child
    /// is the body root, the child equals the parent, or the move would
    /// create a cycle.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        self.insert_child(parent, child, usize::MAX)
    }

    /// Attach `child` under `parent` at `index` (clamped to the current
    /// child count), detaching it from its current parent first.
    ///
    /// Same refusal rules as [`append_child`](Self::append_child).
    pub fn insert_child(&mut self, parent: NodeId, child: NodeId, index: usize) -> bool {
        if child == self.body
            || child == parent
            || !self.contains(parent)
            || !self.contains(child)
            || self.is_within(parent, child)
        {
            return false;
        }
        self.detach(child);
        if let Some(node) = self.nodes.get_mut(&parent) {
            let index = index.min(node.children.len());
            node.children.insert(index, child);
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        true
    }

    fn detach(&mut self, id: NodeId) {
        let parent = self.nodes.get(&id).and_then(|n| n.parent);
        if let Some(parent) = parent
            && let Some(node) = self.nodes.get_mut(&parent)
        {
            node.children.retain(|c| *c != id);
        }
        if let Some(node) = self.nodes.get_mut(&id) {
            node.parent = None;
        }
    }

    /// Remove a node and its entire subtree.
    ///
    /// Focus is cleared if it was inside the removed subtree. The body root
    /// cannot be removed. Returns `false` for stale ids.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if id == self.body || !self.contains(id) {
            return false;
        }
        if let Some(focused) = self.focused
            && self.is_within(focused, id)
        {
            self.focused = None;
        }
        self.detach(id);
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                pending.extend(node.children);
            }
        }
        true
    }

    /// Whether `id` is `ancestor` or lies inside its subtree.
    pub fn is_within(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.nodes.get(&current).and_then(|n| n.parent);
        }
        false
    }

    // --- Anchors ---

    /// Find a node by anchor string.
    ///
    /// If several nodes share an anchor the one with the lowest id wins,
    /// keeping lookups deterministic.
    pub fn query(&self, anchor: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.anchor.as_deref() == Some(anchor))
            .map(|(id, _)| *id)
            .min()
    }

    // --- Focus ---

    /// Move document focus to a focusable node. Returns `false` (focus
    /// unchanged) for stale or non-focusable targets.
    pub fn focus(&mut self, id: NodeId) -> bool {
        match self.nodes.get(&id) {
            Some(node) if node.focusable => {
                self.focused = Some(id);
                true
            }
            _ => false,
        }
    }

    /// Clear document focus.
    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// The currently focused node.
    #[inline]
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Whether focus currently sits on `ancestor` or inside its subtree.
    pub fn focus_within(&self, ancestor: NodeId) -> bool {
        self.focused
            .is_some_and(|focused| self.is_within(focused, ancestor))
    }

    // --- Overflow / scroll lock ---

    /// Current body overflow style.
    #[inline]
    pub fn overflow(&self) -> Overflow {
        self.overflow
    }

    /// Set the body overflow style directly (style-layer writes).
    pub fn set_overflow(&mut self, overflow: Overflow) {
        self.overflow = overflow;
    }

    /// Whether a scroll-lock capture is outstanding.
    #[inline]
    pub fn scroll_locked(&self) -> bool {
        self.captured_overflow.is_some()
    }

    /// Capture the current overflow (only if no capture is outstanding)
    /// and force the locked value.
    ///
    /// A second lock while already locked keeps the original capture. Note
    /// this means concurrent lockers do not nest: the first unlock restores
    /// the original value for everyone.
    pub fn lock_scroll(&mut self) {
        if self.captured_overflow.is_none() {
            self.captured_overflow = Some(self.overflow);
        }
        self.overflow = Overflow::Hidden;
    }

    /// Restore the captured overflow value. A no-op when nothing is
    /// captured, so double-unlock cannot clobber later state.
    pub fn unlock_scroll(&mut self) {
        if let Some(captured) = self.captured_overflow.take() {
            self.overflow = captured;
        }
    }
}
