#![forbid(unsafe_code)]

//! Dismissal intent recognition.
//!
//! Pure predicates over host events: a backdrop click counts only when the
//! pointer's hit-tested target is the mask node itself (a press on dialog
//! content, however deep, never dismisses), and Escape counts only while
//! document focus sits inside the dialog wrapper. The typed
//! [`DismissEvent`] is what the shared close path hands to the owner;
//! closing itself stays a pure delegation and never mutates visibility.

use veil_host::event::{KeyCode, KeyEvent, PointerEvent};
use veil_host::{Document, NodeId};

/// Why the dialog asked to close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    /// Click landed on the backdrop itself.
    Overlay,
    /// Escape pressed with focus inside the dialog.
    Escape,
    /// The close affordance was activated.
    CloseButton,
}

/// Event handed to the owner's `on_close` callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DismissEvent {
    /// What triggered the dismissal.
    pub reason: DismissReason,
}

impl DismissEvent {
    /// Create a dismiss event.
    #[must_use]
    pub const fn new(reason: DismissReason) -> Self {
        Self { reason }
    }
}

/// Primary press whose target is the mask node itself.
pub(crate) fn backdrop_pressed(event: &PointerEvent, mask: NodeId) -> bool {
    event.is_primary_down() && event.target == mask
}

/// Primary press whose target is the close affordance.
pub(crate) fn closer_pressed(event: &PointerEvent, closer: NodeId) -> bool {
    event.is_primary_down() && event.target == closer
}

/// Escape press while document focus is within the wrapper subtree.
pub(crate) fn escape_within(event: &KeyEvent, doc: &Document, wrap: NodeId) -> bool {
    event.is_press(KeyCode::Escape) && doc.focus_within(wrap)
}
