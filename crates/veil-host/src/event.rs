#![forbid(unsafe_code)]

//! Canonical input events.
//!
//! All events derive `Clone`, `PartialEq`, and `Eq` for use in tests and
//! pattern matching. Pointer events carry the hit-tested target node (the
//! node the pointer actually landed on), which is what dismissal logic
//! matches against; there is no synthetic bubbling in this crate.

use bitflags::bitflags;

use crate::node::NodeId;

/// Canonical input event delivered to an overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),
    /// A pointer event.
    Pointer(PointerEvent),
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,
    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with no modifiers and `Press` kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Set the modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set the event kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Whether this is a press of the given code.
    #[must_use]
    pub fn is_press(&self, code: KeyCode) -> bool {
        self.kind == KeyEventKind::Press && self.code == code
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Escape key.
    Escape,
    /// Tab key.
    Tab,
    /// Backspace key.
    Backspace,
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyEventKind {
    /// Key was pressed (the default when the source cannot distinguish).
    #[default]
    Press,
    /// Key is auto-repeating.
    Repeat,
    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys held during an event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE = 0;
        /// Shift key.
        const SHIFT = 1 << 0;
        /// Control key.
        const CTRL = 1 << 1;
        /// Alt/Option key.
        const ALT = 1 << 2;
        /// Super/Meta/Cmd key.
        const SUPER = 1 << 3;
    }
}

/// Pointer buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Primary button.
    Left,
    /// Secondary button.
    Right,
    /// Middle button.
    Middle,
}

/// The type of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    /// Button pressed.
    Down(PointerButton),
    /// Button released.
    Up(PointerButton),
}

/// A pointer event, already hit-tested against the host tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// The node the pointer landed on.
    pub target: NodeId,
    /// What the pointer did.
    pub kind: PointerEventKind,
}

impl PointerEvent {
    /// Create a pointer event.
    #[must_use]
    pub const fn new(target: NodeId, kind: PointerEventKind) -> Self {
        Self { target, kind }
    }

    /// Primary-button press on the target.
    #[must_use]
    pub const fn primary_down(target: NodeId) -> Self {
        Self::new(target, PointerEventKind::Down(PointerButton::Left))
    }

    /// Whether this is a primary-button press.
    #[must_use]
    pub const fn is_primary_down(&self) -> bool {
        matches!(self.kind, PointerEventKind::Down(PointerButton::Left))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_event_builders() {
        let event = KeyEvent::new(KeyCode::Escape)
            .with_modifiers(Modifiers::SHIFT)
            .with_kind(KeyEventKind::Release);
        assert_eq!(event.code, KeyCode::Escape);
        assert!(event.modifiers.contains(Modifiers::SHIFT));
        assert_eq!(event.kind, KeyEventKind::Release);
        assert!(!event.is_press(KeyCode::Escape));
    }

    #[test]
    fn default_kind_is_press() {
        let event = KeyEvent::new(KeyCode::Enter);
        assert_eq!(event.kind, KeyEventKind::Press);
        assert!(event.is_press(KeyCode::Enter));
        assert!(!event.is_press(KeyCode::Escape));
    }

    #[test]
    fn pointer_primary_down() {
        let target = NodeId::from_raw(3);
        let event = PointerEvent::primary_down(target);
        assert!(event.is_primary_down());
        assert_eq!(event.target, target);

        let up = PointerEvent::new(target, PointerEventKind::Up(PointerButton::Left));
        assert!(!up.is_primary_down());
        let right = PointerEvent::new(target, PointerEventKind::Down(PointerButton::Right));
        assert!(!right.is_primary_down());
    }

    #[test]
    fn modifiers_combine() {
        let mods = Modifiers::CTRL | Modifiers::ALT;
        assert!(mods.contains(Modifiers::CTRL));
        assert!(!mods.contains(Modifiers::SHIFT));
        assert_eq!(Modifiers::NONE, Modifiers::empty());
    }
}
