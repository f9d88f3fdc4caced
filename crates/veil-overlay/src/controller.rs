#![forbid(unsafe_code)]

//! The overlay lifecycle controller.
//!
//! Owns the visibility state machine and composes the transition
//! coordinator, scroll lock, container resolution, and dismissal
//! predicates. Visibility itself is externally controlled: the owner flips
//! a boolean through [`OverlayController::set_visible`] and the controller
//! only does the transition bookkeeping that flip implies. Dismissal never
//! mutates state either: it delegates to `on_close` and the owner is
//! expected to flip the flag in response.
//!
//! # State machine
//!
//! ```text
//! Closed -> Entering -> Open -> Exiting -> Closed
//!             \________________^
//!              (reversal: visible flips back off before the enter
//!               completes; the pending completion is cancelled and the
//!               exit runs with the full duration)
//! ```
//!
//! # Invariants
//!
//! 1. `on_opened` fires exactly once per completed Entering transition,
//!    `on_closed` exactly once per completed Exiting transition.
//! 2. The scroll lock is held exactly during Entering/Open/Exiting of a
//!    modal dialog and released when Closed is reached, however it is
//!    reached.
//! 3. No callback and no side effect happens after `teardown`.

use std::time::Duration;

use tracing::{debug, trace};
use veil_host::event::{Event, KeyEvent};
use veil_host::{Document, NodeId};

use crate::config::{DialogConfig, DialogMode};
use crate::container::{ContainerTarget, ResolvedContainer};
use crate::dismiss::{DismissEvent, DismissReason, backdrop_pressed, closer_pressed, escape_within};
use crate::scroll_lock::ScrollLock;
use crate::transition::{TransitionCoordinator, TransitionDirection};

/// Where the dialog subtree is in its visible/hidden lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisibilityState {
    /// Not visible (unmounted, or mounted but display-hidden).
    #[default]
    Closed,
    /// Enter transition in flight.
    Entering,
    /// Fully visible.
    Open,
    /// Exit transition in flight.
    Exiting,
}

impl VisibilityState {
    /// Whether the subtree should currently be showing.
    #[inline]
    #[must_use]
    pub fn is_visible(self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Whether a transition is in flight.
    #[inline]
    #[must_use]
    pub fn is_animating(self) -> bool {
        matches!(self, Self::Entering | Self::Exiting)
    }
}

/// Callback surface consumed by the owning application. Every slot is
/// optional; invoking an absent slot is a silent no-op.
#[derive(Default)]
pub struct OverlayCallbacks {
    on_opened: Option<Box<dyn FnMut()>>,
    on_closed: Option<Box<dyn FnMut()>>,
    on_close: Option<Box<dyn FnMut(&DismissEvent)>>,
    on_click_overlay: Option<Box<dyn FnMut()>>,
    on_keydown_esc: Option<Box<dyn FnMut(&KeyEvent)>>,
    on_close_btn_click: Option<Box<dyn FnMut()>>,
}

impl std::fmt::Debug for OverlayCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayCallbacks")
            .field("on_opened", &self.on_opened.is_some())
            .field("on_closed", &self.on_closed.is_some())
            .field("on_close", &self.on_close.is_some())
            .field("on_click_overlay", &self.on_click_overlay.is_some())
            .field("on_keydown_esc", &self.on_keydown_esc.is_some())
            .field("on_close_btn_click", &self.on_close_btn_click.is_some())
            .finish()
    }
}

impl OverlayCallbacks {
    /// Create an empty callback set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter transition completed.
    #[must_use]
    pub fn on_opened(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_opened = Some(Box::new(f));
        self
    }

    /// Exit transition completed.
    #[must_use]
    pub fn on_closed(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_closed = Some(Box::new(f));
        self
    }

    /// Shared close path; the owner flips `visible` in response.
    #[must_use]
    pub fn on_close(mut self, f: impl FnMut(&DismissEvent) + 'static) -> Self {
        self.on_close = Some(Box::new(f));
        self
    }

    /// Backdrop was clicked.
    #[must_use]
    pub fn on_click_overlay(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_click_overlay = Some(Box::new(f));
        self
    }

    /// Escape pressed inside the dialog.
    #[must_use]
    pub fn on_keydown_esc(mut self, f: impl FnMut(&KeyEvent) + 'static) -> Self {
        self.on_keydown_esc = Some(Box::new(f));
        self
    }

    /// Close affordance activated.
    #[must_use]
    pub fn on_close_btn_click(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_close_btn_click = Some(Box::new(f));
        self
    }

    fn emit_opened(&mut self) {
        if let Some(f) = self.on_opened.as_mut() {
            f();
        }
    }

    fn emit_closed(&mut self) {
        if let Some(f) = self.on_closed.as_mut() {
            f();
        }
    }

    fn emit_close(&mut self, event: &DismissEvent) {
        if let Some(f) = self.on_close.as_mut() {
            f(event);
        }
    }

    fn emit_click_overlay(&mut self) {
        if let Some(f) = self.on_click_overlay.as_mut() {
            f();
        }
    }

    fn emit_keydown_esc(&mut self, event: &KeyEvent) {
        if let Some(f) = self.on_keydown_esc.as_mut() {
            f(event);
        }
    }

    fn emit_close_btn_click(&mut self) {
        if let Some(f) = self.on_close_btn_click.as_mut() {
            f();
        }
    }
}

/// Handles into the mounted dialog subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountedNodes {
    /// Root wrapper (receives focus, carries position/z-index).
    pub wrap: NodeId,
    /// Backdrop, present for modal dialogs with the overlay enabled.
    /// Always unmounted after its exit completes.
    pub mask: Option<NodeId>,
    /// The dialog surface.
    pub dialog: NodeId,
    /// Close affordance, when configured.
    pub closer: Option<NodeId>,
    /// Header slot node, when configured.
    pub header: Option<NodeId>,
    /// Body slot node (always present).
    pub body: NodeId,
    /// Footer slot node, when configured.
    pub footer: Option<NodeId>,
}

/// The overlay lifecycle controller.
#[derive(Debug)]
pub struct OverlayController {
    config: DialogConfig,
    container: ContainerTarget,
    anchor: Option<NodeId>,
    callbacks: OverlayCallbacks,
    state: VisibilityState,
    transitions: TransitionCoordinator,
    scroll_lock: ScrollLock,
    mounted: Option<MountedNodes>,
    prev_focus: Option<NodeId>,
}

impl OverlayController {
    /// Create a controller in the Closed state. Nothing mounts until the
    /// first `set_visible(true, ..)`.
    #[must_use]
    pub fn new(config: DialogConfig) -> Self {
        Self {
            config,
            container: ContainerTarget::default(),
            anchor: None,
            callbacks: OverlayCallbacks::default(),
            state: VisibilityState::Closed,
            transitions: TransitionCoordinator::new(),
            scroll_lock: ScrollLock::new(),
            mounted: None,
            prev_focus: None,
        }
    }

    /// Set the mount container target.
    #[must_use]
    pub fn container(mut self, container: ContainerTarget) -> Self {
        self.container = container;
        self
    }

    /// Set the logical-parent node used when the container resolves to
    /// in-place. Defaults to the document body.
    #[must_use]
    pub fn anchor(mut self, anchor: NodeId) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Set the callback surface.
    #[must_use]
    pub fn callbacks(mut self, callbacks: OverlayCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    /// Override the shared transition duration (the styling layer must
    /// agree with it).
    #[must_use]
    pub fn transition_duration(mut self, duration: Duration) -> Self {
        self.transitions = TransitionCoordinator::with_duration(duration);
        self
    }

    /// Current lifecycle state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> VisibilityState {
        self.state
    }

    /// Handles into the mounted subtree, if any.
    #[inline]
    #[must_use]
    pub fn mounted(&self) -> Option<&MountedNodes> {
        self.mounted.as_ref()
    }

    /// Whether the subtree exists in the document (visible or hidden).
    #[inline]
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// The configuration in effect.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &DialogConfig {
        &self.config
    }

    // --- Visibility flag ---

    /// React to the externally controlled visibility flag. Repeating the
    /// current value is a no-op; flipping it mid-transition reverses the
    /// transition with the full duration.
    pub fn set_visible(&mut self, visible: bool, doc: &mut Document) {
        match (visible, self.state) {
            (true, VisibilityState::Closed | VisibilityState::Exiting) => self.enter(doc),
            (false, VisibilityState::Entering | VisibilityState::Open) => self.exit(),
            _ => {}
        }
    }

    fn enter(&mut self, doc: &mut Document) {
        let fresh = self.state == VisibilityState::Closed;

        // Resolved lazily, once per mount attempt; a factory may point at
        // a different host than last time, in which case the subtree
        // migrates.
        let resolved = self.container.resolve(doc);
        let parent = self.mount_parent(doc, resolved);
        self.ensure_mounted(doc, parent);

        if self.config.mode == DialogMode::Modal
            && let Some(m) = &self.mounted
        {
            if fresh {
                self.scroll_lock.acquire(doc);
                self.prev_focus = doc.focused();
            }
            doc.focus(m.wrap);
        }

        let with_mask = self.mounted.as_ref().is_some_and(|m| m.mask.is_some());
        self.transitions.start_enter(with_mask);
        self.state = VisibilityState::Entering;
        debug!(fresh, "overlay entering");
    }

    fn exit(&mut self) {
        let with_mask = self.mounted.as_ref().is_some_and(|m| m.mask.is_some());
        self.transitions.start_exit(with_mask);
        self.state = VisibilityState::Exiting;
        debug!("overlay exiting");
    }

    fn mount_parent(&self, doc: &Document, resolved: ResolvedContainer) -> NodeId {
        match resolved {
            ResolvedContainer::Host(id) => id,
            ResolvedContainer::InPlace => self.anchor.unwrap_or_else(|| doc.body()),
        }
    }

    fn ensure_mounted(&mut self, doc: &mut Document, parent: NodeId) {
        // A host that disappeared takes our subtree with it; treat the
        // stale handles as unmounted.
        if let Some(m) = &self.mounted
            && !doc.contains(m.wrap)
        {
            self.mounted = None;
        }

        if self.mounted.is_none() {
            self.mounted = Some(build_subtree(doc, &self.config, parent));
            return;
        }
        if let Some(m) = &mut self.mounted {
            if let Some(node) = doc.node_mut(m.wrap) {
                node.set_hidden(false);
            }
            if doc.node(m.wrap).and_then(veil_host::Node::parent) != Some(parent) {
                doc.append_child(parent, m.wrap);
            }
            // The mask unmounts after every exit; re-create it in front
            // of the dialog on re-entry.
            if self.config.has_mask() && m.mask.is_none() {
                let mask = build_mask(doc, &self.config);
                doc.insert_child(m.wrap, mask, 0);
                m.mask = Some(mask);
            }
        }
    }

    // --- Time ---

    /// Advance the transition clock. Completion side effects (mask
    /// removal, hide-or-destroy, scroll unlock, `on_opened`/`on_closed`)
    /// happen here, in scheduling order.
    pub fn tick(&mut self, delta: Duration, doc: &mut Document) {
        let events = self.transitions.tick(delta);

        // Mask completions only govern the mask's own removal.
        if events.mask == Some(TransitionDirection::Exit)
            && let Some(m) = &mut self.mounted
            && let Some(mask) = m.mask.take()
        {
            doc.remove(mask);
        }

        // Body completions drive the state machine; the state guard keeps
        // a late completion from acting after the state already moved on.
        match events.body {
            Some(TransitionDirection::Enter) if self.state == VisibilityState::Entering => {
                self.state = VisibilityState::Open;
                debug!("overlay open");
                self.callbacks.emit_opened();
            }
            Some(TransitionDirection::Exit) if self.state == VisibilityState::Exiting => {
                self.finish_close(doc);
            }
            _ => {}
        }
    }

    fn finish_close(&mut self, doc: &mut Document) {
        if self.config.destroy_on_close {
            if let Some(m) = self.mounted.take() {
                doc.remove(m.wrap);
            }
        } else if let Some(m) = &self.mounted
            && let Some(node) = doc.node_mut(m.wrap)
        {
            node.set_hidden(true);
        }
        self.scroll_lock.release(doc);
        self.restore_focus(doc);
        self.state = VisibilityState::Closed;
        debug!("overlay closed");
        self.callbacks.emit_closed();
    }

    fn restore_focus(&mut self, doc: &mut Document) {
        if let Some(prev) = self.prev_focus.take()
            && doc.focus(prev)
        {
            return;
        }
        if let Some(m) = &self.mounted
            && doc.focus_within(m.wrap)
        {
            doc.blur();
        }
    }

    // --- Input ---

    /// Route an input event to the dismissal handler. Returns `true` when
    /// the event was consumed (the owner should stop its propagation).
    /// Consuming an event only ever delegates to `on_close`; visibility
    /// stays owned by the caller.
    pub fn handle_event(&mut self, event: &Event, doc: &Document) -> bool {
        if self.state == VisibilityState::Closed {
            return false;
        }
        let Some(m) = self.mounted else {
            return false;
        };

        match event {
            Event::Pointer(pointer) => {
                if let Some(mask) = m.mask
                    && backdrop_pressed(pointer, mask)
                {
                    trace!("backdrop pressed");
                    self.callbacks.emit_click_overlay();
                    self.close(DismissReason::Overlay);
                    return true;
                }
                if let Some(closer) = m.closer
                    && closer_pressed(pointer, closer)
                {
                    trace!("close affordance pressed");
                    self.callbacks.emit_close_btn_click();
                    self.close(DismissReason::CloseButton);
                    return true;
                }
                false
            }
            Event::Key(key) => {
                if escape_within(key, doc, m.wrap) {
                    trace!("escape pressed inside dialog");
                    self.callbacks.emit_keydown_esc(key);
                    self.close(DismissReason::Escape);
                    return true;
                }
                false
            }
        }
    }

    fn close(&mut self, reason: DismissReason) {
        let event = DismissEvent::new(reason);
        self.callbacks.emit_close(&event);
    }

    // --- Teardown ---

    /// Force any state to Closed: cancel pending transitions, release a
    /// held scroll lock, restore focus, and unmount the subtree. No
    /// completion callbacks fire from here, and nothing can fire later.
    pub fn teardown(&mut self, doc: &mut Document) {
        self.transitions.cancel();
        self.scroll_lock.release(doc);
        self.restore_focus(doc);
        if let Some(m) = self.mounted.take() {
            doc.remove(m.wrap);
        }
        self.state = VisibilityState::Closed;
        debug!("overlay torn down");
    }
}

// --- Subtree construction ---

fn build_mask(doc: &mut Document, config: &DialogConfig) -> NodeId {
    let mask = doc.create_node("mask");
    if let Some(node) = doc.node_mut(mask) {
        node.push_class(config.mask_class());
    }
    mask
}

fn build_subtree(doc: &mut Document, config: &DialogConfig, parent: NodeId) -> MountedNodes {
    let wrap = doc.create_node("wrapper");
    if let Some(node) = doc.node_mut(wrap) {
        for class in config.wrapper_classes() {
            node.push_class(class);
        }
        node.set_focusable(true);
        node.set_style_value(
            "position",
            match config.mode {
                DialogMode::Modal => "fixed",
                DialogMode::NonModal => "relative",
            },
        );
        if let Some(z_index) = config.z_index {
            node.set_style_value("z-index", z_index.to_string());
        }
    }

    let mask = config.has_mask().then(|| {
        let mask = build_mask(doc, config);
        doc.append_child(wrap, mask);
        mask
    });

    let dialog = doc.create_node("dialog");
    if let Some(node) = doc.node_mut(dialog) {
        for class in config.dialog_classes() {
            node.push_class(class);
        }
        if let Some(width) = config.width {
            node.set_style_value("width", width.to_string());
        }
        if let Some(height) = config.height {
            node.set_style_value("height", height.to_string());
        }
        if let Some(offset) = config.offset {
            let (top, left) = offset.resolved();
            node.set_style_value("margin-top", top.to_string());
            node.set_style_value("margin-left", left.to_string());
        }
        for (property, value) in &config.style {
            node.set_style_value(property.clone(), value.clone());
        }
    }
    doc.append_child(wrap, dialog);

    let closer = config.close_btn.clone().map(|content| {
        let closer = doc.create_node("close");
        if let Some(node) = doc.node_mut(closer) {
            node.push_class(config.slot_class("close"));
            node.set_text(content);
        }
        doc.append_child(dialog, closer);
        closer
    });

    let header = config.header.clone().map(|content| {
        let header = doc.create_node("header");
        if let Some(node) = doc.node_mut(header) {
            node.push_class(config.slot_class("header"));
            node.set_text(content);
        }
        doc.append_child(dialog, header);
        header
    });

    let body = doc.create_node("body");
    if let Some(node) = doc.node_mut(body) {
        node.push_class(config.slot_class("body"));
        if let Some(content) = config.body.clone() {
            node.set_text(content);
        }
    }
    doc.append_child(dialog, body);

    let footer = config.footer.clone().map(|content| {
        let footer = doc.create_node("footer");
        if let Some(node) = doc.node_mut(footer) {
            node.push_class(config.slot_class("footer"));
            node.set_text(content);
        }
        doc.append_child(dialog, footer);
        footer
    });

    doc.append_child(parent, wrap);

    MountedNodes {
        wrap,
        mask,
        dialog,
        closer,
        header,
        body,
        footer,
    }
}
