#![forbid(unsafe_code)]

//! Overlay/dialog lifecycle controller.
//!
//! `veil-overlay` drives a dialog surface through its visible/hidden
//! transition against a [`veil_host::Document`]: an optional backdrop,
//! timed enter/exit transitions, scroll locking on the host, keyboard and
//! pointer dismissal, and portal-style mounting into a resolved container.
//!
//! The controller is a *controlled* component: the owner flips a boolean
//! visibility flag and the controller only does the bookkeeping that flip
//! implies. Dismissal intents delegate back to the owner through
//! `on_close`; they never flip the flag themselves.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use veil_host::Document;
//! use veil_overlay::{DialogConfig, OverlayCallbacks, OverlayController, VisibilityState};
//!
//! let mut doc = Document::new();
//! let mut dialog = OverlayController::new(
//!     DialogConfig::new().header("Delete file?").close_btn("x"),
//! )
//! .callbacks(OverlayCallbacks::new().on_opened(|| {}));
//!
//! dialog.set_visible(true, &mut doc);
//! dialog.tick(Duration::from_millis(300), &mut doc);
//! assert_eq!(dialog.state(), VisibilityState::Open);
//! ```

pub mod config;
pub mod container;
pub mod controller;
pub mod debounce;
pub mod dismiss;
pub mod scroll_lock;
pub mod transition;

pub use config::{DialogConfig, DialogMode, Offset, Placement};
pub use container::{ContainerTarget, ResolvedContainer};
pub use controller::{MountedNodes, OverlayCallbacks, OverlayController, VisibilityState};
pub use debounce::{Debounce, DebounceOptions};
pub use dismiss::{DismissEvent, DismissReason};
pub use scroll_lock::ScrollLock;
pub use transition::{
    TRANSITION_DURATION, Transition, TransitionCoordinator, TransitionDirection, TransitionEvents,
};
