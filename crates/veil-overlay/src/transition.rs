#![forbid(unsafe_code)]

//! Timed enter/exit transitions for the backdrop and the dialog body.
//!
//! Two independent, identically-timed surfaces share one fixed duration
//! ([`TRANSITION_DURATION`]). Time advances through explicit
//! `tick(delta)` calls from the host event loop; those ticks are the only
//! suspension points, which makes every pending completion cancellable:
//! restarting a handle (a reversal) resets it, so a stale completion can
//! never fire after the state has moved on.
//!
//! # Invariants
//!
//! 1. A handle reports at most one completion per `start`.
//! 2. `start` while running discards the in-flight run entirely
//!    (reversal semantics: the new run gets the full duration).
//! 3. The very first run after mount animates too ("appear" semantics;
//!    nothing is skipped for initial mounts).
//!
//! # Failure Modes
//!
//! - Zero duration: the next `tick` completes immediately, even with a
//!   zero delta.
//! - `tick` on an idle handle is a no-op.

use std::time::Duration;

use tracing::trace;

/// Fixed transition time shared by the mask and the dialog body. The
/// visual styling layer is expected to animate with the same duration;
/// this core treats it as an opaque constant.
pub const TRANSITION_DURATION: Duration = Duration::from_millis(300);

/// Direction of a running transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionDirection {
    /// Surface is appearing.
    Enter,
    /// Surface is disappearing.
    Exit,
}

/// A single surface's transition handle: direction plus elapsed time.
#[derive(Debug, Clone)]
pub struct Transition {
    duration: Duration,
    direction: Option<TransitionDirection>,
    elapsed: Duration,
}

impl Transition {
    /// Create an idle handle with the given duration.
    #[must_use]
    pub const fn new(duration: Duration) -> Self {
        Self {
            duration,
            direction: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Start (or restart) a run in the given direction.
    ///
    /// Any in-flight run is discarded first, so a previously pending
    /// completion cannot fire anymore.
    pub fn start(&mut self, direction: TransitionDirection) {
        self.direction = Some(direction);
        self.elapsed = Duration::ZERO;
    }

    /// Cancel the in-flight run, if any.
    pub fn cancel(&mut self) {
        self.direction = None;
        self.elapsed = Duration::ZERO;
    }

    /// Whether a run is in flight.
    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.direction.is_some()
    }

    /// Direction of the in-flight run, if any.
    #[inline]
    #[must_use]
    pub fn direction(&self) -> Option<TransitionDirection> {
        self.direction
    }

    /// Advance the run by `delta`. Returns the direction once, at the
    /// tick where the duration elapses; `None` otherwise.
    pub fn tick(&mut self, delta: Duration) -> Option<TransitionDirection> {
        let direction = self.direction?;
        self.elapsed = self.elapsed.saturating_add(delta);
        if self.elapsed >= self.duration {
            self.direction = None;
            self.elapsed = Duration::ZERO;
            Some(direction)
        } else {
            None
        }
    }
}

/// Completions reported by one coordinator tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransitionEvents {
    /// Mask surface completion, if it finished this tick.
    pub mask: Option<TransitionDirection>,
    /// Body surface completion, if it finished this tick.
    pub body: Option<TransitionDirection>,
}

/// Drives the mask and body transitions as a pair.
///
/// The mask is always started before the body, and its completion is
/// reported first, preserving scheduling order for downstream callbacks.
/// Unmount policy is the caller's business: body-exit completion is the
/// authoritative close trigger, mask-exit completion only governs the
/// mask's own removal.
#[derive(Debug, Clone)]
pub struct TransitionCoordinator {
    mask: Transition,
    body: Transition,
}

impl Default for TransitionCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionCoordinator {
    /// Create a coordinator using [`TRANSITION_DURATION`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_duration(TRANSITION_DURATION)
    }

    /// Create a coordinator with a custom shared duration.
    #[must_use]
    pub fn with_duration(duration: Duration) -> Self {
        Self {
            mask: Transition::new(duration),
            body: Transition::new(duration),
        }
    }

    /// Start enter runs: mask first (when present), then body.
    pub fn start_enter(&mut self, with_mask: bool) {
        trace!(with_mask, "transition enter");
        if with_mask {
            self.mask.start(TransitionDirection::Enter);
        } else {
            self.mask.cancel();
        }
        self.body.start(TransitionDirection::Enter);
    }

    /// Start exit runs: mask first (when present), then body.
    pub fn start_exit(&mut self, with_mask: bool) {
        trace!(with_mask, "transition exit");
        if with_mask {
            self.mask.start(TransitionDirection::Exit);
        } else {
            self.mask.cancel();
        }
        self.body.start(TransitionDirection::Exit);
    }

    /// Cancel everything in flight (teardown path).
    pub fn cancel(&mut self) {
        self.mask.cancel();
        self.body.cancel();
    }

    /// Advance both surfaces by `delta`.
    pub fn tick(&mut self, delta: Duration) -> TransitionEvents {
        TransitionEvents {
            mask: self.mask.tick(delta),
            body: self.body.tick(delta),
        }
    }

    /// Whether the body surface is mid-transition.
    #[inline]
    #[must_use]
    pub fn body_running(&self) -> bool {
        self.body.is_running()
    }

    /// Whether neither surface is mid-transition.
    #[inline]
    #[must_use]
    pub fn is_idle(&self) -> bool {
        !self.mask.is_running() && !self.body.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const D: Duration = Duration::from_millis(300);

    // --- Transition handle ---

    #[test]
    fn completes_once_after_duration() {
        let mut t = Transition::new(D);
        t.start(TransitionDirection::Enter);
        assert_eq!(t.tick(Duration::from_millis(100)), None);
        assert_eq!(t.tick(Duration::from_millis(100)), None);
        assert_eq!(
            t.tick(Duration::from_millis(100)),
            Some(TransitionDirection::Enter)
        );
        // Completion is reported exactly once.
        assert_eq!(t.tick(Duration::from_millis(500)), None);
        assert!(!t.is_running());
    }

    #[test]
    fn restart_discards_pending_completion() {
        let mut t = Transition::new(D);
        t.start(TransitionDirection::Enter);
        t.tick(Duration::from_millis(250));

        // Reversal: the enter completion must never fire now.
        t.start(TransitionDirection::Exit);
        assert_eq!(t.direction(), Some(TransitionDirection::Exit));
        assert_eq!(t.tick(Duration::from_millis(100)), None);
        assert_eq!(
            t.tick(Duration::from_millis(200)),
            Some(TransitionDirection::Exit)
        );
    }

    #[test]
    fn cancel_silences_handle() {
        let mut t = Transition::new(D);
        t.start(TransitionDirection::Exit);
        t.tick(Duration::from_millis(299));
        t.cancel();
        assert_eq!(t.tick(Duration::from_secs(10)), None);
    }

    #[test]
    fn zero_duration_completes_on_next_tick() {
        let mut t = Transition::new(Duration::ZERO);
        t.start(TransitionDirection::Enter);
        assert_eq!(t.tick(Duration::ZERO), Some(TransitionDirection::Enter));
    }

    #[test]
    fn idle_tick_is_noop() {
        let mut t = Transition::new(D);
        assert_eq!(t.tick(Duration::from_secs(1)), None);
    }

    #[test]
    fn exact_boundary_completes() {
        let mut t = Transition::new(D);
        t.start(TransitionDirection::Enter);
        assert_eq!(t.tick(D), Some(TransitionDirection::Enter));
    }

    // --- Coordinator ---

    #[test]
    fn mask_and_body_complete_together() {
        let mut c = TransitionCoordinator::with_duration(D);
        c.start_enter(true);
        let events = c.tick(D);
        assert_eq!(events.mask, Some(TransitionDirection::Enter));
        assert_eq!(events.body, Some(TransitionDirection::Enter));
        assert!(c.is_idle());
    }

    #[test]
    fn maskless_enter_reports_body_only() {
        let mut c = TransitionCoordinator::with_duration(D);
        c.start_enter(false);
        let events = c.tick(D);
        assert_eq!(events.mask, None);
        assert_eq!(events.body, Some(TransitionDirection::Enter));
    }

    #[test]
    fn reversal_yields_single_exit_completion() {
        let mut c = TransitionCoordinator::with_duration(D);
        c.start_enter(true);
        c.tick(Duration::from_millis(150));
        c.start_exit(true);

        // Full duration again; no enter completion leaks through.
        let events = c.tick(Duration::from_millis(150));
        assert_eq!(events.body, None);
        let events = c.tick(Duration::from_millis(150));
        assert_eq!(events.mask, Some(TransitionDirection::Exit));
        assert_eq!(events.body, Some(TransitionDirection::Exit));
    }

    #[test]
    fn cancel_silences_coordinator() {
        let mut c = TransitionCoordinator::with_duration(D);
        c.start_exit(true);
        c.cancel();
        let events = c.tick(Duration::from_secs(5));
        assert_eq!(events, TransitionEvents::default());
        assert!(c.is_idle());
    }

    #[test]
    fn body_running_tracks_body_only() {
        let mut c = TransitionCoordinator::with_duration(D);
        assert!(!c.body_running());
        c.start_enter(true);
        assert!(c.body_running());
        c.tick(D);
        assert!(!c.body_running());
    }
}
