#![forbid(unsafe_code)]

//! Debounced function wrapper.
//!
//! Collapses repeated invocations within a delay window into one trailing
//! (default) or leading call. With both edges enabled the trailing call
//! fires only when further invocations arrived during the window, so a
//! lone call is not invoked twice. The window restarts on every call:
//! the trailing edge is measured from the last call, not the first.
//! Wrap an argumentless function as `Debounce<()>`.
//!
//! Time advances through `tick(delta)` from the owning event loop, the
//! same suspension-point model the transitions use. `cancel` must be
//! invoked on teardown so a pending trailing call cannot fire after the
//! owner is gone.

use std::fmt;
use std::time::Duration;

/// Edge configuration for [`Debounce`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DebounceOptions {
    /// Fire on the first call of a burst instead of waiting.
    pub leading: bool,
    /// Fire after the delay elapses (default).
    pub trailing: bool,
}

impl Default for DebounceOptions {
    fn default() -> Self {
        Self {
            leading: false,
            trailing: true,
        }
    }
}

/// A debounced single-argument function.
pub struct Debounce<T> {
    func: Box<dyn FnMut(T)>,
    delay: Duration,
    options: DebounceOptions,
    pending: Option<T>,
    waiting: bool,
    elapsed: Duration,
}

impl<T> fmt::Debug for Debounce<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debounce")
            .field("delay", &self.delay)
            .field("options", &self.options)
            .field("waiting", &self.waiting)
            .field("has_pending", &self.pending.is_some())
            .finish()
    }
}

impl<T> Debounce<T> {
    /// Wrap `func` with trailing-edge debouncing.
    pub fn new(delay: Duration, func: impl FnMut(T) + 'static) -> Self {
        Self::with_options(delay, DebounceOptions::default(), func)
    }

    /// Wrap `func` with explicit edge options.
    pub fn with_options(
        delay: Duration,
        options: DebounceOptions,
        func: impl FnMut(T) + 'static,
    ) -> Self {
        Self {
            func: Box::new(func),
            delay,
            options,
            pending: None,
            waiting: false,
            elapsed: Duration::ZERO,
        }
    }

    /// Invoke (or schedule) the wrapped function, restarting the window.
    pub fn call(&mut self, arg: T) {
        if self.waiting {
            self.elapsed = Duration::ZERO;
            if self.options.trailing {
                self.pending = Some(arg);
            }
            return;
        }
        self.waiting = true;
        self.elapsed = Duration::ZERO;
        if self.options.leading {
            // Trailing fires later only if more calls land in the window.
            (self.func)(arg);
        } else if self.options.trailing {
            self.pending = Some(arg);
        }
    }

    /// Advance the window; fires the trailing edge when the delay elapses.
    pub fn tick(&mut self, delta: Duration) {
        if !self.waiting {
            return;
        }
        self.elapsed = self.elapsed.saturating_add(delta);
        if self.elapsed >= self.delay {
            self.waiting = false;
            self.elapsed = Duration::ZERO;
            if let Some(arg) = self.pending.take() {
                (self.func)(arg);
            }
        }
    }

    /// Drop any pending invocation and close the window. Call on teardown.
    pub fn cancel(&mut self) {
        self.waiting = false;
        self.elapsed = Duration::ZERO;
        self.pending = None;
    }

    /// Fire a pending trailing invocation immediately.
    pub fn flush(&mut self) {
        self.waiting = false;
        self.elapsed = Duration::ZERO;
        if let Some(arg) = self.pending.take() {
            (self.func)(arg);
        }
    }

    /// Whether a delay window is open.
    #[inline]
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.waiting
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const DELAY: Duration = Duration::from_millis(100);

    fn recording() -> (Rc<RefCell<Vec<u32>>>, Debounce<u32>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let debounce = Debounce::new(DELAY, move |v| sink.borrow_mut().push(v));
        (calls, debounce)
    }

    #[test]
    fn trailing_collapses_burst_to_last_args() {
        let (calls, mut d) = recording();
        d.call(1);
        d.call(2);
        d.call(3);
        assert!(calls.borrow().is_empty());

        d.tick(DELAY);
        assert_eq!(*calls.borrow(), vec![3]);
        assert!(!d.is_pending());
    }

    #[test]
    fn window_restarts_on_each_call() {
        let (calls, mut d) = recording();
        d.call(1);
        d.tick(Duration::from_millis(80));
        d.call(2);
        d.tick(Duration::from_millis(80));
        assert!(calls.borrow().is_empty(), "window restarted at second call");
        d.tick(Duration::from_millis(20));
        assert_eq!(*calls.borrow(), vec![2]);
    }

    #[test]
    fn leading_fires_immediately_once() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let options = DebounceOptions {
            leading: true,
            trailing: false,
        };
        let mut d = Debounce::with_options(DELAY, options, move |v| sink.borrow_mut().push(v));

        d.call(1);
        d.call(2);
        d.call(3);
        assert_eq!(*calls.borrow(), vec![1]);
        d.tick(DELAY);
        assert_eq!(*calls.borrow(), vec![1], "no trailing edge");

        // Window closed; a new burst leads again.
        d.call(4);
        assert_eq!(*calls.borrow(), vec![1, 4]);
    }

    #[test]
    fn leading_and_trailing_needs_second_call_for_trailing() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let options = DebounceOptions {
            leading: true,
            trailing: true,
        };
        let mut d = Debounce::with_options(DELAY, options, move |v| sink.borrow_mut().push(v));

        // Lone call: leading only.
        d.call(1);
        d.tick(DELAY);
        assert_eq!(*calls.borrow(), vec![1]);

        // Burst: leading plus trailing with the last args.
        d.call(2);
        d.call(3);
        d.tick(DELAY);
        assert_eq!(*calls.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn cancel_drops_pending() {
        let (calls, mut d) = recording();
        d.call(1);
        d.cancel();
        d.tick(Duration::from_secs(1));
        assert!(calls.borrow().is_empty());
        assert!(!d.is_pending());
    }

    #[test]
    fn flush_fires_pending_now() {
        let (calls, mut d) = recording();
        d.call(9);
        d.flush();
        assert_eq!(*calls.borrow(), vec![9]);
        // Nothing left for the timer.
        d.tick(DELAY);
        assert_eq!(*calls.borrow(), vec![9]);
    }

    #[test]
    fn flush_without_pending_is_noop() {
        let (calls, mut d) = recording();
        d.flush();
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn tick_without_calls_is_noop() {
        let (calls, mut d) = recording();
        d.tick(Duration::from_secs(5));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn zero_delay_fires_on_next_tick() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let mut d = Debounce::new(Duration::ZERO, move |v: u32| sink.borrow_mut().push(v));
        d.call(1);
        d.tick(Duration::ZERO);
        assert_eq!(*calls.borrow(), vec![1]);
    }
}
