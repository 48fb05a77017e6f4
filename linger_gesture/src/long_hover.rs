// Copyright 2026 the Linger Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Long hover: detect a pointer dwelling on an element.
//!
//! [`LongHover`] exposes one flag, [`LongHover::is_hovered_for_time`], which
//! becomes `true` once the pointer has stayed on the element for the
//! configured time and drops back to `false` when it leaves.
//!
//! Hosts that redraw on state changes can either check the `bool` returned by
//! [`LongHover::on_timer`] and [`LongHover::on_mouse_leave`], or register an
//! observer with [`LongHover::with_observer`].
//!
//! ```
//! use core::time::Duration;
//!
//! use linger_gesture::long_hover::LongHover;
//! use linger_timing::TimerQueue;
//!
//! let mut timers = TimerQueue::new();
//! let mut hover = LongHover::new(Duration::from_millis(1_000));
//!
//! hover.on_mouse_enter(&mut timers);
//! timers.advance_to(999);
//! assert_eq!(timers.pop_expired(), None);
//!
//! timers.advance_to(1_000);
//! let (id, ()) = timers.pop_expired().unwrap();
//! assert!(hover.on_timer(id));
//! assert!(hover.is_hovered_for_time());
//!
//! assert!(hover.on_mouse_leave(&mut timers));
//! assert!(!hover.is_hovered_for_time());
//! ```

use alloc::boxed::Box;
use core::fmt;
use core::time::Duration;

use linger_timing::{Scheduler, TimerId};

/// Pointer input a [`LongHover`] responds to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HoverInput {
    /// Pointer entered the element.
    MouseEnter,
    /// Pointer left the element.
    MouseLeave,
}

/// Long-hover recognizer for one element.
pub struct LongHover {
    time: Duration,
    timer: Option<TimerId>,
    hovered: bool,
    observer: Option<Box<dyn FnMut(bool)>>,
}

impl fmt::Debug for LongHover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LongHover")
            .field("time", &self.time)
            .field("timer", &self.timer)
            .field("hovered", &self.hovered)
            .field("has_observer", &self.observer.is_some())
            .finish()
    }
}

impl LongHover {
    /// Create a recognizer that reports a long hover after `time`.
    pub fn new(time: Duration) -> Self {
        Self {
            time,
            timer: None,
            hovered: false,
            observer: None,
        }
    }

    /// Call `observer` with the new value whenever the flag changes.
    #[must_use]
    pub fn with_observer(mut self, observer: impl FnMut(bool) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Dwell time required before the flag is raised.
    pub fn time(&self) -> Duration {
        self.time
    }

    /// Replace the dwell time. A pending timer keeps its original deadline.
    pub fn set_time(&mut self, time: Duration) {
        self.time = time;
    }

    /// Returns `true` once the pointer has dwelled for [`time`](Self::time).
    pub fn is_hovered_for_time(&self) -> bool {
        self.hovered
    }

    /// The pending hover timer, if any.
    pub fn pending_timer(&self) -> Option<TimerId> {
        self.timer
    }

    /// Pointer entered the element: start the dwell timer.
    ///
    /// A pending timer is restarted. An enter while the flag is already raised
    /// changes nothing.
    pub fn on_mouse_enter(&mut self, cx: &mut impl Scheduler) {
        if self.hovered {
            return;
        }
        if let Some(id) = self.timer.take() {
            cx.cancel(id);
        }
        let id = cx.schedule(self.time);
        tracing::trace!(%id, "hover timer armed");
        self.timer = Some(id);
    }

    /// Pointer left the element: cancel the timer and lower the flag.
    ///
    /// Returns `true` if the flag changed.
    pub fn on_mouse_leave(&mut self, cx: &mut impl Scheduler) -> bool {
        if let Some(id) = self.timer.take() {
            cx.cancel(id);
        }
        self.set_hovered(false)
    }

    /// Route a tagged input. Returns `true` if the flag changed.
    pub fn handle(&mut self, input: HoverInput, cx: &mut impl Scheduler) -> bool {
        match input {
            HoverInput::MouseEnter => {
                self.on_mouse_enter(cx);
                false
            }
            HoverInput::MouseLeave => self.on_mouse_leave(cx),
        }
    }

    /// Deliver an expired timer. Returns `true` if the flag changed.
    pub fn on_timer(&mut self, id: TimerId) -> bool {
        if self.timer != Some(id) {
            return false;
        }
        self.timer = None;
        self.set_hovered(true)
    }

    /// Cancel any pending timer and lower the flag without notifying the observer.
    pub fn reset(&mut self, cx: &mut impl Scheduler) {
        if let Some(id) = self.timer.take() {
            cx.cancel(id);
        }
        self.hovered = false;
    }

    fn set_hovered(&mut self, hovered: bool) -> bool {
        if self.hovered == hovered {
            return false;
        }
        self.hovered = hovered;
        tracing::trace!(hovered, "long hover changed");
        if let Some(observer) = self.observer.as_mut() {
            observer(hovered);
        }
        true
    }
}
