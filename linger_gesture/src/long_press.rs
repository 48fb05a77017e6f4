// Copyright 2026 the Linger Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Long press: tell a sustained press apart from a click.
//!
//! ## Usage
//!
//! 1) Build a [`LongPress`] with the long-press callback, optionally a click
//!    callback and a [`LongPressConfig`].
//! 2) Route the element's pointer input to it: [`LongPress::on_mouse_down`] /
//!    [`LongPress::on_touch_start`] begin a press, [`LongPress::on_mouse_up`] /
//!    [`LongPress::on_touch_end`] end it, [`LongPress::on_mouse_leave`] abandons it.
//!    [`LongPress::handle`] does the same from a tagged [`PressInput`].
//! 3) When the host's timer queue reports an expired timer owned by this
//!    instance, hand it to [`LongPress::on_timer`].
//!
//! A press that outlives [`LongPressConfig::delay`] fires the long-press
//! callback once, while still held, and the release that follows does not
//! click. A press released earlier clicks. Leaving the element never clicks.
//!
//! ## Minimal example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use linger_gesture::long_press::{LongPress, PressEvent, PressOutcome, WithoutGuard};
//! use linger_timing::TimerQueue;
//!
//! struct Pointer;
//!
//! impl PressEvent for Pointer {
//!     type Target = ();
//!     fn target(&self) -> Option<()> {
//!         None
//!     }
//! }
//!
//! let fired = Rc::new(Cell::new(0));
//! let counter = fired.clone();
//! let mut press = LongPress::new(move |_: &Pointer| counter.set(counter.get() + 1));
//! let mut cx = WithoutGuard(TimerQueue::new());
//!
//! press.on_mouse_down(Pointer, &mut cx);
//! cx.0.advance_to(300);
//! while let Some((id, ())) = cx.0.pop_expired() {
//!     press.on_timer(id);
//! }
//! assert_eq!(fired.get(), 1);
//! assert_eq!(press.on_mouse_up(&Pointer, &mut cx), PressOutcome::LongPressed);
//! ```

use alloc::boxed::Box;
use core::fmt;
use core::time::Duration;

use linger_timing::{Scheduler, TimerId, duration_to_millis};

/// Press duration after which a press counts as a long press.
pub const DEFAULT_LONG_PRESS_DELAY: Duration = Duration::from_millis(300);

/// Configuration for [`LongPress`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LongPressConfig {
    /// Install the touch-end guard on the pressed element while a press is in flight.
    ///
    /// See [`crate::touch`].
    pub prevent_default: bool,
    /// How long a press must be held to count as a long press.
    pub delay: Duration,
}

impl Default for LongPressConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LongPressConfig {
    /// Default configuration: guard enabled, [`DEFAULT_LONG_PRESS_DELAY`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            prevent_default: true,
            delay: DEFAULT_LONG_PRESS_DELAY,
        }
    }

    /// Replace the long-press delay.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Enable or disable the touch-end guard.
    #[must_use]
    pub const fn with_prevent_default(mut self, prevent_default: bool) -> Self {
        self.prevent_default = prevent_default;
        self
    }
}

/// A pointer or touch event that can begin or end a press.
pub trait PressEvent {
    /// Handle to the element the event was dispatched to.
    type Target;

    /// The element under interaction, if the event carries one.
    fn target(&self) -> Option<Self::Target>;
}

/// Host services a [`LongPress`] needs while a press is in flight.
///
/// Besides scheduling, the host owns the native touch-end listener. Every
/// attach is paired with exactly one detach on the same target, on whichever
/// path ends the press.
pub trait PressContext<T>: Scheduler {
    /// Install a touch-end listener on `target` that runs
    /// [`guard_touch_end`](crate::touch::guard_touch_end).
    fn attach_touch_end_guard(&mut self, target: &T);

    /// Remove the listener installed by [`attach_touch_end_guard`](Self::attach_touch_end_guard).
    fn detach_touch_end_guard(&mut self, target: &T);
}

impl<T, C: PressContext<T> + ?Sized> PressContext<T> for &mut C {
    fn attach_touch_end_guard(&mut self, target: &T) {
        (**self).attach_touch_end_guard(target);
    }

    fn detach_touch_end_guard(&mut self, target: &T) {
        (**self).detach_touch_end_guard(target);
    }
}

/// A [`PressContext`] for hosts without native listeners: scheduling only.
#[derive(Debug, Default)]
pub struct WithoutGuard<S>(pub S);

impl<S: Scheduler> Scheduler for WithoutGuard<S> {
    fn now(&self) -> u64 {
        self.0.now()
    }

    fn schedule(&mut self, delay: Duration) -> TimerId {
        self.0.schedule(delay)
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.0.cancel(id)
    }
}

impl<S: Scheduler, T> PressContext<T> for WithoutGuard<S> {
    fn attach_touch_end_guard(&mut self, _target: &T) {}

    fn detach_touch_end_guard(&mut self, _target: &T) {}
}

/// The pointer and touch inputs a [`LongPress`] responds to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PressInput {
    /// Mouse button pressed.
    MouseDown,
    /// First touch point landed.
    TouchStart,
    /// Mouse button released.
    MouseUp,
    /// Touch lifted.
    TouchEnd,
    /// Pointer left the element.
    MouseLeave,
}

impl PressInput {
    /// Returns `true` for inputs that begin a press.
    #[must_use]
    pub const fn is_start(self) -> bool {
        matches!(self, Self::MouseDown | Self::TouchStart)
    }

    /// Returns `true` for inputs whose release may produce a click.
    #[must_use]
    pub const fn allows_click(self) -> bool {
        matches!(self, Self::MouseUp | Self::TouchEnd)
    }
}

/// How a press ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PressOutcome {
    /// Released before the delay; the click callback ran if one is set.
    Clicked,
    /// The long-press callback already ran for this press; no click.
    LongPressed,
    /// Pointer left during a press, before the delay; neither callback ran.
    Suppressed,
}

type Callback<E> = Box<dyn FnMut(&E)>;

/// Long-press recognizer for one element.
///
/// Holds at most one pending timer. A press start while a press is already in
/// flight (for example a mouse-down during a touch hold) cancels the pending
/// press without clicking and starts over.
pub struct LongPress<E: PressEvent> {
    config: LongPressConfig,
    on_long_press: Callback<E>,
    on_click: Option<Callback<E>>,
    timer: Option<TimerId>,
    start_event: Option<E>,
    target: Option<E::Target>,
    triggered: bool,
}

impl<E: PressEvent> fmt::Debug for LongPress<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LongPress")
            .field("config", &self.config)
            .field("has_on_click", &self.on_click.is_some())
            .field("timer", &self.timer)
            .field("pressing", &self.start_event.is_some())
            .field("guarded", &self.target.is_some())
            .field("triggered", &self.triggered)
            .finish_non_exhaustive()
    }
}

impl<E: PressEvent> LongPress<E> {
    /// Create a recognizer with the default [`LongPressConfig`] and no click callback.
    ///
    /// `on_long_press` receives the event that started the press.
    pub fn new(on_long_press: impl FnMut(&E) + 'static) -> Self {
        Self {
            config: LongPressConfig::default(),
            on_long_press: Box::new(on_long_press),
            on_click: None,
            timer: None,
            start_event: None,
            target: None,
            triggered: false,
        }
    }

    /// Set the click callback. It receives the event that ended the press.
    #[must_use]
    pub fn with_click(mut self, on_click: impl FnMut(&E) + 'static) -> Self {
        self.on_click = Some(Box::new(on_click));
        self
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: LongPressConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &LongPressConfig {
        &self.config
    }

    /// Replace the configuration. A press already in flight keeps its timer.
    pub fn set_config(&mut self, config: LongPressConfig) {
        self.config = config;
    }

    /// Returns `true` between a press start and the input that ends it.
    pub fn is_pressing(&self) -> bool {
        self.start_event.is_some()
    }

    /// Returns `true` once the long-press callback has run for the current press.
    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    /// The pending long-press timer, if any.
    pub fn pending_timer(&self) -> Option<TimerId> {
        self.timer
    }

    /// The element the touch-end guard is currently attached to.
    pub fn guarded_target(&self) -> Option<&E::Target> {
        self.target.as_ref()
    }

    /// Mouse button pressed on the element.
    pub fn on_mouse_down(&mut self, event: E, cx: &mut impl PressContext<E::Target>) {
        self.start(event, cx);
    }

    /// Touch started on the element.
    pub fn on_touch_start(&mut self, event: E, cx: &mut impl PressContext<E::Target>) {
        self.start(event, cx);
    }

    /// Mouse button released over the element.
    pub fn on_mouse_up(
        &mut self,
        event: &E,
        cx: &mut impl PressContext<E::Target>,
    ) -> PressOutcome {
        self.finish(event, true, cx)
    }

    /// Touch lifted from the element.
    pub fn on_touch_end(
        &mut self,
        event: &E,
        cx: &mut impl PressContext<E::Target>,
    ) -> PressOutcome {
        self.finish(event, true, cx)
    }

    /// Pointer left the element. Ends the press without clicking.
    ///
    /// Returns `None` when no press is in flight; hover-style leaves over an
    /// idle element change nothing.
    pub fn on_mouse_leave(
        &mut self,
        event: &E,
        cx: &mut impl PressContext<E::Target>,
    ) -> Option<PressOutcome> {
        if !self.is_pressing() {
            return None;
        }
        Some(self.finish(event, false, cx))
    }

    /// Route a tagged input. Returns the outcome for inputs that end a press.
    pub fn handle(
        &mut self,
        input: PressInput,
        event: E,
        cx: &mut impl PressContext<E::Target>,
    ) -> Option<PressOutcome> {
        if input.is_start() {
            self.start(event, cx);
            None
        } else if input.allows_click() {
            Some(self.finish(&event, true, cx))
        } else {
            self.on_mouse_leave(&event, cx)
        }
    }

    /// Deliver an expired timer.
    ///
    /// Returns `true` if `id` was this instance's pending timer, in which case
    /// the long-press callback has run with the press-start event.
    pub fn on_timer(&mut self, id: TimerId) -> bool {
        if self.timer != Some(id) {
            return false;
        }
        self.timer = None;
        let Some(event) = self.start_event.as_ref() else {
            return false;
        };
        tracing::debug!(%id, "long press fired");
        (self.on_long_press)(event);
        self.triggered = true;
        true
    }

    /// Abandon any press in flight without running callbacks.
    ///
    /// Cancels the pending timer and detaches the touch-end guard. Call this
    /// when the element goes away mid-press.
    pub fn reset(&mut self, cx: &mut impl PressContext<E::Target>) {
        self.release(cx);
        self.triggered = false;
    }

    fn start(&mut self, event: E, cx: &mut impl PressContext<E::Target>) {
        if self.is_pressing() {
            tracing::debug!(
                triggered = self.triggered,
                "press started while another press is in flight; restarting"
            );
            self.release(cx);
        }
        self.triggered = false;

        if self.config.prevent_default
            && let Some(target) = event.target()
        {
            cx.attach_touch_end_guard(&target);
            self.target = Some(target);
        }

        let id = cx.schedule(self.config.delay);
        tracing::trace!(
            %id,
            delay_ms = duration_to_millis(self.config.delay),
            "long press armed"
        );
        self.timer = Some(id);
        self.start_event = Some(event);
    }

    fn finish(
        &mut self,
        event: &E,
        allow_click: bool,
        cx: &mut impl PressContext<E::Target>,
    ) -> PressOutcome {
        if let Some(id) = self.timer.take() {
            cx.cancel(id);
        }

        let outcome = if self.triggered {
            PressOutcome::LongPressed
        } else if allow_click {
            if let Some(on_click) = self.on_click.as_mut() {
                on_click(event);
            }
            PressOutcome::Clicked
        } else {
            PressOutcome::Suppressed
        };
        self.triggered = false;

        if let Some(target) = self.target.take() {
            cx.detach_touch_end_guard(&target);
        }
        self.start_event = None;
        tracing::trace!(?outcome, "press ended");
        outcome
    }

    /// Cancel the timer and detach the guard, leaving the trigger flag alone.
    fn release(&mut self, cx: &mut impl PressContext<E::Target>) {
        if let Some(id) = self.timer.take() {
            cx.cancel(id);
        }
        if let Some(target) = self.target.take() {
            cx.detach_touch_end_guard(&target);
        }
        self.start_event = None;
    }
}
