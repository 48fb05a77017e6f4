// Copyright 2026 the Linger Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scheduling seam used by interaction state machines.

use core::time::Duration;

use crate::{TimerId, TimerQueue};

/// Something that can arm and cancel deferred wakeups.
///
/// State machines hold the returned [`TimerId`] and expect the host to hand it
/// back once the timer expires. Cancellation is synchronous: after
/// [`cancel`](Self::cancel) returns, the timer must never be delivered.
pub trait Scheduler {
    /// Current time in milliseconds on the scheduler's clock.
    fn now(&self) -> u64;

    /// Arm a timer that expires `delay` from now.
    fn schedule(&mut self, delay: Duration) -> TimerId;

    /// Cancel a timer. Returns `false` if it was no longer pending.
    fn cancel(&mut self, id: TimerId) -> bool;
}

impl<S: Scheduler + ?Sized> Scheduler for &mut S {
    fn now(&self) -> u64 {
        (**self).now()
    }

    fn schedule(&mut self, delay: Duration) -> TimerId {
        (**self).schedule(delay)
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        (**self).cancel(id)
    }
}

impl Scheduler for TimerQueue<()> {
    fn now(&self) -> u64 {
        Self::now(self)
    }

    fn schedule(&mut self, delay: Duration) -> TimerId {
        Self::schedule(self, delay, ())
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        Self::cancel(self, id).is_some()
    }
}

/// A [`TimerQueue`] borrowed together with the payload new timers should carry.
///
/// Created by [`TimerQueue::tagged`]. The payload is cloned for every timer
/// scheduled through this adapter, so hosts typically use a small `Copy` key
/// naming the widget or behavior that owns the timer.
#[derive(Debug)]
pub struct Tagged<'a, T> {
    queue: &'a mut TimerQueue<T>,
    payload: T,
}

impl<T> TimerQueue<T> {
    /// Borrow this queue as a [`Scheduler`] whose timers carry `payload`.
    ///
    /// ```rust
    /// use core::time::Duration;
    /// use linger_timing::{Scheduler, TimerQueue};
    ///
    /// let mut timers = TimerQueue::new();
    /// let id = timers.tagged(42_u32).schedule(Duration::from_millis(5));
    ///
    /// timers.advance_to(5);
    /// assert_eq!(timers.pop_expired(), Some((id, 42)));
    /// ```
    pub fn tagged(&mut self, payload: T) -> Tagged<'_, T> {
        Tagged {
            queue: self,
            payload,
        }
    }
}

impl<T> Tagged<'_, T> {
    /// The payload attached to timers scheduled through this adapter.
    pub fn payload(&self) -> &T {
        &self.payload
    }
}

impl<T: Clone> Scheduler for Tagged<'_, T> {
    fn now(&self) -> u64 {
        self.queue.now()
    }

    fn schedule(&mut self, delay: Duration) -> TimerId {
        self.queue.schedule(delay, self.payload.clone())
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.queue.cancel(id).is_some()
    }
}
