// Copyright 2026 the Linger Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timer handles.

use core::fmt;

/// Handle to a timer scheduled on a [`TimerQueue`](crate::TimerQueue).
///
/// A handle pairs a slot index with the slot's generation at scheduling time.
/// Once the timer fires or is cancelled the slot generation advances, so a
/// stale handle can be held safely: [`TimerQueue::cancel`](crate::TimerQueue::cancel)
/// on it is a no-op and it will never match a later timer reusing the slot.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId {
    index: u32,
    generation: u32,
}

impl TimerId {
    #[inline]
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index within the owning queue.
    #[must_use]
    #[inline]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Slot generation this handle was issued for.
    #[must_use]
    #[inline]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimerId({}v{})", self.index, self.generation)
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer #{}v{}", self.index, self.generation)
    }
}
