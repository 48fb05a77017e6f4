// Copyright 2026 the Linger Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timer queue: a logical clock and a set of cancellable deadlines.

use alloc::collections::BinaryHeap;
use alloc::vec::Vec;
use core::cmp::Reverse;
use core::fmt;
use core::time::Duration;

use crate::TimerId;

/// Convert a delay into whole milliseconds, rounding sub-millisecond remainders up.
///
/// Rounding up keeps the guarantee that a timer never fires before its delay.
/// Delays too large for `u64` saturate.
#[must_use]
pub fn duration_to_millis(duration: Duration) -> u64 {
    let whole = duration.as_millis();
    let rounded = if duration.subsec_nanos() % 1_000_000 == 0 {
        whole
    } else {
        whole + 1
    };
    u64::try_from(rounded).unwrap_or(u64::MAX)
}

/// Error returned when an operation targets a timer that is no longer pending.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UnknownTimer {
    /// The handle that was not found.
    pub id: TimerId,
}

impl fmt::Display for UnknownTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is not pending (already fired or cancelled)", self.id)
    }
}

impl core::error::Error for UnknownTimer {}

#[derive(Debug)]
struct Pending<T> {
    deadline: u64,
    seq: u64,
    payload: T,
}

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    pending: Option<Pending<T>>,
}

/// Heap entry. Valid only while the slot's pending timer carries the same `seq`;
/// cancelled and rescheduled timers leave stale entries that are skipped lazily.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    deadline: u64,
    seq: u64,
    index: u32,
}

/// A set of pending timers on a logical millisecond clock.
///
/// Each timer carries a payload of type `T` that comes back out when the timer
/// expires, so a single queue can serve many owners. Slots are recycled with a
/// generation bump, which keeps [`TimerId`] handles unambiguous.
///
/// ```rust
/// use core::time::Duration;
/// use linger_timing::TimerQueue;
///
/// let mut timers = TimerQueue::new();
/// let id = timers.schedule(Duration::from_millis(300), "long-press");
/// assert_eq!(timers.next_deadline(), Some(300));
///
/// timers.advance_to(299);
/// assert_eq!(timers.pop_expired(), None);
///
/// timers.advance_to(300);
/// assert_eq!(timers.pop_expired(), Some((id, "long-press")));
/// assert!(timers.is_empty());
/// ```
#[derive(Debug)]
pub struct TimerQueue<T> {
    now: u64,
    /// Sub-millisecond remainder of time passed to `advance_by`.
    carry_nanos: u32,
    next_seq: u64,
    len: usize,
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    heap: BinaryHeap<Reverse<Entry>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Create an empty queue whose clock starts at `0`.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Create an empty queue whose clock starts at `now` milliseconds.
    #[must_use]
    pub fn starting_at(now: u64) -> Self {
        Self {
            now,
            carry_nanos: 0,
            next_seq: 0,
            len: 0,
            slots: Vec::new(),
            free: Vec::new(),
            heap: BinaryHeap::new(),
        }
    }

    /// Current value of the logical clock, in milliseconds.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no timer is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Schedule `payload` to expire `delay` after the current clock value.
    pub fn schedule(&mut self, delay: Duration, payload: T) -> TimerId {
        let deadline = self.deadline_after(delay);
        self.schedule_at(deadline, payload)
    }

    /// Schedule `payload` to expire at the absolute time `deadline`.
    ///
    /// A deadline at or before [`now`](Self::now) expires on the next
    /// [`pop_expired`](Self::pop_expired).
    pub fn schedule_at(&mut self, deadline: u64, payload: T) -> TimerId {
        let seq = self.bump_seq();
        let pending = Pending {
            deadline,
            seq,
            payload,
        };
        let index = if let Some(index) = self.free.pop() {
            self.slots[index as usize].pending = Some(pending);
            index
        } else {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "more than u32::MAX simultaneous timers is not a supported configuration"
            )]
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                pending: Some(pending),
            });
            index
        };
        self.heap.push(Reverse(Entry {
            deadline,
            seq,
            index,
        }));
        self.len += 1;
        let id = TimerId::new(index, self.slots[index as usize].generation);
        tracing::trace!(%id, deadline, now = self.now, "timer scheduled");
        id
    }

    /// Cancel a pending timer, returning its payload.
    ///
    /// Returns `None` if `id` already fired or was cancelled. A cancelled timer
    /// is never returned by [`pop_expired`](Self::pop_expired).
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let pending = self.live_slot_mut(id)?.pending.take()?;
        self.release(id.index());
        tracing::trace!(%id, now = self.now, "timer cancelled");
        Some(pending.payload)
    }

    /// Move a pending timer so it expires `delay` after the current clock value.
    ///
    /// The timer keeps its handle but is ordered as if freshly scheduled among
    /// timers sharing its new deadline.
    pub fn reschedule(&mut self, id: TimerId, delay: Duration) -> Result<(), UnknownTimer> {
        let deadline = self.deadline_after(delay);
        let seq = self.bump_seq();
        let pending = self
            .live_slot_mut(id)
            .and_then(|slot| slot.pending.as_mut())
            .ok_or(UnknownTimer { id })?;
        pending.deadline = deadline;
        pending.seq = seq;
        self.heap.push(Reverse(Entry {
            deadline,
            seq,
            index: id.index(),
        }));
        tracing::trace!(%id, deadline, "timer rescheduled");
        Ok(())
    }

    /// Returns `true` if `id` is scheduled and has not fired or been cancelled.
    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.deadline(id).is_some()
    }

    /// Absolute deadline of a pending timer.
    #[must_use]
    pub fn deadline(&self, id: TimerId) -> Option<u64> {
        let slot = self.slots.get(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.pending.as_ref().map(|pending| pending.deadline)
    }

    /// Earliest deadline among pending timers.
    ///
    /// Hosts use this to decide how long the event loop may sleep.
    pub fn next_deadline(&mut self) -> Option<u64> {
        self.discard_stale();
        self.heap.peek().map(|Reverse(entry)| entry.deadline)
    }

    /// Advance the logical clock to `now`.
    ///
    /// The clock is monotonic: an earlier `now` leaves it unchanged.
    pub fn advance_to(&mut self, now: u64) {
        if now > self.now {
            self.now = now;
            self.carry_nanos = 0;
        }
    }

    /// Advance the logical clock by `elapsed`.
    ///
    /// Only whole milliseconds move the clock; the remainder is carried into
    /// the next call, so frame-sized steps never run the clock ahead of the
    /// time actually elapsed.
    pub fn advance_by(&mut self, elapsed: Duration) {
        let nanos = u128::from(self.carry_nanos) + elapsed.as_nanos();
        let whole = u64::try_from(nanos / 1_000_000).unwrap_or(u64::MAX);
        self.carry_nanos = u32::try_from(nanos % 1_000_000).unwrap_or(0);
        self.now = self.now.saturating_add(whole);
    }

    /// Pop the earliest timer whose deadline is at or before [`now`](Self::now).
    ///
    /// Timers scheduled while draining are eligible too, provided they are
    /// already due.
    pub fn pop_expired(&mut self) -> Option<(TimerId, T)> {
        self.discard_stale();
        let Reverse(entry) = *self.heap.peek()?;
        if entry.deadline > self.now {
            return None;
        }
        self.heap.pop();
        let slot = &mut self.slots[entry.index as usize];
        let id = TimerId::new(entry.index, slot.generation);
        let pending = slot.pending.take()?;
        self.release(entry.index);
        tracing::trace!(%id, deadline = entry.deadline, now = self.now, "timer fired");
        Some((id, pending.payload))
    }

    /// Advance to `now` and collect every expired timer in firing order.
    pub fn drain_expired(&mut self, now: u64) -> Vec<(TimerId, T)> {
        self.advance_to(now);
        let mut fired = Vec::new();
        while let Some(expired) = self.pop_expired() {
            fired.push(expired);
        }
        fired
    }

    /// Cancel every pending timer and drop their payloads.
    ///
    /// Outstanding handles become stale; the clock is left unchanged.
    pub fn clear(&mut self) {
        for (index, slot) in (0_u32..).zip(self.slots.iter_mut()) {
            if slot.pending.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index);
            }
        }
        self.len = 0;
        self.heap.clear();
        tracing::trace!(now = self.now, "timer queue cleared");
    }

    /// Deadline `delay` after the true current time, including the carried
    /// sub-millisecond remainder the integer clock has not caught up with yet.
    fn deadline_after(&self, delay: Duration) -> u64 {
        if delay.is_zero() {
            return self.now;
        }
        let pending = delay.saturating_add(Duration::from_nanos(u64::from(self.carry_nanos)));
        self.now.saturating_add(duration_to_millis(pending))
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    fn live_slot_mut(&mut self, id: TimerId) -> Option<&mut Slot<T>> {
        self.slots
            .get_mut(id.index() as usize)
            .filter(|slot| slot.generation == id.generation())
    }

    /// Retire a slot whose pending timer has been taken.
    fn release(&mut self, index: u32) {
        let slot = &mut self.slots[index as usize];
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(index);
        self.len -= 1;
    }

    fn discard_stale(&mut self) {
        while let Some(Reverse(entry)) = self.heap.peek() {
            let live = self.slots[entry.index as usize]
                .pending
                .as_ref()
                .is_some_and(|pending| pending.seq == entry.seq);
            if live {
                break;
            }
            self.heap.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_rounds_sub_millisecond_up() {
        assert_eq!(duration_to_millis(Duration::ZERO), 0);
        assert_eq!(duration_to_millis(Duration::from_millis(300)), 300);
        assert_eq!(duration_to_millis(Duration::from_micros(300_001)), 301);
        assert_eq!(duration_to_millis(Duration::from_nanos(1)), 1);
        assert_eq!(duration_to_millis(Duration::MAX), u64::MAX);
    }

    #[test]
    fn timer_does_not_fire_before_deadline() {
        let mut timers = TimerQueue::new();
        let id = timers.schedule(Duration::from_millis(300), ());

        timers.advance_to(299);
        assert_eq!(timers.pop_expired(), None);
        assert!(timers.is_pending(id));

        timers.advance_to(300);
        assert_eq!(timers.pop_expired(), Some((id, ())));
        assert!(!timers.is_pending(id));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut timers = TimerQueue::new();
        let id = timers.schedule(Duration::from_millis(10), 7_u32);

        assert_eq!(timers.cancel(id), Some(7));
        assert_eq!(timers.cancel(id), None);
        assert!(timers.drain_expired(1_000).is_empty());
        assert!(timers.is_empty());
    }

    #[test]
    fn stale_handle_does_not_alias_reused_slot() {
        let mut timers = TimerQueue::new();
        let old = timers.schedule(Duration::from_millis(10), "old");
        timers.cancel(old);

        let new = timers.schedule(Duration::from_millis(10), "new");
        assert_eq!(old.index(), new.index());
        assert_ne!(old, new);

        assert_eq!(timers.cancel(old), None);
        assert!(timers.is_pending(new));
    }

    #[test]
    fn equal_deadlines_fire_in_scheduling_order() {
        let mut timers = TimerQueue::new();
        timers.schedule(Duration::from_millis(5), 'a');
        timers.schedule(Duration::from_millis(5), 'b');
        timers.schedule(Duration::from_millis(1), 'c');

        let order: Vec<char> = timers
            .drain_expired(5)
            .into_iter()
            .map(|(_, payload)| payload)
            .collect();
        assert_eq!(order, ['c', 'a', 'b']);
    }

    #[test]
    fn clock_is_monotonic() {
        let mut timers = TimerQueue::<()>::starting_at(1_000);
        timers.advance_to(500);
        assert_eq!(timers.now(), 1_000);
        timers.advance_by(Duration::from_millis(20));
        assert_eq!(timers.now(), 1_020);
    }

    #[test]
    fn advance_by_carries_sub_millisecond_remainder() {
        let mut timers = TimerQueue::<()>::new();
        timers.advance_by(Duration::from_micros(600));
        assert_eq!(timers.now(), 0);
        timers.advance_by(Duration::from_micros(600));
        assert_eq!(timers.now(), 1);
        timers.advance_by(Duration::from_micros(800));
        assert_eq!(timers.now(), 2);

        // An absolute jump lands on a whole millisecond.
        timers.advance_by(Duration::from_micros(900));
        timers.advance_to(10);
        timers.advance_by(Duration::from_micros(200));
        assert_eq!(timers.now(), 10);
    }

    #[test]
    fn frame_steps_never_fire_early() {
        let frame = Duration::from_nanos(16_666_667);
        let delay = Duration::from_millis(1_000);
        let mut timers = TimerQueue::new();
        let id = timers.schedule(delay, ());

        let mut elapsed = Duration::ZERO;
        loop {
            timers.advance_by(frame);
            elapsed += frame;
            if let Some((fired, ())) = timers.pop_expired() {
                assert_eq!(fired, id);
                break;
            }
        }
        assert!(elapsed >= delay, "fired after only {elapsed:?}");
        assert!(elapsed < delay + frame, "fired late, after {elapsed:?}");
    }

    #[test]
    fn schedule_mid_millisecond_counts_the_carried_remainder() {
        let mut timers = TimerQueue::new();
        timers.advance_by(Duration::from_micros(700));
        let id = timers.schedule(Duration::from_millis(2), ());
        assert_eq!(timers.deadline(id), Some(3));

        // 1.3 ms of real time later the clock reads 2, and only 1.3 ms of
        // the 2 ms delay have passed.
        timers.advance_by(Duration::from_micros(1_300));
        assert_eq!(timers.now(), 2);
        assert_eq!(timers.pop_expired(), None);
    }

    #[test]
    fn reschedule_moves_deadline() {
        let mut timers = TimerQueue::new();
        let id = timers.schedule(Duration::from_millis(100), ());
        timers.advance_to(50);
        timers.reschedule(id, Duration::from_millis(100)).unwrap();

        assert_eq!(timers.deadline(id), Some(150));
        timers.advance_to(100);
        assert_eq!(timers.pop_expired(), None);
        timers.advance_to(150);
        assert_eq!(timers.pop_expired(), Some((id, ())));
    }

    #[test]
    fn reschedule_unknown_timer_is_an_error() {
        let mut timers = TimerQueue::new();
        let id = timers.schedule(Duration::from_millis(1), ());
        timers.cancel(id);

        assert_eq!(
            timers.reschedule(id, Duration::from_millis(1)),
            Err(UnknownTimer { id })
        );
    }

    #[test]
    fn next_deadline_skips_cancelled_entries() {
        let mut timers = TimerQueue::new();
        let early = timers.schedule(Duration::from_millis(10), ());
        timers.schedule(Duration::from_millis(20), ());
        timers.cancel(early);

        assert_eq!(timers.next_deadline(), Some(20));
        assert_eq!(timers.len(), 1);
    }

    #[test]
    fn clear_invalidates_handles() {
        let mut timers = TimerQueue::new();
        let a = timers.schedule(Duration::from_millis(10), ());
        let b = timers.schedule(Duration::from_millis(20), ());
        timers.clear();

        assert!(timers.is_empty());
        assert!(!timers.is_pending(a));
        assert!(!timers.is_pending(b));
        assert_eq!(timers.next_deadline(), None);
    }
}
