// Copyright 2026 the Linger Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linger Timing: cancellable deferred wakeups for single-threaded UI event loops.
//!
//! Interaction helpers such as long press and long hover need "call me back in
//! N milliseconds unless I cancel first". This crate provides that primitive
//! without assuming any particular runtime:
//!
//! - [`TimerQueue`]: a logical clock plus a set of pending timers, each carrying
//!   a payload the host uses to route the wakeup back to its owner.
//! - [`TimerId`]: a generational handle. Handles of fired or cancelled timers
//!   never alias a newer timer.
//! - [`Scheduler`]: the narrow seam interaction state machines depend on.
//!   [`TimerQueue::tagged`] adapts a payload-carrying queue into one.
//!
//! The queue never reads a wall clock. The host advances it with
//! [`TimerQueue::advance_to`] from whatever time source it has (frame
//! timestamps, `Instant`, a test script) and then pops expired timers.
//!
//! ## Event loop sketch
//!
//! ```rust
//! use core::time::Duration;
//! use linger_timing::TimerQueue;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum Wake {
//!     Tooltip,
//!     Autosave,
//! }
//!
//! let mut timers = TimerQueue::new();
//! let tooltip = timers.schedule(Duration::from_millis(500), Wake::Tooltip);
//! timers.schedule(Duration::from_millis(2_000), Wake::Autosave);
//!
//! // Pointer left before the tooltip was due.
//! assert_eq!(timers.cancel(tooltip), Some(Wake::Tooltip));
//!
//! timers.advance_to(2_000);
//! let mut fired = Vec::new();
//! while let Some((_, wake)) = timers.pop_expired() {
//!     fired.push(wake);
//! }
//! assert_eq!(fired, vec![Wake::Autosave]);
//! ```
//!
//! ## Ordering
//!
//! Expired timers pop in deadline order. Timers sharing a deadline pop in the
//! order they were scheduled. A timer is never returned before the clock has
//! reached its deadline, and a cancelled timer is never returned at all.
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

mod id;
mod queue;
mod scheduler;

pub use id::TimerId;
pub use queue::{TimerQueue, UnknownTimer, duration_to_millis};
pub use scheduler::{Scheduler, Tagged};
