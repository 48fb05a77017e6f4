// Copyright 2026 the Linger Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linger Gesture: long-press and long-hover recognizers for UI elements.
//!
//! Both recognizers are small state machines driven by pointer input plus one
//! deferred wakeup from a [`linger_timing::Scheduler`]:
//!
//! - [`long_press`]: separate a press-and-hold from a click. The long-press
//!   callback fires while the press is still held; the release that follows
//!   does not click.
//! - [`long_hover`]: raise a flag once the pointer has dwelled on an element.
//! - [`touch`]: the touch-end guard that keeps platforms from synthesizing a
//!   click after a long touch.
//!
//! The crate does not assume any UI framework. The host routes input events to
//! the recognizer's handler methods, owns the timer queue, and delivers expired
//! timers back through `on_timer`. Each recognizer holds at most one pending
//! timer at a time.
//!
//! ## Wiring into an event loop
//!
//! ```rust
//! use core::time::Duration;
//!
//! use linger_gesture::long_hover::LongHover;
//! use linger_gesture::long_press::{LongPress, PressEvent, PressOutcome, WithoutGuard};
//! use linger_timing::TimerQueue;
//!
//! #[derive(Copy, Clone, Debug, PartialEq)]
//! enum Owner {
//!     SaveButton,
//!     HelpIcon,
//! }
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
//! let mut timers = TimerQueue::new();
//! let mut save = LongPress::new(|_: &Pointer| println!("show save options"));
//! let mut help = LongHover::new(Duration::from_millis(1_000));
//!
//! save.on_mouse_down(Pointer, &mut WithoutGuard(timers.tagged(Owner::SaveButton)));
//! help.on_mouse_enter(&mut timers.tagged(Owner::HelpIcon));
//!
//! timers.advance_to(1_000);
//! while let Some((id, owner)) = timers.pop_expired() {
//!     match owner {
//!         Owner::SaveButton => {
//!             save.on_timer(id);
//!         }
//!         Owner::HelpIcon => {
//!             help.on_timer(id);
//!         }
//!     }
//! }
//!
//! assert!(help.is_hovered_for_time());
//! let outcome = save.on_mouse_up(&Pointer, &mut WithoutGuard(timers.tagged(Owner::SaveButton)));
//! assert_eq!(outcome, PressOutcome::LongPressed);
//! ```
//!
//! ## Features
//!
//! - `std` (default): forward `std` to dependencies.
//! - `serde`: derive `Serialize`/`Deserialize` for [`long_press::LongPressConfig`].
//!
//! This crate is `no_std` compatible (with `alloc`) for all modules.

#![no_std]

extern crate alloc;

pub mod long_hover;
pub mod long_press;
pub mod touch;
