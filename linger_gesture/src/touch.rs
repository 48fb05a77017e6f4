// Copyright 2026 the Linger Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch-end guard: suppress synthesized clicks after a long touch.
//!
//! Some platforms synthesize a click after a touch ends, even when the touch
//! was a long press. While a press is in flight, [`LongPress`](crate::long_press::LongPress)
//! asks the host to install a touch-end listener on the pressed element. That
//! listener should call [`guard_touch_end`] on every touch-end it sees.
//!
//! Multi-finger gestures (pinch zoom) are left alone: only touch-ends with
//! fewer than two active touch points are prevented.
//!
//! ```
//! use linger_gesture::touch::{TouchEndEvent, guard_touch_end};
//!
//! struct TouchEnd {
//!     touches: Option<usize>,
//!     prevented: bool,
//! }
//!
//! impl TouchEndEvent for TouchEnd {
//!     fn touch_count(&self) -> Option<usize> {
//!         self.touches
//!     }
//!     fn prevent_default(&mut self) {
//!         self.prevented = true;
//!     }
//! }
//!
//! let mut single = TouchEnd { touches: Some(1), prevented: false };
//! assert!(guard_touch_end(&mut single));
//! assert!(single.prevented);
//!
//! let mut pinch = TouchEnd { touches: Some(2), prevented: false };
//! assert!(!guard_touch_end(&mut pinch));
//! assert!(!pinch.prevented);
//! ```

/// A touch-end event as seen by the guard listener.
pub trait TouchEndEvent {
    /// Number of touch points still reported by the event.
    ///
    /// `None` when the event carries no touch list at all (for example a
    /// mouse event routed through the same listener).
    fn touch_count(&self) -> Option<usize>;

    /// Cancel the platform's default handling of this event.
    fn prevent_default(&mut self);
}

/// Whether a touch-end with `touch_count` touch points should be prevented.
#[must_use]
pub const fn should_prevent_touch_end(touch_count: Option<usize>) -> bool {
    matches!(touch_count, Some(count) if count < 2)
}

/// Apply the guard to `event`, returning `true` if its default was prevented.
pub fn guard_touch_end(event: &mut impl TouchEndEvent) -> bool {
    let prevent = should_prevent_touch_end(event.touch_count());
    if prevent {
        event.prevent_default();
    }
    prevent
}
