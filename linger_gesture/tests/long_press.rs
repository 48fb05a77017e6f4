// Copyright 2026 the Linger Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for `linger_gesture::long_press`.
//!
//! These script timed input sequences against a host that owns a timer queue
//! and a table of installed touch-end listeners, and check which callbacks ran.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use linger_gesture::long_press::{
    LongPress, LongPressConfig, PressContext, PressEvent, PressOutcome,
};
use linger_gesture::touch::{TouchEndEvent, guard_touch_end};
use linger_timing::{Scheduler, TimerId, TimerQueue};

type NodeId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pointer {
    at: u64,
    node: NodeId,
}

impl PressEvent for Pointer {
    type Target = NodeId;

    fn target(&self) -> Option<NodeId> {
        Some(self.node)
    }
}

struct NativeTouchEnd {
    touches: usize,
    prevented: bool,
}

impl TouchEndEvent for NativeTouchEnd {
    fn touch_count(&self) -> Option<usize> {
        Some(self.touches)
    }

    fn prevent_default(&mut self) {
        self.prevented = true;
    }
}

#[derive(Default)]
struct Host {
    timers: TimerQueue<()>,
    /// Installed touch-end guards per node (a count, to catch double attach).
    guards: BTreeMap<NodeId, u32>,
}

impl Scheduler for Host {
    fn now(&self) -> u64 {
        self.timers.now()
    }

    fn schedule(&mut self, delay: Duration) -> TimerId {
        self.timers.schedule(delay, ())
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.cancel(id).is_some()
    }
}

impl PressContext<NodeId> for Host {
    fn attach_touch_end_guard(&mut self, target: &NodeId) {
        *self.guards.entry(*target).or_default() += 1;
    }

    fn detach_touch_end_guard(&mut self, target: &NodeId) {
        if let Some(count) = self.guards.get_mut(target) {
            *count -= 1;
            if *count == 0 {
                self.guards.remove(target);
            }
        }
    }
}

impl Host {
    fn advance(&mut self, now: u64, press: &mut LongPress<Pointer>) {
        self.timers.advance_to(now);
        while let Some((id, ())) = self.timers.pop_expired() {
            press.on_timer(id);
        }
    }

    /// Deliver a native touch-end to `node`, running its guard if one is installed.
    fn native_touch_end(&self, node: NodeId, touches: usize) -> bool {
        let mut event = NativeTouchEnd {
            touches,
            prevented: false,
        };
        if self.guards.contains_key(&node) {
            guard_touch_end(&mut event);
        }
        event.prevented
    }
}

#[derive(Default)]
struct Calls {
    long: Vec<(u64, u64)>,
    click: Vec<u64>,
}

type Recognizer = (LongPress<Pointer>, Rc<RefCell<Calls>>, Rc<RefCell<u64>>);

fn recognizer(config: LongPressConfig) -> Recognizer {
    let calls = Rc::new(RefCell::new(Calls::default()));
    let clock = Rc::new(RefCell::new(0_u64));
    let (long_calls, long_clock) = (calls.clone(), clock.clone());
    let click_calls = calls.clone();
    let press = LongPress::new(move |start: &Pointer| {
        long_calls.borrow_mut().long.push((*long_clock.borrow(), start.at));
    })
    .with_click(move |end: &Pointer| click_calls.borrow_mut().click.push(end.at))
    .with_config(config);
    (press, calls, clock)
}

#[test]
fn release_before_delay_clicks_once() {
    let (mut press, calls, _) = recognizer(LongPressConfig::default());
    let mut host = Host::default();

    press.on_mouse_down(Pointer { at: 0, node: 1 }, &mut host);
    host.advance(250, &mut press);
    let outcome = press.on_mouse_up(&Pointer { at: 250, node: 1 }, &mut host);

    assert_eq!(outcome, PressOutcome::Clicked);
    assert_eq!(calls.borrow().click, [250]);
    assert!(calls.borrow().long.is_empty());
}

#[test]
fn hold_past_delay_long_presses_at_delay_and_does_not_click() {
    let (mut press, calls, clock) = recognizer(LongPressConfig::default());
    let mut host = Host::default();

    press.on_mouse_down(Pointer { at: 0, node: 1 }, &mut host);
    for t in (0..=350).step_by(10) {
        *clock.borrow_mut() = t;
        host.advance(t, &mut press);
    }
    let outcome = press.on_mouse_up(&Pointer { at: 350, node: 1 }, &mut host);

    assert_eq!(outcome, PressOutcome::LongPressed);
    assert_eq!(calls.borrow().long, [(300, 0)]);
    assert!(calls.borrow().click.is_empty());
}

#[test]
fn leave_during_press_never_clicks_regardless_of_elapsed_time() {
    for leave_at in [0, 100, 299] {
        let (mut press, calls, _) = recognizer(LongPressConfig::default());
        let mut host = Host::default();

        press.on_touch_start(Pointer { at: 0, node: 1 }, &mut host);
        host.advance(leave_at, &mut press);
        let outcome = press.on_mouse_leave(&Pointer { at: leave_at, node: 1 }, &mut host);
        host.advance(10_000, &mut press);

        assert_eq!(outcome, Some(PressOutcome::Suppressed));
        assert!(calls.borrow().click.is_empty());
        assert!(calls.borrow().long.is_empty());
        assert!(host.timers.is_empty());
    }
}

#[test]
fn leave_after_long_press_reports_it() {
    let (mut press, calls, _) = recognizer(LongPressConfig::default());
    let mut host = Host::default();

    press.on_mouse_down(Pointer { at: 0, node: 1 }, &mut host);
    host.advance(400, &mut press);
    let outcome = press.on_mouse_leave(&Pointer { at: 400, node: 1 }, &mut host);

    assert_eq!(outcome, Some(PressOutcome::LongPressed));
    assert_eq!(calls.borrow().long.len(), 1);
}

#[test]
fn custom_delay() {
    let config = LongPressConfig::new().with_delay(Duration::from_secs(1));
    let (mut press, calls, _) = recognizer(config);
    let mut host = Host::default();

    press.on_mouse_down(Pointer { at: 0, node: 1 }, &mut host);
    host.advance(999, &mut press);
    assert!(calls.borrow().long.is_empty());
    host.advance(1_000, &mut press);
    assert_eq!(calls.borrow().long.len(), 1);
}

#[test]
fn consecutive_presses_are_independent() {
    let (mut press, calls, _) = recognizer(LongPressConfig::default());
    let mut host = Host::default();

    press.on_mouse_down(Pointer { at: 0, node: 1 }, &mut host);
    host.advance(300, &mut press);
    host.advance(320, &mut press);
    press.on_mouse_up(&Pointer { at: 320, node: 1 }, &mut host);

    host.advance(1_000, &mut press);
    press.on_mouse_down(Pointer { at: 1_000, node: 1 }, &mut host);
    host.advance(1_100, &mut press);
    press.on_mouse_up(&Pointer { at: 1_100, node: 1 }, &mut host);

    assert_eq!(calls.borrow().long.len(), 1);
    assert_eq!(calls.borrow().click, [1_100]);
}

#[test]
fn touch_end_guard_follows_the_press() {
    let (mut press, _, _) = recognizer(LongPressConfig::default());
    let mut host = Host::default();

    assert!(!host.native_touch_end(1, 1));

    press.on_touch_start(Pointer { at: 0, node: 1 }, &mut host);
    assert!(host.native_touch_end(1, 0));
    assert!(host.native_touch_end(1, 1));
    assert!(!host.native_touch_end(1, 2));

    press.on_touch_end(&Pointer { at: 400, node: 1 }, &mut host);
    assert!(host.guards.is_empty());
    assert!(!host.native_touch_end(1, 1));
}

#[test]
fn guard_is_released_on_every_exit_path() {
    let (mut press, _, _) = recognizer(LongPressConfig::default());
    let mut host = Host::default();

    press.on_touch_start(Pointer { at: 0, node: 1 }, &mut host);
    press.on_mouse_leave(&Pointer { at: 10, node: 1 }, &mut host);
    assert!(host.guards.is_empty());

    press.on_touch_start(Pointer { at: 20, node: 1 }, &mut host);
    press.on_touch_start(Pointer { at: 30, node: 2 }, &mut host);
    assert_eq!(host.guards.keys().copied().collect::<Vec<_>>(), [2]);

    press.reset(&mut host);
    assert!(host.guards.is_empty());
    assert!(host.timers.is_empty());
}

#[test]
fn guard_not_installed_when_disabled() {
    let config = LongPressConfig::new().with_prevent_default(false);
    let (mut press, _, _) = recognizer(config);
    let mut host = Host::default();

    press.on_touch_start(Pointer { at: 0, node: 1 }, &mut host);
    assert!(!host.native_touch_end(1, 1));
    press.on_touch_end(&Pointer { at: 50, node: 1 }, &mut host);
    assert!(host.guards.is_empty());
}
