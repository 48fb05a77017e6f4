// Copyright 2026 the Linger Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A tiny simulated UI host shared by the demos.
//!
//! [`DemoHost`] owns one timer queue for every widget and the set of elements
//! that currently carry a touch-end guard. Input arrives as a timestamped
//! script of [`Step`]s, the way a recorded input trace would be replayed.

use core::cell::{Cell, RefCell};
use core::time::Duration;
use std::rc::Rc;

use hashbrown::HashSet;
use linger_gesture::long_hover::{HoverInput, LongHover};
use linger_gesture::long_press::{
    LongPress, LongPressConfig, PressContext, PressEvent, PressInput, PressOutcome,
};
use linger_gesture::touch::{TouchEndEvent, guard_touch_end};
use linger_timing::{Scheduler, Tagged, TimerId, TimerQueue};

/// Element handle in the simulated tree.
pub type NodeId = u32;

/// Pointer or touch event delivered to a widget.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Pointer {
    /// Time the event was generated, in milliseconds.
    pub at: u64,
    /// Element the event was dispatched to.
    pub node: NodeId,
}

impl PressEvent for Pointer {
    type Target = NodeId;

    fn target(&self) -> Option<NodeId> {
        Some(self.node)
    }
}

/// A platform touch-end as it reaches a native listener.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NativeTouchEnd {
    /// Touch points still reported by the platform.
    pub touches: usize,
    /// Set when a listener cancelled the platform default.
    pub prevented: bool,
}

impl TouchEndEvent for NativeTouchEnd {
    fn touch_count(&self) -> Option<usize> {
        Some(self.touches)
    }

    fn prevent_default(&mut self) {
        self.prevented = true;
    }
}

/// Which widget behavior a timer belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Owner {
    /// The long-press recognizer of a widget.
    Press(NodeId),
    /// The long-hover recognizer of a widget.
    Hover(NodeId),
}

/// What the demo observed, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Observed {
    /// The long-press callback ran.
    LongPress {
        /// Element pressed.
        node: NodeId,
        /// When the press began.
        started_at: u64,
        /// When the callback ran.
        fired_at: u64,
    },
    /// The click callback ran.
    Click {
        /// Element clicked.
        node: NodeId,
        /// When the release happened.
        at: u64,
    },
    /// A press ended; `outcome` says how.
    PressEnded {
        /// Element pressed.
        node: NodeId,
        /// Result reported by the recognizer.
        outcome: PressOutcome,
    },
    /// The long-hover flag of a widget changed.
    Hover {
        /// Element hovered.
        node: NodeId,
        /// New value of the flag.
        hovered: bool,
        /// When it changed.
        at: u64,
    },
    /// A native touch-end reached the element.
    TouchEnd {
        /// Element touched.
        node: NodeId,
        /// Whether the default was prevented.
        prevented: bool,
    },
}

/// One scripted input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Pointer or touch input aimed at a widget's long-press recognizer.
    Press(Pointer, PressInput),
    /// Enter/leave aimed at a widget's long-hover recognizer.
    Hover(Pointer, HoverInput),
    /// A raw platform touch-end with the given number of remaining touches.
    NativeTouchEnd(Pointer, usize),
}

impl Step {
    fn at(&self) -> u64 {
        match self {
            Self::Press(p, _) | Self::Hover(p, _) | Self::NativeTouchEnd(p, _) => p.at,
        }
    }
}

/// A widget carrying both behaviors.
#[derive(Debug)]
struct Widget {
    node: NodeId,
    press: LongPress<Pointer>,
    hover: LongHover,
}

/// [`PressContext`] handed to a widget's long-press recognizer.
///
/// Timers carry the widget's [`Owner`] so the host can route them back.
#[derive(Debug)]
struct PressCx<'a> {
    timers: Tagged<'a, Owner>,
    guards: &'a mut HashSet<NodeId>,
}

impl Scheduler for PressCx<'_> {
    fn now(&self) -> u64 {
        self.timers.now()
    }

    fn schedule(&mut self, delay: Duration) -> TimerId {
        self.timers.schedule(delay)
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.cancel(id)
    }
}

impl PressContext<NodeId> for PressCx<'_> {
    fn attach_touch_end_guard(&mut self, target: &NodeId) {
        tracing::debug!(node = target, "touch-end guard attached");
        self.guards.insert(*target);
    }

    fn detach_touch_end_guard(&mut self, target: &NodeId) {
        tracing::debug!(node = target, "touch-end guard detached");
        self.guards.remove(target);
    }
}

/// Simulated host: widgets, one timer queue, installed guards and a log.
#[derive(Debug, Default)]
pub struct DemoHost {
    timers: TimerQueue<Owner>,
    guards: HashSet<NodeId>,
    widgets: Vec<Widget>,
    clock: Rc<Cell<u64>>,
    log: Rc<RefCell<Vec<Observed>>>,
}

impl DemoHost {
    /// Create an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a widget at `node` with a long-press recognizer using `config`
    /// and a long-hover recognizer with dwell time `hover_time`.
    pub fn add_widget(&mut self, node: NodeId, config: LongPressConfig, hover_time: Duration) {
        let long_log = self.log.clone();
        let click_log = self.log.clone();
        let hover_log = self.log.clone();
        let press_clock = self.clock.clone();
        let hover_clock = self.clock.clone();
        let press = LongPress::new(move |start: &Pointer| {
            let fired_at = press_clock.get();
            long_log.borrow_mut().push(Observed::LongPress {
                node: start.node,
                started_at: start.at,
                fired_at,
            });
        })
        .with_click(move |end: &Pointer| {
            click_log.borrow_mut().push(Observed::Click {
                node: end.node,
                at: end.at,
            });
        })
        .with_config(config);
        let hover = LongHover::new(hover_time).with_observer(move |hovered| {
            let at = hover_clock.get();
            hover_log.borrow_mut().push(Observed::Hover {
                node,
                hovered,
                at,
            });
        });
        self.widgets.push(Widget { node, press, hover });
    }

    /// Nodes that currently have a touch-end guard installed.
    pub fn guarded(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.guards.iter().copied()
    }

    /// Everything observed so far.
    pub fn observed(&self) -> Vec<Observed> {
        self.log.borrow().clone()
    }

    /// Replay `script` in order, firing timers as time passes, then run the
    /// clock on to `until`.
    pub fn run(&mut self, script: &[Step], until: u64) {
        for step in script {
            self.advance_to(step.at());
            self.dispatch(*step);
        }
        self.advance_to(until);
    }

    /// Move the clock to `now`, delivering every timer that comes due.
    pub fn advance_to(&mut self, now: u64) {
        while let Some(deadline) = self.timers.next_deadline() {
            if deadline > now {
                break;
            }
            self.timers.advance_to(deadline);
            self.clock.set(self.timers.now());
            while let Some((id, owner)) = self.timers.pop_expired() {
                tracing::trace!(%id, ?owner, "delivering timer");
                match owner {
                    Owner::Press(node) => {
                        if let Some(widget) = self.widget_mut(node) {
                            widget.press.on_timer(id);
                        }
                    }
                    Owner::Hover(node) => {
                        if let Some(widget) = self.widget_mut(node) {
                            widget.hover.on_timer(id);
                        }
                    }
                }
            }
        }
        self.timers.advance_to(now);
        self.clock.set(self.timers.now());
    }

    fn dispatch(&mut self, step: Step) {
        match step {
            Step::Press(pointer, input) => {
                let Some(index) = self.widget_index(pointer.node) else {
                    tracing::warn!(node = pointer.node, "press on unknown node");
                    return;
                };
                let widget = &mut self.widgets[index];
                let mut cx = PressCx {
                    timers: self.timers.tagged(Owner::Press(widget.node)),
                    guards: &mut self.guards,
                };
                if let Some(outcome) = widget.press.handle(input, pointer, &mut cx) {
                    tracing::info!(node = pointer.node, ?outcome, "press ended");
                    self.log.borrow_mut().push(Observed::PressEnded {
                        node: pointer.node,
                        outcome,
                    });
                }
            }
            Step::Hover(pointer, input) => {
                let Some(index) = self.widget_index(pointer.node) else {
                    tracing::warn!(node = pointer.node, "hover on unknown node");
                    return;
                };
                let widget = &mut self.widgets[index];
                widget
                    .hover
                    .handle(input, &mut self.timers.tagged(Owner::Hover(widget.node)));
            }
            Step::NativeTouchEnd(pointer, touches) => {
                let mut event = NativeTouchEnd {
                    touches,
                    prevented: false,
                };
                if self.guards.contains(&pointer.node) {
                    guard_touch_end(&mut event);
                }
                self.log.borrow_mut().push(Observed::TouchEnd {
                    node: pointer.node,
                    prevented: event.prevented,
                });
            }
        }
    }

    fn widget_index(&self, node: NodeId) -> Option<usize> {
        self.widgets.iter().position(|w| w.node == node)
    }

    fn widget_mut(&mut self, node: NodeId) -> Option<&mut Widget> {
        self.widgets.iter_mut().find(|w| w.node == node)
    }
}
