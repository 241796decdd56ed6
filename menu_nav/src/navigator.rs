//! Per-screen navigation engine.
//!
//! A [`Navigator`] owns everything one screen mutates: cursor, debounce
//! gate, hold-to-confirm timer and (optionally) the swipe tracker.  It has
//! no locks and no clock.  Whoever drives it must call it from a single
//! thread and pass the current instant; [`Navigator::next_deadline`] says
//! when to call [`Navigator::on_deadline`] next.
//!
//! | Input | Path |
//! |---|---|
//! | frame / gesture | classify → hold timer (palms) or gate → cursor (pointing) |
//! | channel command | gate → cursor |
//! | channel finished | Confirm, no gate |
//! | swipe (opt-in) | Back / Confirm unless the gate is busy |
//!
//! A terminal event exits the navigator; every later call returns nothing.

use std::time::{Duration, Instant};

use hand_gesture::{classify, Gesture, HandInput, Swipe, SwipeTracker};
use tracing::{debug, info};

use crate::channel::ChannelSignal;
use crate::command::{intent, Intent, NavCommand};
use crate::cursor::{Cursor, Step};
use crate::debounce::{DebounceGate, BINARY_COOLDOWN, GRID_COOLDOWN};
use crate::hold::{HoldToConfirm, HOLD_TO_CONFIRM};
use crate::layout::{LayoutKind, NavLayout};

/// Events delivered to the screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavEvent {
    SelectionChanged { index: usize },
    Confirmed { index: usize },
    BackRequested,
}

impl NavEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, NavEvent::SelectionChanged { .. })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavSettings {
    pub cooldown: Duration,
    pub hold:     Duration,
    pub swipe:    bool,
}

impl NavSettings {
    /// Defaults for a layout: 500 ms cooldown on a binary choice, 1 s otherwise.
    pub fn for_layout(kind: LayoutKind) -> Self {
        let cooldown = match kind {
            LayoutKind::Binary2 => BINARY_COOLDOWN,
            _                   => GRID_COOLDOWN,
        };
        NavSettings { cooldown, hold: HOLD_TO_CONFIRM, swipe: false }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Navigator
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug)]
pub struct Navigator {
    layout:       NavLayout,
    cursor:       Cursor,
    gate:         DebounceGate,
    hold:         HoldToConfirm,
    swipe:        Option<SwipeTracker>,
    exited:       bool,
    last_gesture: Gesture,
}

impl Navigator {
    pub fn new(layout: NavLayout, settings: NavSettings) -> Self {
        Navigator {
            layout,
            cursor:       Cursor::new(),
            gate:         DebounceGate::new(settings.cooldown),
            hold:         HoldToConfirm::new(settings.hold),
            swipe:        settings.swipe.then(SwipeTracker::default),
            exited:       false,
            last_gesture: Gesture::NoHand,
        }
    }

    pub fn with_defaults(layout: NavLayout) -> Self {
        let settings = NavSettings::for_layout(layout.kind());
        Navigator::new(layout, settings)
    }

    pub fn layout(&self) -> &NavLayout { &self.layout }
    pub fn index(&self) -> usize { self.cursor.index() }
    pub fn is_exited(&self) -> bool { self.exited }
    pub fn last_gesture(&self) -> Gesture { self.last_gesture }
    pub fn selected(&self) -> Option<&str> { self.layout.item(self.cursor.index()) }

    /// One detector result.
    pub fn on_input(&mut self, input: &HandInput, now: Instant) -> Vec<NavEvent> {
        let mut events = self.on_deadline(now);
        if self.exited {
            return events;
        }
        if let Some(swipe) = self.swipe.as_mut().and_then(|t| t.observe(input)) {
            if self.gate.is_busy(now) {
                debug!(?swipe, "swipe ignored during cooldown");
            } else {
                let cmd = match swipe {
                    Swipe::Right => NavCommand::Confirm,
                    Swipe::Left  => NavCommand::Back,
                };
                events.extend(self.terminal(cmd));
                return events;
            }
        }
        events.extend(self.gesture(classify(input), now));
        events
    }

    /// One already-classified gesture.
    pub fn on_gesture(&mut self, gesture: Gesture, now: Instant) -> Vec<NavEvent> {
        let mut events = self.on_deadline(now);
        if !self.exited {
            events.extend(self.gesture(gesture, now));
        }
        events
    }

    /// One signal from the secondary channel.
    pub fn on_channel(&mut self, signal: ChannelSignal, now: Instant) -> Vec<NavEvent> {
        let mut events = self.on_deadline(now);
        if self.exited {
            return events;
        }
        match signal {
            ChannelSignal::Command(cmd) if cmd.is_terminal() => events.extend(self.terminal(cmd)),
            ChannelSignal::Command(cmd) => events.extend(self.directional(cmd, now)),
            ChannelSignal::Finished => {
                info!("channel reports finished");
                events.extend(self.terminal(NavCommand::Confirm));
            }
        }
        events
    }

    /// Run whatever timers have come due by `now`.
    pub fn on_deadline(&mut self, now: Instant) -> Vec<NavEvent> {
        if self.exited {
            return Vec::new();
        }
        if self.gate.release_due(now) {
            debug!("cooldown released");
        }
        match self.hold.poll(now) {
            Some(cmd) => self.terminal(cmd),
            None      => Vec::new(),
        }
    }

    /// Earliest pending timer, or `None` when nothing is scheduled.
    pub fn next_deadline(&self) -> Option<Instant> {
        if self.exited {
            return None;
        }
        match (self.gate.deadline(), self.hold.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b)             => a.or(b),
        }
    }

    /// Leave the screen: drop pending timers and ignore everything after.
    pub fn exit(&mut self) {
        if self.exited {
            return;
        }
        self.exited = true;
        self.gate.cancel();
        self.hold.cancel();
        if let Some(t) = self.swipe.as_mut() {
            t.reset();
        }
        debug!(index = self.cursor.index(), "navigator exited");
    }

    // ── internals ───────────────────────────────────────────────────────────

    fn gesture(&mut self, gesture: Gesture, now: Instant) -> Vec<NavEvent> {
        if gesture != self.last_gesture {
            debug!(gesture = gesture.label(), "gesture changed");
        }
        self.last_gesture = gesture;
        self.hold.observe(gesture, now);
        match intent(gesture) {
            Intent::Move(cmd) => self.directional(cmd, now),
            Intent::Hold(_) | Intent::Idle => Vec::new(),
        }
    }

    fn directional(&mut self, cmd: NavCommand, now: Instant) -> Vec<NavEvent> {
        if !self.gate.try_fire(now) {
            debug!(?cmd, "rejected, cooling down");
            return Vec::new();
        }
        match self.cursor.apply(&self.layout, cmd) {
            Step::Moved { from, to } => {
                info!(?cmd, from, to, item = self.selected().unwrap_or(""), "selection changed");
                vec![NavEvent::SelectionChanged { index: to }]
            }
            _ => Vec::new(),
        }
    }

    fn terminal(&mut self, cmd: NavCommand) -> Vec<NavEvent> {
        let event = match self.cursor.apply(&self.layout, cmd) {
            Step::Confirmed(index) => {
                info!(index, item = self.selected().unwrap_or(""), "confirmed");
                NavEvent::Confirmed { index }
            }
            Step::Back => {
                info!("back requested");
                NavEvent::BackRequested
            }
            Step::Moved { .. } | Step::Stayed(_) => return Vec::new(),
        };
        self.exit();
        vec![event]
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
