//! Hold-to-confirm for the palm gestures.
//!
//! The first frame showing a palm starts a timer.  When it elapses, the
//! terminal command fires only if the latest classification is still that
//! same palm; otherwise it is dropped without an event.  Frames arriving in
//! between only update "latest", they do not restart the timer.

use std::time::{Duration, Instant};

use hand_gesture::Gesture;
use tracing::debug;

use crate::command::{intent, Intent, NavCommand};

/// How long a palm must be held before Back/Confirm fires.
pub const HOLD_TO_CONFIRM: Duration = Duration::from_millis(1000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Pending {
    gesture:  Gesture,
    command:  NavCommand,
    deadline: Instant,
}

#[derive(Clone, Debug)]
pub struct HoldToConfirm {
    hold:    Duration,
    pending: Option<Pending>,
    latest:  Gesture,
}

impl Default for HoldToConfirm {
    fn default() -> Self { HoldToConfirm::new(HOLD_TO_CONFIRM) }
}

impl HoldToConfirm {
    pub fn new(hold: Duration) -> Self {
        HoldToConfirm { hold, pending: None, latest: Gesture::NoHand }
    }

    /// Record the latest classification.  A palm with no timer running for
    /// it starts one; a different palm replaces the running timer.
    pub fn observe(&mut self, gesture: Gesture, now: Instant) {
        self.latest = gesture;
        let Intent::Hold(command) = intent(gesture) else { return };
        if self.pending.is_some_and(|p| p.gesture == gesture) {
            return;
        }
        debug!(gesture = gesture.label(), ?command, "hold timer started");
        self.pending = Some(Pending { gesture, command, deadline: now + self.hold });
    }

    /// Fire the timer if it has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<NavCommand> {
        let p = self.pending?;
        if now < p.deadline {
            return None;
        }
        self.pending = None;
        if self.latest == p.gesture {
            Some(p.command)
        } else {
            debug!(held = p.gesture.label(), latest = self.latest.label(), "hold released early, discarded");
            None
        }
    }

    pub fn deadline(&self) -> Option<Instant> { self.pending.map(|p| p.deadline) }

    pub fn cancel(&mut self) { self.pending = None; }
}
