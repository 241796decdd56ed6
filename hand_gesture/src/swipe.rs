//! Wrist-swipe detection.
//!
//! The wrist position of the first frame in which a hand appears becomes the
//! anchor.  If a later frame puts the wrist more than [`SWIPE_DISTANCE`] to
//! the right or left of the anchor, that is a swipe.  While the wrist stays
//! inside the band the anchor follows it, so slow drift never accumulates
//! into a swipe.  Losing the hand clears the anchor.

use tracing::debug;

use crate::landmark::{HandInput, Joint};

/// Normalized horizontal wrist travel that counts as a swipe.
pub const SWIPE_DISTANCE: f32 = 0.2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Swipe { Left, Right }

#[derive(Clone, Debug)]
pub struct SwipeTracker {
    anchor_x: Option<f32>,
    distance: f32,
}

impl Default for SwipeTracker {
    fn default() -> Self { SwipeTracker::new(SWIPE_DISTANCE) }
}

impl SwipeTracker {
    pub fn new(distance: f32) -> Self {
        SwipeTracker { anchor_x: None, distance }
    }

    /// Feed one detector result.  Returns a swipe when the wrist has left
    /// the band around the anchor; the anchor is cleared afterwards so one
    /// motion yields one swipe.
    pub fn observe(&mut self, input: &HandInput) -> Option<Swipe> {
        let Some(frame) = input.frame() else {
            self.anchor_x = None;
            return None;
        };
        let x = frame.joint(Joint::Wrist).x;
        let Some(anchor) = self.anchor_x else {
            self.anchor_x = Some(x);
            return None;
        };

        let swipe = if x > anchor + self.distance {
            Some(Swipe::Right)
        } else if x < anchor - self.distance {
            Some(Swipe::Left)
        } else {
            None
        };

        match swipe {
            Some(s) => {
                debug!(?s, anchor, x, "wrist swipe");
                self.anchor_x = None;
            }
            None => self.anchor_x = Some(x),
        }
        swipe
    }

    pub fn reset(&mut self) { self.anchor_x = None; }
}
