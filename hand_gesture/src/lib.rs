//! # hand_gesture
//!
//! Turns one hand-landmark detector result into one categorical [`Gesture`].
//!
//! A detector result is either a complete 21-joint [`LandmarkFrame`] or an
//! explicit [`HandInput::NoHand`].  [`classify`] is a pure function of that
//! input: no history, no side effects.
//!
//! ## Gesture table
//!
//! | Gesture | Hand shape | Intent |
//! |---|---|---|
//! | `PalmLeft`   | Four fingers extended leftward, fingertips above wrist | Hold → Back |
//! | `PalmRight`  | Four fingers extended rightward, fingertips above wrist | Hold → Confirm |
//! | `PointUp`    | Index tip above wrist and thumb, other fingers curled | Move Up |
//! | `PointDown`  | Index tip below wrist and thumb, other fingers curled | Move Down |
//! | `PointLeft`  | Index tip left of wrist and thumb, other fingers curled | Move Left |
//! | `PointRight` | Index tip right of wrist and thumb, other fingers curled | Move Right |
//! | `NoHand`     | Detector saw no hand | — |
//! | `None`       | Anything else | — |
//!
//! Coordinates are normalized frame coordinates: x grows rightward, y grows
//! downward.

pub mod landmark;
pub mod classifier;
pub mod poses;
pub mod swipe;

pub use landmark::{Direction, Finger, FrameError, HandInput, Joint, Landmark, LandmarkFrame, JOINT_COUNT};
pub use classifier::{classify, classify_frame, Gesture};
pub use swipe::{Swipe, SwipeTracker};
