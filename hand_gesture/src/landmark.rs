//! Landmark frames as delivered by the hand-landmark detector.
//!
//! A frame is all-or-nothing: either 21 joints are present, or the detector
//! reported no hand at all.  There is no zero-filled "partial" frame.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of joints in one detector result.
pub const JOINT_COUNT: usize = 21;

// ════════════════════════════════════════════════════════════════════════════
// Joint
// ════════════════════════════════════════════════════════════════════════════

/// The 21 hand joints, in detector order.
///
/// Each finger runs MCP (knuckle) → PIP → DIP → TIP (fingertip).  The thumb
/// has CMC → MCP → IP → TIP instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Joint {
    Wrist     = 0,
    ThumbCmc  = 1,
    ThumbMcp  = 2,
    ThumbIp   = 3,
    ThumbTip  = 4,
    IndexMcp  = 5,
    IndexPip  = 6,
    IndexDip  = 7,
    IndexTip  = 8,
    MiddleMcp = 9,
    MiddlePip = 10,
    MiddleDip = 11,
    MiddleTip = 12,
    RingMcp   = 13,
    RingPip   = 14,
    RingDip   = 15,
    RingTip   = 16,
    PinkyMcp  = 17,
    PinkyPip  = 18,
    PinkyDip  = 19,
    PinkyTip  = 20,
}

impl Joint {
    pub fn index(self) -> usize { self as usize }
}

/// One of the four non-thumb fingers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Finger { Index, Middle, Ring, Pinky }

impl Finger {
    pub const ALL: [Finger; 4] = [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];

    /// The three fingers that must be curled for a pointing gesture.
    pub const CURLED_WHEN_POINTING: [Finger; 3] = [Finger::Middle, Finger::Ring, Finger::Pinky];

    pub fn pip(self) -> Joint {
        match self {
            Finger::Index  => Joint::IndexPip,
            Finger::Middle => Joint::MiddlePip,
            Finger::Ring   => Joint::RingPip,
            Finger::Pinky  => Joint::PinkyPip,
        }
    }
    pub fn dip(self) -> Joint {
        match self {
            Finger::Index  => Joint::IndexDip,
            Finger::Middle => Joint::MiddleDip,
            Finger::Ring   => Joint::RingDip,
            Finger::Pinky  => Joint::PinkyDip,
        }
    }
    pub fn tip(self) -> Joint {
        match self {
            Finger::Index  => Joint::IndexTip,
            Finger::Middle => Joint::MiddleTip,
            Finger::Ring   => Joint::RingTip,
            Finger::Pinky  => Joint::PinkyTip,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Direction
// ════════════════════════════════════════════════════════════════════════════

/// A screen direction in normalized frame coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction { Up, Down, Left, Right }

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// True if `a` lies strictly further along this direction than `b`.
    ///
    /// Left is smaller x, Right larger x, Up smaller y, Down larger y.
    /// Equal coordinates are never "beyond".
    pub fn beyond(self, a: Landmark, b: Landmark) -> bool {
        match self {
            Direction::Left  => a.x < b.x,
            Direction::Right => a.x > b.x,
            Direction::Up    => a.y < b.y,
            Direction::Down  => a.y > b.y,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Landmark / LandmarkFrame
// ════════════════════════════════════════════════════════════════════════════

/// One joint position.  `x`, `y` are normalized to the camera frame; `z` is
/// the detector's relative depth and is carried but not used for
/// classification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32) -> Self { Landmark { x, y, z: 0.0 } }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("landmark frame needs exactly {expected} joints, got {found}")]
    JointCount { expected: usize, found: usize },
}

/// One complete detector result.
#[derive(Clone, Debug, PartialEq)]
pub struct LandmarkFrame {
    joints: [Landmark; JOINT_COUNT],
    /// Detector timestamp (ms); informational only.
    pub timestamp_ms: u64,
}

impl LandmarkFrame {
    pub fn new(joints: [Landmark; JOINT_COUNT], timestamp_ms: u64) -> Self {
        LandmarkFrame { joints, timestamp_ms }
    }

    /// Build a frame from a detector slice.  Anything other than exactly
    /// [`JOINT_COUNT`] joints is rejected; callers report `NoHand` instead.
    pub fn from_slice(joints: &[Landmark], timestamp_ms: u64) -> Result<Self, FrameError> {
        let joints: [Landmark; JOINT_COUNT] = joints.try_into().map_err(|_| FrameError::JointCount {
            expected: JOINT_COUNT,
            found:    joints.len(),
        })?;
        Ok(LandmarkFrame { joints, timestamp_ms })
    }

    #[inline]
    pub fn joint(&self, j: Joint) -> Landmark { self.joints[j.index()] }

    pub fn joints(&self) -> &[Landmark; JOINT_COUNT] { &self.joints }

    pub fn set(&mut self, j: Joint, at: Landmark) { self.joints[j.index()] = at; }
}

/// What the detector callback hands over: a full frame, or nothing.
#[derive(Clone, Debug, PartialEq)]
pub enum HandInput {
    Hand(LandmarkFrame),
    NoHand,
}

impl HandInput {
    pub fn frame(&self) -> Option<&LandmarkFrame> {
        match self {
            HandInput::Hand(f) => Some(f),
            HandInput::NoHand  => None,
        }
    }
}

impl From<Option<LandmarkFrame>> for HandInput {
    fn from(frame: Option<LandmarkFrame>) -> Self {
        frame.map_or(HandInput::NoHand, HandInput::Hand)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
