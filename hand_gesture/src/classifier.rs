//! Frame → [`Gesture`] classification.
//!
//! First match wins, in this order:
//!
//! 1. no hand                → `NoHand`
//! 2. open palm, leftward    → `PalmLeft`
//! 3. open palm, rightward   → `PalmRight`
//! 4. pointing down / up / left / right (that order)
//! 5. otherwise              → `None`
//!
//! The order is part of the contract: the predicate groups are not proven
//! disjoint for every physically possible hand, and the palm gestures must
//! win over a half-formed pointing gesture.

use tracing::trace;

use crate::landmark::{Direction, Finger, HandInput, Joint, LandmarkFrame};

// ════════════════════════════════════════════════════════════════════════════
// Gesture
// ════════════════════════════════════════════════════════════════════════════

/// Categorical result of classifying one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gesture {
    /// The detector reported no hand.
    NoHand,
    /// Open palm, fingers to the left.
    PalmLeft,
    /// Open palm, fingers to the right.
    PalmRight,
    PointUp,
    PointDown,
    PointLeft,
    PointRight,
    /// A hand is present but matches nothing.
    None,
}

impl Gesture {
    /// Direction of a pointing gesture, if this is one.
    pub fn pointing(self) -> Option<Direction> {
        match self {
            Gesture::PointUp    => Some(Direction::Up),
            Gesture::PointDown  => Some(Direction::Down),
            Gesture::PointLeft  => Some(Direction::Left),
            Gesture::PointRight => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn is_palm(self) -> bool {
        matches!(self, Gesture::PalmLeft | Gesture::PalmRight)
    }

    pub fn label(self) -> &'static str {
        match self {
            Gesture::NoHand     => "no hand",
            Gesture::PalmLeft   => "palm left",
            Gesture::PalmRight  => "palm right",
            Gesture::PointUp    => "point up",
            Gesture::PointDown  => "point down",
            Gesture::PointLeft  => "point left",
            Gesture::PointRight => "point right",
            Gesture::None       => "none",
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// classify
// ════════════════════════════════════════════════════════════════════════════

/// Classify one detector result.
pub fn classify(input: &HandInput) -> Gesture {
    match input {
        HandInput::NoHand   => Gesture::NoHand,
        HandInput::Hand(f)  => classify_frame(f),
    }
}

/// Classify a complete frame.  Never returns `NoHand`.
pub fn classify_frame(frame: &LandmarkFrame) -> Gesture {
    let gesture = if is_palm(frame, Direction::Left) {
        Gesture::PalmLeft
    } else if is_palm(frame, Direction::Right) {
        Gesture::PalmRight
    } else if is_pointing(frame, Direction::Down) {
        Gesture::PointDown
    } else if is_pointing(frame, Direction::Up) {
        Gesture::PointUp
    } else if is_pointing(frame, Direction::Left) {
        Gesture::PointLeft
    } else if is_pointing(frame, Direction::Right) {
        Gesture::PointRight
    } else {
        Gesture::None
    };
    trace!(ts = frame.timestamp_ms, gesture = gesture.label(), "classified frame");
    gesture
}

/// Open palm facing the camera with all four fingers stretched toward `side`.
///
/// * every finger straight: TIP beyond DIP beyond PIP along `side`
/// * every fingertip beyond the wrist along `side`
/// * thumb tip and all fingertips above the wrist
/// * thumb tip above the index tip
fn is_palm(f: &LandmarkFrame, side: Direction) -> bool {
    let wrist = f.joint(Joint::Wrist);
    let thumb = f.joint(Joint::ThumbTip);

    let extended = Finger::ALL.iter().all(|&finger| {
        let tip = f.joint(finger.tip());
        let dip = f.joint(finger.dip());
        let pip = f.joint(finger.pip());
        side.beyond(tip, dip) && side.beyond(dip, pip) && side.beyond(tip, wrist)
    });
    if !extended { return false; }

    let raised = Direction::Up.beyond(thumb, wrist)
        && Finger::ALL.iter().all(|&finger| Direction::Up.beyond(f.joint(finger.tip()), wrist));

    raised && Direction::Up.beyond(thumb, f.joint(Joint::IndexTip))
}

/// Index finger pointing along `dir` with the other three fingers curled.
///
/// * index tip beyond the thumb tip, its own DIP, and the wrist along `dir`
/// * middle/ring/pinky: PIP beyond TIP along `dir` (folded back)
fn is_pointing(f: &LandmarkFrame, dir: Direction) -> bool {
    let index = f.joint(Joint::IndexTip);

    dir.beyond(index, f.joint(Joint::ThumbTip))
        && dir.beyond(index, f.joint(Joint::IndexDip))
        && dir.beyond(index, f.joint(Joint::Wrist))
        && Finger::CURLED_WHEN_POINTING
            .iter()
            .all(|&finger| dir.beyond(f.joint(finger.pip()), f.joint(finger.tip())))
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
