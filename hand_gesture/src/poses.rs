//! Canonical synthetic hand poses.
//!
//! Used by the keyboard simulator to stand in for a camera, and by tests.
//! Every pose is laid out around a wrist at the centre of the frame, so all
//! coordinates stay inside `[0, 1]`.

use crate::landmark::{Direction, Landmark, LandmarkFrame, JOINT_COUNT};

const WRIST: (f32, f32) = (0.5, 0.5);

/// Offsets from the wrist for a hand pointing straight up, index extended,
/// the other three fingers folded back below their PIP joints.
/// Index order follows [`crate::Joint`].
const POINT_UP: [(f32, f32); JOINT_COUNT] = [
    ( 0.00,  0.00),                                                 // wrist
    (-0.04, -0.04), (-0.07, -0.08), (-0.08, -0.12), (-0.07, -0.16), // thumb
    ( 0.00, -0.15), ( 0.00, -0.25), ( 0.00, -0.32), ( 0.00, -0.38), // index
    ( 0.04, -0.15), ( 0.04, -0.20), ( 0.05, -0.16), ( 0.05, -0.12), // middle
    ( 0.08, -0.14), ( 0.08, -0.19), ( 0.09, -0.15), ( 0.09, -0.11), // ring
    ( 0.12, -0.13), ( 0.12, -0.17), ( 0.13, -0.14), ( 0.13, -0.10), // pinky
];

/// Same hand with the index folded like the others.
const FIST: [(f32, f32); JOINT_COUNT] = [
    ( 0.00,  0.00),
    (-0.04, -0.04), (-0.07, -0.08), (-0.08, -0.12), (-0.07, -0.16),
    ( 0.00, -0.15), ( 0.00, -0.20), ( 0.00, -0.16), ( 0.00, -0.12),
    ( 0.04, -0.15), ( 0.04, -0.20), ( 0.05, -0.16), ( 0.05, -0.12),
    ( 0.08, -0.14), ( 0.08, -0.19), ( 0.09, -0.15), ( 0.09, -0.11),
    ( 0.12, -0.13), ( 0.12, -0.17), ( 0.13, -0.14), ( 0.13, -0.10),
];

/// Four fingers stretched out to the left, stacked above the wrist, thumb
/// tip higher than the index tip.
const PALM_LEFT: [(f32, f32); JOINT_COUNT] = [
    ( 0.00,  0.00),
    (-0.02, -0.08), (-0.03, -0.15), (-0.04, -0.22), (-0.05, -0.29),
    (-0.08, -0.22), (-0.14, -0.22), (-0.20, -0.22), (-0.26, -0.22),
    (-0.08, -0.17), (-0.14, -0.17), (-0.20, -0.17), (-0.26, -0.17),
    (-0.08, -0.12), (-0.14, -0.12), (-0.20, -0.12), (-0.25, -0.12),
    (-0.08, -0.07), (-0.13, -0.07), (-0.17, -0.07), (-0.21, -0.07),
];

fn build(offsets: &[(f32, f32); JOINT_COUNT], map: impl Fn(f32, f32) -> (f32, f32)) -> LandmarkFrame {
    let mut joints = [Landmark::default(); JOINT_COUNT];
    for (slot, &(dx, dy)) in joints.iter_mut().zip(offsets.iter()) {
        let (mx, my) = map(dx, dy);
        *slot = Landmark::new(WRIST.0 + mx, WRIST.1 + my);
    }
    LandmarkFrame::new(joints, 0)
}

/// Index finger pointing in `dir`, other fingers curled.
pub fn pointing(dir: Direction) -> LandmarkFrame {
    // rotate the upright pose about the wrist
    match dir {
        Direction::Up    => build(&POINT_UP, |dx, dy| ( dx,  dy)),
        Direction::Down  => build(&POINT_UP, |dx, dy| (-dx, -dy)),
        Direction::Left  => build(&POINT_UP, |dx, dy| ( dy, -dx)),
        Direction::Right => build(&POINT_UP, |dx, dy| (-dy,  dx)),
    }
}

/// Open palm with the fingers extended toward `side` (Left or Right).
///
/// Up/Down have no palm gesture; they fall back to a fist.
pub fn palm(side: Direction) -> LandmarkFrame {
    match side {
        Direction::Left  => build(&PALM_LEFT, |dx, dy| ( dx, dy)),
        Direction::Right => build(&PALM_LEFT, |dx, dy| (-dx, dy)),
        Direction::Up | Direction::Down => fist(),
    }
}

pub fn fist() -> LandmarkFrame {
    build(&FIST, |dx, dy| (dx, dy))
}

/// Shift every joint by `(dx, dy)`.  Used to simulate the wrist travelling
/// across the frame.
pub fn translated(frame: &LandmarkFrame, dx: f32, dy: f32) -> LandmarkFrame {
    let mut joints = *frame.joints();
    for j in joints.iter_mut() {
        j.x += dx;
        j.y += dy;
    }
    LandmarkFrame::new(joints, frame.timestamp_ms)
}
