//! Frame sources: LeapMotion hardware and keyboard simulation.
//!
//! Both run on their own thread and push [`HandInput`]s into a
//! [`FrameSink`], normally the dispatch queue of the active screen.  The
//! dispatcher doesn't need to know whether frames came from a real sensor or
//! from the simulator.

use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use hand_gesture::{poses, Direction, HandInput, LandmarkFrame};
use tracing::{debug, trace};

use crate::dispatcher::InputSender;

// ════════════════════════════════════════════════════════════════════════════
// FrameSink / FrameSource
// ════════════════════════════════════════════════════════════════════════════

/// Where a source delivers detector results.  Returns false once nobody is
/// listening, which ends the source.
pub trait FrameSink: Send + 'static {
    fn deliver(&self, input: HandInput) -> bool;
}

impl FrameSink for InputSender {
    fn deliver(&self, input: HandInput) -> bool { self.frame(input) }
}

impl FrameSink for Sender<HandInput> {
    fn deliver(&self, input: HandInput) -> bool { self.send(input).is_ok() }
}

/// Anything that can produce a stream of hand frames.
pub trait FrameSource: Send + 'static {
    fn run(self: Box<Self>, sink: Box<dyn FrameSink>);
}

/// Spawn a frame source on its own thread.
pub fn spawn_frame_source<S: FrameSource, K: FrameSink>(source: S, sink: K) -> JoinHandle<()> {
    thread::spawn(move || Box::new(source).run(Box::new(sink)))
}

// ════════════════════════════════════════════════════════════════════════════
// LeapFrameSource — real hardware (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Millimetres above the device → unit square, y pointing down as a camera
/// detector reports it.  Interaction box: ±150 mm across, 100–400 mm high.
#[cfg(feature = "leap")]
macro_rules! leap_point {
    ($v:expr) => {{
        let v = $v;
        hand_gesture::Landmark {
            x: (0.5 + v.x / 300.0).clamp(0.0, 1.0),
            y: (1.0 - (v.y - 100.0) / 300.0).clamp(0.0, 1.0),
            z: v.z / 300.0,
        }
    }};
}

/// Frame source backed by a LeapMotion controller.
///
/// Requires the `leap` feature flag and the LeapC shared library installed.
///
/// The first tracked hand is converted into the 21-joint layout: the wrist
/// is the base of the middle metacarpal, each digit contributes four points
/// from its bone joints (thumb: CMC, MCP, IP, tip; fingers: MCP, PIP, DIP,
/// tip).
#[cfg(feature = "leap")]
pub struct LeapFrameSource;

#[cfg(feature = "leap")]
impl FrameSource for LeapFrameSource {
    fn run(self: Box<Self>, sink: Box<dyn FrameSink>) {
        use hand_gesture::{Landmark, JOINT_COUNT};
        use leaprs::*;
        use tracing::warn;

        let mut connection = match Connection::create(ConnectionConfig::default()) {
            Ok(c)  => c,
            Err(e) => { warn!(error = ?e, "cannot create LeapC connection"); return; }
        };
        if let Err(e) = connection.open() {
            warn!(error = ?e, "cannot open LeapMotion device");
            return;
        }

        let start = Instant::now();
        loop {
            let msg = match connection.poll(100) {
                Ok(m)  => m,
                Err(_) => continue,
            };
            let Event::Tracking(frame) = msg.event() else { continue };

            let input = match frame.hands().next() {
                Some(hand) => {
                    let digits: Vec<_> = hand.digits().collect();
                    if digits.len() < 5 { continue; }

                    let mut joints = [Landmark::default(); JOINT_COUNT];
                    joints[0] = leap_point!(digits[2].metacarpal().prev_joint());
                    for (d, digit) in digits.iter().enumerate() {
                        let base = 1 + d * 4;
                        joints[base]     = leap_point!(digit.proximal().prev_joint());
                        joints[base + 1] = leap_point!(digit.intermediate().prev_joint());
                        joints[base + 2] = leap_point!(digit.distal().prev_joint());
                        joints[base + 3] = leap_point!(digit.distal().next_joint());
                    }
                    let ts = start.elapsed().as_millis() as u64;
                    HandInput::Hand(LandmarkFrame::new(joints, ts))
                }
                None => HandInput::NoHand,
            };
            if !sink.deliver(input) {
                return;
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SimFrameSource — keyboard simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Raw input event from the simulation window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimInput {
    KeyDown(SimKey),
    KeyUp(SimKey),
    Quit,
}

/// Simulated hand shapes (mapped from minifb keys).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimKey {
    PointUp,     // Up arrow
    PointDown,   // Down arrow
    PointLeft,   // Left arrow
    PointRight,  // Right arrow
    PalmLeft,    // Z
    PalmRight,   // X
    Fist,        // F
    SwipeLeft,   // A
    SwipeRight,  // D
}

impl SimKey {
    /// Pose shown while the key is held.  Swipes are motions, not poses.
    pub fn pose(self) -> Option<LandmarkFrame> {
        match self {
            SimKey::PointUp    => Some(poses::pointing(Direction::Up)),
            SimKey::PointDown  => Some(poses::pointing(Direction::Down)),
            SimKey::PointLeft  => Some(poses::pointing(Direction::Left)),
            SimKey::PointRight => Some(poses::pointing(Direction::Right)),
            SimKey::PalmLeft   => Some(poses::palm(Direction::Left)),
            SimKey::PalmRight  => Some(poses::palm(Direction::Right)),
            SimKey::Fist       => Some(poses::fist()),
            SimKey::SwipeLeft | SimKey::SwipeRight => None,
        }
    }

    /// Two fist frames with the wrist travelling 0.3 across the image.
    pub fn swipe_frames(self) -> Option<[LandmarkFrame; 2]> {
        let dx = match self {
            SimKey::SwipeLeft  => -0.15,
            SimKey::SwipeRight =>  0.15,
            _ => return None,
        };
        let fist = poses::fist();
        Some([poses::translated(&fist, -dx, 0.0), poses::translated(&fist, dx, 0.0)])
    }
}

/// Frame source driven by [`SimInput`] events from the visualizer window.
///
/// Emits the held key's pose (or NoHand) every `frame_interval`, so the
/// navigator sees a continuous camera-like stream.
pub struct SimFrameSource {
    pub rx:             Receiver<SimInput>,
    pub frame_interval: Duration,
}

impl SimFrameSource {
    pub fn new(rx: Receiver<SimInput>) -> Self {
        SimFrameSource { rx, frame_interval: Duration::from_millis(33) }
    }
}

impl FrameSource for SimFrameSource {
    fn run(self: Box<Self>, sink: Box<dyn FrameSink>) {
        let start = Instant::now();
        let stamp = |mut f: LandmarkFrame| {
            f.timestamp_ms = start.elapsed().as_millis() as u64;
            HandInput::Hand(f)
        };
        let mut held: Option<SimKey> = None;
        let mut next_tick = start;

        loop {
            let wait = next_tick.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(wait) {
                Ok(SimInput::KeyDown(key)) => {
                    if let Some(frames) = key.swipe_frames() {
                        debug!(?key, "simulated swipe");
                        for f in frames {
                            if !sink.deliver(stamp(f)) { return; }
                        }
                    } else {
                        held = Some(key);
                    }
                }
                Ok(SimInput::KeyUp(key)) => {
                    if held == Some(key) { held = None; }
                }
                Ok(SimInput::Quit) | Err(RecvTimeoutError::Disconnected) => return,
                Err(RecvTimeoutError::Timeout) => {
                    let input = match held.and_then(SimKey::pose) {
                        Some(f) => stamp(f),
                        None    => HandInput::NoHand,
                    };
                    trace!(?held, "sim frame");
                    if !sink.deliver(input) { return; }
                    next_tick += self.frame_interval;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hand_gesture::{classify, Gesture, Swipe, SwipeTracker};
    use std::sync::mpsc;

    #[test]
    fn keys_map_to_their_gestures() {
        let cases = [
            (SimKey::PointUp,    Gesture::PointUp),
            (SimKey::PointDown,  Gesture::PointDown),
            (SimKey::PointLeft,  Gesture::PointLeft),
            (SimKey::PointRight, Gesture::PointRight),
            (SimKey::PalmLeft,   Gesture::PalmLeft),
            (SimKey::PalmRight,  Gesture::PalmRight),
            (SimKey::Fist,       Gesture::None),
        ];
        for (key, gesture) in cases {
            let frame = key.pose().unwrap();
            assert_eq!(classify(&HandInput::Hand(frame)), gesture, "{:?}", key);
        }
    }

    #[test]
    fn swipe_keys_produce_a_swipe() {
        let mut tracker = SwipeTracker::default();
        let [a, b] = SimKey::SwipeRight.swipe_frames().unwrap();
        assert_eq!(tracker.observe(&HandInput::Hand(a)), None);
        assert_eq!(tracker.observe(&HandInput::Hand(b)), Some(Swipe::Right));
        assert!(SimKey::Fist.swipe_frames().is_none());
    }

    #[test]
    fn held_key_streams_until_released() {
        let (sim_tx, sim_rx) = mpsc::channel();
        let (frame_tx, frame_rx) = mpsc::channel::<HandInput>();
        let source = SimFrameSource { rx: sim_rx, frame_interval: Duration::from_millis(5) };
        let handle = spawn_frame_source(source, frame_tx);

        sim_tx.send(SimInput::KeyDown(SimKey::PalmRight)).unwrap();
        let saw_palm = frame_rx
            .iter()
            .take(200)
            .any(|i| classify(&i) == Gesture::PalmRight);
        assert!(saw_palm);

        sim_tx.send(SimInput::KeyUp(SimKey::PalmRight)).unwrap();
        let saw_no_hand = frame_rx.iter().take(200).any(|i| i == HandInput::NoHand);
        assert!(saw_no_hand);

        sim_tx.send(SimInput::Quit).unwrap();
        handle.join().unwrap();
    }
}
