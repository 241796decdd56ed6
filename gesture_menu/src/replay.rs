//! Headless replay of recorded or hand-written input scripts.
//!
//! A script is JSON lines, one input per line, in time order:
//!
//! ```text
//! {"at_ms": 0,    "hand": [[0.5, 0.5], [0.46, 0.46, 0.0], ...21 points]}
//! {"at_ms": 33,   "no_hand": true}
//! {"at_ms": 750,  "channel": 4}
//! {"at_ms": 1500, "finished": true}
//! ```
//!
//! Replay drives a [`Navigator`] on synthetic time: timers that come due
//! between two lines fire at their own deadline, and whatever is still
//! pending after the last line is run to completion.  The result is fully
//! deterministic.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use hand_gesture::{FrameError, HandInput, Landmark, LandmarkFrame};
use menu_nav::{decode, ChannelSignal, NavEvent, Navigator};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("cannot read {path}: {source}")]
    Io { path: PathBuf, #[source] source: std::io::Error },
    #[error("line {line}: {source}")]
    Json { line: usize, #[source] source: serde_json::Error },
    #[error("line {line}: {source}")]
    Frame { line: usize, #[source] source: FrameError },
    #[error("line {line}: a point needs 2 or 3 coordinates, got {found}")]
    Point { line: usize, found: usize },
    #[error("line {line}: expected exactly one of hand, no_hand, channel, finished")]
    Action { line: usize },
    #[error("line {line}: at_ms {at_ms} is earlier than the previous line")]
    OutOfOrder { line: usize, at_ms: u64 },
}

// ════════════════════════════════════════════════════════════════════════════
// Script
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLine {
    at_ms: u64,
    #[serde(default)]
    hand: Option<Vec<Vec<f32>>>,
    #[serde(default)]
    no_hand: bool,
    #[serde(default)]
    channel: Option<i32>,
    #[serde(default)]
    finished: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Frame(HandInput),
    /// Raw channel code; codes outside 1–4 are "no command".
    Channel(i32),
    Finished,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    pub at_ms:  u64,
    pub action: Action,
}

pub fn parse_script(text: &str) -> Result<Vec<Step>, ReplayError> {
    let mut steps: Vec<Step> = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        let raw = raw.trim();
        if raw.is_empty() || raw.starts_with('#') {
            continue;
        }
        let parsed: RawLine = serde_json::from_str(raw)
            .map_err(|source| ReplayError::Json { line, source })?;
        let step = to_step(parsed, line)?;
        if steps.last().is_some_and(|prev| prev.at_ms > step.at_ms) {
            return Err(ReplayError::OutOfOrder { line, at_ms: step.at_ms });
        }
        steps.push(step);
    }
    Ok(steps)
}

pub fn load_script(path: impl AsRef<Path>) -> Result<Vec<Step>, ReplayError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|source| ReplayError::Io { path: path.to_path_buf(), source })?;
    parse_script(&text)
}

fn to_step(raw: RawLine, line: usize) -> Result<Step, ReplayError> {
    let chosen = [raw.hand.is_some(), raw.no_hand, raw.channel.is_some(), raw.finished]
        .iter()
        .filter(|&&b| b)
        .count();
    if chosen != 1 {
        return Err(ReplayError::Action { line });
    }

    let action = if let Some(points) = raw.hand {
        let joints = points
            .iter()
            .map(|p| match p.as_slice() {
                &[x, y]    => Ok(Landmark { x, y, z: 0.0 }),
                &[x, y, z] => Ok(Landmark { x, y, z }),
                other      => Err(ReplayError::Point { line, found: other.len() }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        let frame = LandmarkFrame::from_slice(&joints, raw.at_ms)
            .map_err(|source| ReplayError::Frame { line, source })?;
        Action::Frame(HandInput::Hand(frame))
    } else if raw.no_hand {
        Action::Frame(HandInput::NoHand)
    } else if let Some(code) = raw.channel {
        Action::Channel(code)
    } else {
        Action::Finished
    };
    Ok(Step { at_ms: raw.at_ms, action })
}

// ════════════════════════════════════════════════════════════════════════════
// Replay
// ════════════════════════════════════════════════════════════════════════════

/// One emitted event with its synthetic time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Emitted {
    pub at_ms: u64,
    pub kind:  &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

impl Emitted {
    fn new(at_ms: u64, event: NavEvent) -> Self {
        let (kind, index) = match event {
            NavEvent::SelectionChanged { index } => ("selection_changed", Some(index)),
            NavEvent::Confirmed { index }        => ("confirmed", Some(index)),
            NavEvent::BackRequested              => ("back_requested", None),
        };
        Emitted { at_ms, kind, index }
    }
}

/// Drive `nav` through `steps`.  Stops early once the navigator exits.
pub fn replay(nav: &mut Navigator, steps: &[Step]) -> Vec<Emitted> {
    let t0 = Instant::now();
    let ms = |at: Instant| at.saturating_duration_since(t0).as_millis() as u64;
    let mut out = Vec::new();

    for step in steps {
        let now = t0 + Duration::from_millis(step.at_ms);
        while let Some(due) = nav.next_deadline().filter(|&d| d <= now) {
            out.extend(nav.on_deadline(due).into_iter().map(|e| Emitted::new(ms(due), e)));
        }
        if nav.is_exited() {
            break;
        }
        let events = match &step.action {
            Action::Frame(input) => nav.on_input(input, now),
            Action::Channel(code) => match decode(*code) {
                Some(cmd) => nav.on_channel(ChannelSignal::Command(cmd), now),
                None      => nav.on_deadline(now),
            },
            Action::Finished => nav.on_channel(ChannelSignal::Finished, now),
        };
        out.extend(events.into_iter().map(|e| Emitted::new(step.at_ms, e)));
    }

    while let Some(due) = nav.next_deadline() {
        out.extend(nav.on_deadline(due).into_iter().map(|e| Emitted::new(ms(due), e)));
    }
    debug!(steps = steps.len(), events = out.len(), index = nav.index(), "replay done");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hand_gesture::{poses, Direction};
    use menu_nav::NavLayout;

    fn hand_line(at_ms: u64, frame: &LandmarkFrame) -> String {
        let pts: Vec<[f32; 2]> = frame.joints().iter().map(|j| [j.x, j.y]).collect();
        format!(r#"{{"at_ms": {}, "hand": {}}}"#, at_ms, serde_json::to_string(&pts).unwrap())
    }

    fn grid() -> Navigator {
        Navigator::with_defaults(NavLayout::grid2col((0..6).map(|i| format!("p{}", i))).unwrap())
    }

    #[test]
    fn parses_every_action() {
        let text = format!(
            "{}\n# comment\n{{\"at_ms\": 40, \"no_hand\": true}}\n{{\"at_ms\": 50, \"channel\": 1}}\n{{\"at_ms\": 60, \"finished\": true}}\n",
            hand_line(0, &poses::fist())
        );
        let steps = parse_script(&text).unwrap();
        assert_eq!(steps.len(), 4);
        assert!(matches!(steps[0].action, Action::Frame(HandInput::Hand(_))));
        assert_eq!(steps[1].action, Action::Frame(HandInput::NoHand));
        assert_eq!(steps[2].action, Action::Channel(1));
        assert_eq!(steps[3].action, Action::Finished);
    }

    #[test]
    fn rejects_bad_lines() {
        assert!(matches!(parse_script(r#"{"at_ms": 0}"#), Err(ReplayError::Action { line: 1 })));
        assert!(matches!(
            parse_script(r#"{"at_ms": 0, "no_hand": true, "finished": true}"#),
            Err(ReplayError::Action { .. })
        ));
        assert!(matches!(
            parse_script(r#"{"at_ms": 0, "hand": [[0.1, 0.2]]}"#),
            Err(ReplayError::Frame { line: 1, .. })
        ));
        assert!(matches!(
            parse_script("{\"at_ms\": 5, \"no_hand\": true}\n{\"at_ms\": 1, \"no_hand\": true}"),
            Err(ReplayError::OutOfOrder { line: 2, at_ms: 1 })
        ));
        assert!(matches!(parse_script("{not json"), Err(ReplayError::Json { line: 1, .. })));
    }

    #[test]
    fn held_palm_confirms_at_the_hold_deadline() {
        let palm = poses::palm(Direction::Right);
        let text: String = (0..40).map(|i| hand_line(i * 33, &palm) + "\n").collect();
        let steps = parse_script(&text).unwrap();
        let mut nav = grid();
        let out = replay(&mut nav, &steps);
        assert_eq!(out, vec![Emitted { at_ms: 1000, kind: "confirmed", index: Some(0) }]);
    }

    #[test]
    fn channel_and_pointing_share_the_cooldown() {
        let text = format!(
            "{{\"at_ms\": 0, \"channel\": 4}}\n{}\n{}\n",
            hand_line(300, &poses::pointing(Direction::Right)),
            hand_line(1000, &poses::pointing(Direction::Right)),
        );
        let mut nav = grid();
        let out = replay(&mut nav, &parse_script(&text).unwrap());
        assert_eq!(
            out,
            vec![
                Emitted { at_ms: 0,    kind: "selection_changed", index: Some(2) },
                Emitted { at_ms: 1000, kind: "selection_changed", index: Some(3) },
            ]
        );
    }

    #[test]
    fn emitted_serializes_without_empty_index() {
        let e = Emitted { at_ms: 7, kind: "back_requested", index: None };
        assert_eq!(serde_json::to_string(&e).unwrap(), r#"{"at_ms":7,"kind":"back_requested"}"#);
    }
}
