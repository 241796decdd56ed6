//! End-to-end runs of one screen: dispatcher thread, channel poller, frame
//! delivery and headless replay together.

use std::io::Write;
use std::thread;
use std::time::Duration;

use gesture_menu::dispatcher::spawn_dispatcher;
use gesture_menu::poller::spawn_poller;
use gesture_menu::replay::{load_script, replay, Emitted};
use gesture_menu::sim_channel::sim_channel;
use gesture_menu::source::FrameSink;
use hand_gesture::{poses, Direction, HandInput, LandmarkFrame};
use menu_nav::{ChannelConfig, NavConfig, NavEvent, NavLayout, Navigator};

const WAIT: Duration = Duration::from_secs(3);

fn poses_grid() -> Navigator {
    Navigator::with_defaults(
        NavLayout::grid2col(["Plank", "Cobra pose", "Boat pose", "Fish pose"]).unwrap(),
    )
}

fn fast_channel() -> ChannelConfig {
    ChannelConfig { poll_interval_ms: 10, initial_delay_ms: 10 }
}

#[test]
fn channel_moves_then_finishes() {
    let mut screen = spawn_dispatcher(poses_grid());
    let (channel, keys) = sim_channel();
    screen.attach_poller(spawn_poller(channel, &fast_channel(), screen.inputs()));

    keys.press(4);
    assert_eq!(screen.recv_event_timeout(WAIT), Some(NavEvent::SelectionChanged { index: 2 }));

    // "finished" is terminal and ignores the cooldown the move just started
    keys.finish();
    assert_eq!(screen.recv_event_timeout(WAIT), Some(NavEvent::Confirmed { index: 2 }));

    let nav = screen.exit().unwrap();
    assert!(nav.is_exited());
    assert_eq!(nav.index(), 2);
}

#[test]
fn frames_and_channel_share_one_cooldown() {
    let mut screen = spawn_dispatcher(poses_grid());
    let (channel, keys) = sim_channel();
    screen.attach_poller(spawn_poller(channel, &fast_channel(), screen.inputs()));
    let frames = screen.inputs();

    assert!(frames.deliver(HandInput::Hand(poses::pointing(Direction::Right))));
    assert_eq!(screen.recv_event_timeout(WAIT), Some(NavEvent::SelectionChanged { index: 1 }));

    // Within the 1 s cooldown the channel command is rejected.
    keys.press(4);
    assert_eq!(screen.recv_event_timeout(Duration::from_millis(300)), None);

    let nav = screen.exit().unwrap();
    assert_eq!(nav.index(), 1);
}

#[test]
fn leaving_the_screen_cancels_a_pending_hold() {
    let mut screen = spawn_dispatcher(poses_grid());
    let frames = screen.inputs();
    for _ in 0..5 {
        frames.deliver(HandInput::Hand(poses::palm(Direction::Right)));
        thread::sleep(Duration::from_millis(20));
    }

    let nav = screen.exit().unwrap();
    assert!(nav.is_exited());
    assert_eq!(nav.next_deadline(), None);

    thread::sleep(Duration::from_millis(1100));
    assert_eq!(screen.try_event(), None);
    assert!(!frames.deliver(HandInput::NoHand));
}

fn hand_line(at_ms: u64, frame: &LandmarkFrame) -> String {
    let pts: Vec<[f32; 3]> = frame.joints().iter().map(|j| [j.x, j.y, j.z]).collect();
    format!("{{\"at_ms\": {}, \"hand\": {}}}", at_ms, serde_json::to_string(&pts).unwrap())
}

#[test]
fn replay_script_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# move down by channel, then hold the left palm").unwrap();
    writeln!(file, "{{\"at_ms\": 0, \"channel\": 4}}").unwrap();
    for i in 0..10 {
        writeln!(file, "{}", hand_line(100 + i * 100, &poses::palm(Direction::Left))).unwrap();
    }
    writeln!(file, "{{\"at_ms\": 1200, \"no_hand\": true}}").unwrap();
    file.flush().unwrap();

    let steps = load_script(file.path()).unwrap();
    let mut nav = NavConfig::builtin().screen("all_poses").unwrap().navigator().unwrap();
    let out = replay(&mut nav, &steps);

    assert_eq!(
        out,
        vec![
            Emitted { at_ms: 0,    kind: "selection_changed", index: Some(2) },
            Emitted { at_ms: 1100, kind: "back_requested",    index: None },
        ]
    );
    assert!(nav.is_exited());
}
