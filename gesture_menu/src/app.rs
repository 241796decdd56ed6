//! Interactive screen loop.
//!
//! `run` enters one configured screen: it starts the session, spawns the
//! dispatch thread, the channel poller and a frame source, then drives the
//! visualizer at ~60 fps until the screen produces a terminal event or the
//! window is closed.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use hand_gesture::{classify, Gesture, HandInput};
use menu_nav::{ConfigError, LayoutError, NavConfig, NavEvent, NavLayout, ScreenLayout};
use thiserror::Error;
use tracing::info;

use crate::dispatcher::{spawn_dispatcher, InputSender};
use crate::poller::spawn_poller;
use crate::session::SessionContext;
use crate::sim_channel::sim_channel;
use crate::source::{spawn_frame_source, FrameSink};
use crate::visualizer::{View, Visualizer};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error("cannot open window: {0}")]
    Window(#[from] minifb::Error),
}

// ════════════════════════════════════════════════════════════════════════════
// Outcome
// ════════════════════════════════════════════════════════════════════════════

/// How a screen was left.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Confirmed { index: usize, item: String },
    Back,
    /// Window closed before a terminal event.
    Closed,
}

impl Outcome {
    /// `None` unless `event` leaves the screen.
    pub fn from_event(layout: &NavLayout, event: &NavEvent) -> Option<Self> {
        if !event.is_terminal() {
            return None;
        }
        Some(match *event {
            NavEvent::Confirmed { index } => Outcome::Confirmed {
                index,
                item: layout.item(index).unwrap_or_default().to_string(),
            },
            _ => Outcome::Back,
        })
    }
}

/// Status bar text after `event`.
pub fn status_line(layout: &NavLayout, event: &NavEvent) -> String {
    match *event {
        NavEvent::SelectionChanged { index } => format!(
            "selected {}/{}: {}",
            index + 1,
            layout.len(),
            layout.item(index).unwrap_or_default()
        ),
        NavEvent::Confirmed { index } => format!(
            "confirmed: {}   (q to quit)",
            layout.item(index).unwrap_or_default()
        ),
        NavEvent::BackRequested => "back   (q to quit)".to_string(),
    }
}

/// What the screen announces on entry.
pub fn prompt(layout: ScreenLayout) -> &'static str {
    match layout {
        ScreenLayout::Binary2 => "Point left or right to choose, hold an open palm to confirm.",
        _ => "Point to move, hold your right palm to select, hold your left palm to go back.",
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Gesture tap
// ════════════════════════════════════════════════════════════════════════════

/// Frame sink that records the latest classification for display before
/// forwarding the frame to the dispatcher.
struct GestureTap {
    inner:  InputSender,
    latest: Arc<Mutex<Gesture>>,
}

impl FrameSink for GestureTap {
    fn deliver(&self, input: HandInput) -> bool {
        if let Ok(mut g) = self.latest.lock() {
            *g = classify(&input);
        }
        self.inner.frame(input)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run
// ════════════════════════════════════════════════════════════════════════════

/// Enter `screen_name` and drive it until it is left.
pub fn run(config: &NavConfig, screen_name: &str) -> Result<Outcome, AppError> {
    let screen = config.screen(screen_name)?;
    let navigator = screen.navigator()?;
    let layout = navigator.layout().clone();

    let mut session = SessionContext::logging();
    session.start();
    session.enter_screen(screen_name, prompt(screen.layout));

    let mut handle = spawn_dispatcher(navigator);
    let (channel, channel_handle) = sim_channel();
    handle.attach_poller(spawn_poller(channel, &screen.channel, handle.inputs()));

    let latest = Arc::new(Mutex::new(Gesture::NoHand));
    let tap = GestureTap { inner: handle.inputs(), latest: Arc::clone(&latest) };
    let (sim_tx, sim_rx) = mpsc::channel();

    #[cfg(feature = "leap")]
    let _frames = {
        drop(sim_rx);
        spawn_frame_source(crate::source::LeapFrameSource, tap)
    };
    #[cfg(not(feature = "leap"))]
    let _frames = spawn_frame_source(crate::source::SimFrameSource::new(sim_rx), tap);

    let mut vis = Visualizer::new(sim_tx, channel_handle)?;

    let mut selected = 0;
    let mut status = format!("{} ({})", screen_name, layout.kind().name());
    let mut outcome = None;

    while vis.is_open() {
        if !vis.poll_input() { break; }

        for event in handle.drain_events() {
            status = status_line(&layout, &event);
            match event {
                NavEvent::SelectionChanged { index } | NavEvent::Confirmed { index } => selected = index,
                NavEvent::BackRequested => {}
            }
            if let Some(o) = Outcome::from_event(&layout, &event) {
                info!(screen = screen_name, outcome = ?o, "screen left");
                session.leave_screen();
                outcome = Some(o);
            }
        }

        let gesture = latest.lock().map(|g| g.label()).unwrap_or("?");
        vis.render(&View {
            title:    screen_name,
            layout:   &layout,
            selected,
            gesture,
            status:   &status,
            done:     outcome.is_some(),
        });
    }

    handle.exit();
    session.stop();
    Ok(outcome.unwrap_or(Outcome::Closed))
}
