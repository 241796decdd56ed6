//! Single-writer dispatch thread.
//!
//! Every producer (frame source, channel poller, the screen itself) posts an
//! [`Input`] into one mpsc queue.  One thread owns the [`Navigator`] and is
//! the only code that ever touches cursor, gate or timers.  Between inputs
//! it sleeps in `recv_timeout` until the navigator's next deadline, so the
//! hold and cooldown timers fire on this same thread.
//!
//! ```text
//!   frame thread ──┐
//!                  ├──► Sender<Input> ──► dispatch thread (Navigator) ──► Sender<NavEvent>
//!   poller thread ─┘                           ▲ recv_timeout(next_deadline)
//! ```
//!
//! [`ScreenHandle::exit`] is synchronous: once it returns, no further
//! [`NavEvent`] is handed to the screen, even if the dispatch thread was in
//! the middle of a step.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use hand_gesture::HandInput;
use menu_nav::{ChannelSignal, NavEvent, Navigator};
use tracing::{debug, trace};

use crate::poller::PollerHandle;

// ════════════════════════════════════════════════════════════════════════════
// Input
// ════════════════════════════════════════════════════════════════════════════

/// Everything the dispatch thread reacts to.
#[derive(Clone, Debug, PartialEq)]
pub enum Input {
    Frame(HandInput),
    Channel(ChannelSignal),
    Exit,
}

/// Cloneable posting end of the dispatch queue.  Sends fail (return false)
/// once the screen has been left.
#[derive(Clone, Debug)]
pub struct InputSender {
    tx: Sender<Input>,
}

impl InputSender {
    pub fn frame(&self, input: HandInput) -> bool { self.tx.send(Input::Frame(input)).is_ok() }
    pub fn channel(&self, signal: ChannelSignal) -> bool { self.tx.send(Input::Channel(signal)).is_ok() }
}

// ════════════════════════════════════════════════════════════════════════════
// ScreenHandle
// ════════════════════════════════════════════════════════════════════════════

/// The active screen's view of its navigator thread.
pub struct ScreenHandle {
    inputs:    InputSender,
    events:    Receiver<NavEvent>,
    cancelled: Arc<AtomicBool>,
    thread:    Option<JoinHandle<Navigator>>,
    poller:    Option<PollerHandle>,
}

/// Start the dispatch thread for one screen entry.
pub fn spawn_dispatcher(navigator: Navigator) -> ScreenHandle {
    let (input_tx, input_rx) = mpsc::channel::<Input>();
    let (event_tx, event_rx) = mpsc::channel::<NavEvent>();
    let cancelled = Arc::new(AtomicBool::new(false));

    let flag = Arc::clone(&cancelled);
    let thread = thread::spawn(move || dispatch_loop(navigator, input_rx, event_tx, flag));

    ScreenHandle {
        inputs:    InputSender { tx: input_tx },
        events:    event_rx,
        cancelled,
        thread:    Some(thread),
        poller:    None,
    }
}

impl ScreenHandle {
    pub fn inputs(&self) -> InputSender { self.inputs.clone() }

    /// Tie a channel poller to this screen so [`ScreenHandle::exit`] stops it.
    pub fn attach_poller(&mut self, poller: PollerHandle) {
        self.poller = Some(poller);
    }

    pub fn is_exited(&self) -> bool { self.cancelled.load(Ordering::Acquire) }

    /// Next event, if one is ready.
    pub fn try_event(&self) -> Option<NavEvent> {
        if self.is_exited() {
            return None;
        }
        self.events.try_recv().ok()
    }

    /// Wait up to `timeout` for the next event.
    pub fn recv_event_timeout(&self, timeout: Duration) -> Option<NavEvent> {
        if self.is_exited() {
            return None;
        }
        let event = self.events.recv_timeout(timeout).ok()?;
        (!self.is_exited()).then_some(event)
    }

    pub fn drain_events(&self) -> Vec<NavEvent> {
        std::iter::from_fn(|| self.try_event()).collect()
    }

    /// Leave the screen.  Stops the poller, cancels pending timers and
    /// returns the navigator as it was at exit (`None` if the thread is
    /// already gone).
    pub fn exit(&mut self) -> Option<Navigator> {
        self.cancelled.store(true, Ordering::Release);
        if let Some(mut poller) = self.poller.take() {
            poller.stop();
        }
        let _ = self.inputs.tx.send(Input::Exit);
        let nav = self.thread.take().and_then(|t| t.join().ok());
        debug!(index = ?nav.as_ref().map(Navigator::index), "screen exited");
        nav
    }
}

impl Drop for ScreenHandle {
    fn drop(&mut self) {
        if self.thread.is_some() || self.poller.is_some() {
            self.exit();
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// dispatch_loop — the only writer
// ════════════════════════════════════════════════════════════════════════════

fn dispatch_loop(
    mut nav:   Navigator,
    inputs:    Receiver<Input>,
    events:    Sender<NavEvent>,
    cancelled: Arc<AtomicBool>,
) -> Navigator {
    loop {
        let next = match nav.next_deadline() {
            Some(at) => match inputs.recv_timeout(at.saturating_duration_since(Instant::now())) {
                Ok(input)                           => Some(input),
                Err(RecvTimeoutError::Timeout)      => None,
                Err(RecvTimeoutError::Disconnected) => Some(Input::Exit),
            },
            None => Some(inputs.recv().unwrap_or(Input::Exit)),
        };

        if cancelled.load(Ordering::Acquire) {
            nav.exit();
            break;
        }

        let now = Instant::now();
        let produced = match next {
            None                         => nav.on_deadline(now),
            Some(Input::Frame(frame))    => nav.on_input(&frame, now),
            Some(Input::Channel(signal)) => nav.on_channel(signal, now),
            Some(Input::Exit) => {
                nav.exit();
                break;
            }
        };

        for event in produced {
            trace!(?event, "dispatch");
            if cancelled.load(Ordering::Acquire) || events.send(event).is_err() {
                nav.exit();
                return nav;
            }
        }

        if nav.is_exited() {
            debug!(index = nav.index(), "navigator finished, dispatch stopping");
            break;
        }
    }
    nav
}
