//! Secondary-channel polling thread.
//!
//! Waits `initial_delay`, then every `poll_interval` asks the channel for a
//! command and for the finished flag, in that order, and posts what it gets
//! into the screen's dispatch queue.  It never touches navigation state.
//!
//! The waits are `recv_timeout` on a private stop channel, so
//! [`PollerHandle::stop`] takes effect at once rather than after the
//! current sleep.  The thread also stops by itself after reporting
//! "finished", or when the dispatch queue has gone away.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use menu_nav::{ChannelConfig, ChannelSignal, CommandChannel};
use tracing::{debug, warn};

use crate::dispatcher::InputSender;

pub struct PollerHandle {
    stop_tx: Option<Sender<()>>,
    thread:  Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// Stop polling and wait for the thread to finish.
    pub fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(t) = self.thread.take() {
            let _ = t.join();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) { self.stop(); }
}

/// Spawn the polling loop for one screen.
pub fn spawn_poller<C: CommandChannel>(channel: C, cfg: &ChannelConfig, inputs: InputSender) -> PollerHandle {
    let (stop_tx, stop_rx) = mpsc::channel::<()>();
    let initial  = cfg.initial_delay();
    let interval = cfg.poll_interval();
    let thread = thread::spawn(move || poll_loop(channel, initial, interval, inputs, stop_rx));
    PollerHandle { stop_tx: Some(stop_tx), thread: Some(thread) }
}

/// True if the wait ran its full length, false if stop was requested.
fn wait(stop: &Receiver<()>, d: Duration) -> bool {
    matches!(stop.recv_timeout(d), Err(RecvTimeoutError::Timeout))
}

fn poll_loop<C: CommandChannel>(
    mut channel: C,
    initial:     Duration,
    interval:    Duration,
    inputs:      InputSender,
    stop:        Receiver<()>,
) {
    if !wait(&stop, initial) {
        return;
    }
    loop {
        match channel.poll_command() {
            Ok(Some(cmd)) => {
                debug!(?cmd, "channel command");
                if !inputs.channel(ChannelSignal::Command(cmd)) {
                    return;
                }
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "channel command poll failed"),
        }
        match channel.poll_finished() {
            Ok(true) => {
                debug!("channel finished, polling stops");
                let _ = inputs.channel(ChannelSignal::Finished);
                return;
            }
            Ok(false) => {}
            Err(e) => warn!(error = %e, "channel finished poll failed"),
        }
        if !wait(&stop, interval) {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use hand_gesture::HandInput;
    use menu_nav::{ChannelError, NavCommand, NavEvent, NavLayout, Navigator};

    use crate::dispatcher::spawn_dispatcher;

    /// Replays canned answers, one per poll; counts polls.
    struct Scripted {
        commands: VecDeque<Result<Option<NavCommand>, ChannelError>>,
        finished: VecDeque<bool>,
        polls:    Arc<Mutex<usize>>,
    }

    impl CommandChannel for Scripted {
        fn poll_command(&mut self) -> Result<Option<NavCommand>, ChannelError> {
            if let Ok(mut n) = self.polls.lock() { *n += 1; }
            self.commands.pop_front().unwrap_or(Ok(None))
        }
        fn poll_finished(&mut self) -> Result<bool, ChannelError> {
            Ok(self.finished.pop_front().unwrap_or(false))
        }
    }

    fn fast() -> ChannelConfig {
        ChannelConfig { poll_interval_ms: 5, initial_delay_ms: 5 }
    }

    fn grid() -> Navigator {
        Navigator::with_defaults(NavLayout::grid2col(["a", "b", "c", "d"]).unwrap())
    }

    #[test]
    fn errors_are_treated_as_none() {
        let mut screen = spawn_dispatcher(grid());
        let channel = Scripted {
            commands: VecDeque::from([
                Err(ChannelError::Unavailable("offline".into())),
                Ok(Some(NavCommand::Down)),
            ]),
            finished: VecDeque::new(),
            polls:    Arc::new(Mutex::new(0)),
        };
        screen.attach_poller(spawn_poller(channel, &fast(), screen.inputs()));
        assert_eq!(
            screen.recv_event_timeout(Duration::from_secs(2)),
            Some(NavEvent::SelectionChanged { index: 2 })
        );
        screen.exit();
    }

    #[test]
    fn finished_confirms_and_stops_polling() {
        let screen = spawn_dispatcher(grid());
        let polls = Arc::new(Mutex::new(0));
        let channel = Scripted {
            commands: VecDeque::new(),
            finished: VecDeque::from([false, true]),
            polls:    Arc::clone(&polls),
        };
        let poller = spawn_poller(channel, &fast(), screen.inputs());
        assert_eq!(
            screen.recv_event_timeout(Duration::from_secs(2)),
            Some(NavEvent::Confirmed { index: 0 })
        );
        thread::sleep(Duration::from_millis(50));
        assert!(poller.is_finished());
        assert_eq!(*polls.lock().unwrap(), 2);
    }

    #[test]
    fn stop_interrupts_the_initial_delay() {
        let screen = spawn_dispatcher(grid());
        let polls = Arc::new(Mutex::new(0));
        let channel = Scripted {
            commands: VecDeque::new(),
            finished: VecDeque::new(),
            polls:    Arc::clone(&polls),
        };
        let cfg = ChannelConfig { poll_interval_ms: 750, initial_delay_ms: 60_000 };
        let mut poller = spawn_poller(channel, &cfg, screen.inputs());
        let started = std::time::Instant::now();
        poller.stop();
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(*polls.lock().unwrap(), 0);
        assert!(screen.inputs().frame(HandInput::NoHand));
    }
}
