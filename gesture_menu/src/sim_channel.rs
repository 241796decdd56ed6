//! Keyboard stand-in for the secondary command channel.
//!
//! The window pushes raw codes through a [`SimChannelHandle`]; the poller
//! thread reads them back through the [`CommandChannel`] impl.  A code is
//! consumed by the poll that sees it, like a sensor that reports each
//! trigger once.

use std::sync::{Arc, Mutex};

use menu_nav::{decode, ChannelError, CommandChannel, NavCommand};

#[derive(Debug, Default)]
struct Shared {
    code:     i32,
    finished: bool,
}

/// Polled side, handed to the poller thread.
#[derive(Debug)]
pub struct SimChannel {
    shared: Arc<Mutex<Shared>>,
}

/// Writing side, kept by the window.
#[derive(Clone, Debug)]
pub struct SimChannelHandle {
    shared: Arc<Mutex<Shared>>,
}

pub fn sim_channel() -> (SimChannel, SimChannelHandle) {
    let shared = Arc::new(Mutex::new(Shared::default()));
    (SimChannel { shared: Arc::clone(&shared) }, SimChannelHandle { shared })
}

impl SimChannelHandle {
    /// Set the raw code (1 right, 2 up, 3 left, 4 down).
    pub fn press(&self, code: i32) {
        if let Ok(mut s) = self.shared.lock() { s.code = code; }
    }

    pub fn finish(&self) {
        if let Ok(mut s) = self.shared.lock() { s.finished = true; }
    }
}

impl CommandChannel for SimChannel {
    fn poll_command(&mut self) -> Result<Option<NavCommand>, ChannelError> {
        let mut s = self.shared.lock()
            .map_err(|_| ChannelError::Unavailable("sim channel lock poisoned".into()))?;
        Ok(decode(std::mem::take(&mut s.code)))
    }

    fn poll_finished(&mut self) -> Result<bool, ChannelError> {
        let s = self.shared.lock()
            .map_err(|_| ChannelError::Unavailable("sim channel lock poisoned".into()))?;
        Ok(s.finished)
    }
}
