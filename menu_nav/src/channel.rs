//! Secondary command channel: an independently polled source of the same
//! four directional commands plus a terminal "finished" flag.
//!
//! Raw codes reported by the channel:
//!
//! | Code | Command |
//! |---|---|
//! | 1 | Right |
//! | 2 | Up |
//! | 3 | Left |
//! | 4 | Down |
//! | anything else | none |

use thiserror::Error;

use crate::command::NavCommand;

/// What one poll of the channel contributes to the navigator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelSignal {
    Command(NavCommand),
    /// The exercise is over: confirm and leave, regardless of cooldown.
    Finished,
}

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("command channel unavailable: {0}")]
    Unavailable(String),
}

/// Decode a raw channel code.
pub fn decode(code: i32) -> Option<NavCommand> {
    match code {
        1 => Some(NavCommand::Right),
        2 => Some(NavCommand::Up),
        3 => Some(NavCommand::Left),
        4 => Some(NavCommand::Down),
        _ => None,
    }
}

/// Query interface of the external channel.  Polled, never pushed.
pub trait CommandChannel: Send + 'static {
    /// Current command code, decoded.  `Ok(None)` means no command.
    fn poll_command(&mut self) -> Result<Option<NavCommand>, ChannelError>;

    /// True once the exercise has finished.
    fn poll_finished(&mut self) -> Result<bool, ChannelError>;
}
