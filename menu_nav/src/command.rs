//! Navigation commands and the gesture → command mapping.

use hand_gesture::{Direction, Gesture};

/// A discrete navigation command, whatever produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavCommand {
    Up,
    Down,
    Left,
    Right,
    /// Leave the screen backwards.
    Back,
    /// Accept the current selection and leave the screen forwards.
    Confirm,
}

impl NavCommand {
    pub fn from_direction(dir: Direction) -> Self {
        match dir {
            Direction::Up    => NavCommand::Up,
            Direction::Down  => NavCommand::Down,
            Direction::Left  => NavCommand::Left,
            Direction::Right => NavCommand::Right,
        }
    }

    pub fn direction(self) -> Option<Direction> {
        match self {
            NavCommand::Up    => Some(Direction::Up),
            NavCommand::Down  => Some(Direction::Down),
            NavCommand::Left  => Some(Direction::Left),
            NavCommand::Right => Some(Direction::Right),
            NavCommand::Back | NavCommand::Confirm => None,
        }
    }

    /// Back and Confirm end the screen.
    pub fn is_terminal(self) -> bool {
        matches!(self, NavCommand::Back | NavCommand::Confirm)
    }
}

/// What a classified gesture asks the navigator to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Nothing to do.
    Idle,
    /// Move the cursor now (subject to the debounce gate).
    Move(NavCommand),
    /// Fire only if the gesture is still held when the hold timer elapses.
    Hold(NavCommand),
}

/// Classifier-path mapping.
pub fn intent(gesture: Gesture) -> Intent {
    match gesture {
        Gesture::PalmLeft  => Intent::Hold(NavCommand::Back),
        Gesture::PalmRight => Intent::Hold(NavCommand::Confirm),
        Gesture::NoHand | Gesture::None => Intent::Idle,
        g => match g.pointing() {
            Some(dir) => Intent::Move(NavCommand::from_direction(dir)),
            None      => Intent::Idle,
        },
    }
}
