//! Cursor state machine: the selected index of the active screen.

use tracing::debug;

use crate::command::NavCommand;
use crate::layout::NavLayout;

/// Outcome of applying one command to the cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Moved { from: usize, to: usize },
    /// Boundary no-op.
    Stayed(usize),
    /// Confirm on the given index.
    Confirmed(usize),
    Back,
}

/// Selected index.  Starts at 0 on screen entry; only [`Cursor::apply`]
/// moves it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
}

impl Cursor {
    pub fn new() -> Self { Cursor { index: 0 } }

    pub fn index(&self) -> usize { self.index }

    pub fn apply(&mut self, layout: &NavLayout, cmd: NavCommand) -> Step {
        match cmd {
            NavCommand::Confirm => Step::Confirmed(self.index),
            NavCommand::Back    => Step::Back,
            _ => {
                let from = self.index;
                let to   = layout.apply(from, cmd);
                if to == from {
                    debug!(?cmd, index = from, "cursor at boundary");
                    Step::Stayed(from)
                } else {
                    self.index = to;
                    Step::Moved { from, to }
                }
            }
        }
    }

    pub fn reset(&mut self) { self.index = 0; }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(n: usize) -> NavLayout {
        NavLayout::grid2col((0..n).map(|i| format!("pose{}", i))).unwrap()
    }

    #[test]
    fn starts_at_zero() {
        assert_eq!(Cursor::new().index(), 0);
    }

    #[test]
    fn walks_the_grid() {
        let layout = grid(20);
        let mut c = Cursor::new();
        assert_eq!(c.apply(&layout, NavCommand::Down),  Step::Moved { from: 0, to: 2 });
        assert_eq!(c.apply(&layout, NavCommand::Right), Step::Moved { from: 2, to: 3 });
        assert_eq!(c.apply(&layout, NavCommand::Right), Step::Stayed(3));
        assert_eq!(c.apply(&layout, NavCommand::Up),    Step::Moved { from: 3, to: 1 });
        assert_eq!(c.apply(&layout, NavCommand::Up),    Step::Stayed(1));
        assert_eq!(c.index(), 1);
    }

    #[test]
    fn terminal_commands_do_not_move() {
        let layout = grid(4);
        let mut c = Cursor::new();
        c.apply(&layout, NavCommand::Down);
        assert_eq!(c.apply(&layout, NavCommand::Confirm), Step::Confirmed(2));
        assert_eq!(c.apply(&layout, NavCommand::Back),    Step::Back);
        assert_eq!(c.index(), 2);
    }

    #[test]
    fn reset_returns_to_first_item() {
        let layout = NavLayout::binary2("a", "b");
        let mut c = Cursor::new();
        c.apply(&layout, NavCommand::Right);
        c.reset();
        assert_eq!(c.index(), 0);
    }
}
