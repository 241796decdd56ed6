//! Selectable-item topologies.
//!
//! ```text
//!   Chain10 / Grid2Col(n)          Binary2
//!   ┌───┬───┐                      ┌───┬───┐
//!   │ 0 │ 1 │                      │ 0 │ 1 │
//!   ├───┼───┤                      └───┴───┘
//!   │ 2 │ 3 │   Up/Down  = ±2       Left → 0, Right → 1
//!   ├───┼───┤   Left     = -1 on odd
//!   │ … │ … │   Right    = +1 on even
//! ```
//!
//! Moves that would leave the item range are no-ops, never errors, and
//! there is no wraparound.

use hand_gesture::Direction;
use thiserror::Error;

use crate::command::NavCommand;

/// Items per row in the two-column layouts.
pub const ROW_STRIDE: usize = 2;

/// Hand-wired adjacency of the ten-item main menu: `[up, down, left, right]`
/// per item.  Items sit in a fixed two-column virtual grid.
const CHAIN10_LINKS: [[Option<usize>; 4]; 10] = [
    [None,    Some(2), None,    Some(1)],
    [None,    Some(3), Some(0), None   ],
    [Some(0), Some(4), None,    Some(3)],
    [Some(1), Some(5), Some(2), None   ],
    [Some(2), Some(6), None,    Some(5)],
    [Some(3), Some(7), Some(4), None   ],
    [Some(4), Some(8), None,    Some(7)],
    [Some(5), Some(9), Some(6), None   ],
    [Some(6), None,    None,    Some(9)],
    [Some(7), None,    Some(8), None   ],
];

// ════════════════════════════════════════════════════════════════════════════
// LayoutKind
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutKind {
    /// Ten items, wired as a two-column grid.
    Chain10,
    /// `n` items, two columns, row-major.
    Grid2Col(usize),
    /// Exactly two items side by side.
    Binary2,
}

impl LayoutKind {
    pub fn name(self) -> &'static str {
        match self {
            LayoutKind::Chain10     => "chain10",
            LayoutKind::Grid2Col(_) => "grid2col",
            LayoutKind::Binary2     => "binary2",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("{kind} layout needs {expected} items, got {found}")]
    ItemCount { kind: &'static str, expected: usize, found: usize },
    #[error("grid2col layout needs at least one item")]
    Empty,
}

// ════════════════════════════════════════════════════════════════════════════
// NavLayout
// ════════════════════════════════════════════════════════════════════════════

/// Ordered item identifiers plus the adjacency rule of one screen.
/// Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavLayout {
    kind:  LayoutKind,
    items: Vec<String>,
}

impl NavLayout {
    pub fn chain10<S: Into<String>>(items: impl IntoIterator<Item = S>) -> Result<Self, LayoutError> {
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        if items.len() != CHAIN10_LINKS.len() {
            return Err(LayoutError::ItemCount { kind: "chain10", expected: 10, found: items.len() });
        }
        Ok(NavLayout { kind: LayoutKind::Chain10, items })
    }

    pub fn grid2col<S: Into<String>>(items: impl IntoIterator<Item = S>) -> Result<Self, LayoutError> {
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        if items.is_empty() {
            return Err(LayoutError::Empty);
        }
        Ok(NavLayout { kind: LayoutKind::Grid2Col(items.len()), items })
    }

    pub fn binary2(first: impl Into<String>, second: impl Into<String>) -> Self {
        NavLayout { kind: LayoutKind::Binary2, items: vec![first.into(), second.into()] }
    }

    pub fn kind(&self) -> LayoutKind { self.kind }
    pub fn len(&self) -> usize { self.items.len() }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }
    pub fn items(&self) -> &[String] { &self.items }
    pub fn item(&self, index: usize) -> Option<&str> { self.items.get(index).map(String::as_str) }

    /// Index reached by moving from `index` in `dir`, or `None` at a boundary.
    pub fn neighbor(&self, index: usize, dir: Direction) -> Option<usize> {
        if index >= self.len() { return None; }
        match self.kind {
            LayoutKind::Chain10 => {
                let slot = match dir {
                    Direction::Up    => 0,
                    Direction::Down  => 1,
                    Direction::Left  => 2,
                    Direction::Right => 3,
                };
                CHAIN10_LINKS[index][slot]
            }
            LayoutKind::Grid2Col(n) => {
                let target = match dir {
                    Direction::Up    => index.checked_sub(ROW_STRIDE)?,
                    Direction::Down  => index + ROW_STRIDE,
                    Direction::Left  if index % ROW_STRIDE == 1 => index - 1,
                    Direction::Right if index % ROW_STRIDE == 0 => index + 1,
                    Direction::Left | Direction::Right => return None,
                };
                (target < n).then_some(target)
            }
            LayoutKind::Binary2 => match dir {
                Direction::Left  => Some(0),
                Direction::Right => Some(1),
                Direction::Up | Direction::Down => None,
            },
        }
    }

    /// `apply(index, command) -> index`.  Boundary moves, Back and Confirm
    /// leave the index unchanged.
    pub fn apply(&self, index: usize, cmd: NavCommand) -> usize {
        cmd.direction()
            .and_then(|dir| self.neighbor(index, dir))
            .unwrap_or(index)
    }

    /// (row, column) of an item in the two-column picture.
    pub fn cell(&self, index: usize) -> (usize, usize) {
        (index / ROW_STRIDE, index % ROW_STRIDE)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("item{}", i)).collect()
    }

    fn grid_layouts() -> Vec<NavLayout> {
        let mut v = vec![NavLayout::chain10(names(10)).unwrap()];
        for n in 1..=21 {
            v.push(NavLayout::grid2col(names(n)).unwrap());
        }
        v
    }

    #[test]
    fn chain10_matches_grid_of_ten() {
        let chain = NavLayout::chain10(names(10)).unwrap();
        let grid  = NavLayout::grid2col(names(10)).unwrap();
        for i in 0..10 {
            for dir in Direction::ALL {
                assert_eq!(chain.neighbor(i, dir), grid.neighbor(i, dir), "i={} {:?}", i, dir);
            }
        }
    }

    #[test]
    fn up_then_down_returns_home() {
        for layout in grid_layouts() {
            for i in 0..layout.len() {
                let up = layout.apply(i, NavCommand::Up);
                if up == i { continue; }
                assert_eq!(layout.apply(up, NavCommand::Down), i);
            }
        }
    }

    #[test]
    fn down_then_up_returns_home() {
        for layout in grid_layouts() {
            for i in 0..layout.len() {
                let down = layout.apply(i, NavCommand::Down);
                if down == i { continue; }
                assert_eq!(layout.apply(down, NavCommand::Up), i);
            }
        }
    }

    #[test]
    fn left_is_idempotent_at_row_start() {
        for layout in grid_layouts() {
            for i in 0..layout.len() {
                let once  = layout.apply(i, NavCommand::Left);
                let twice = layout.apply(once, NavCommand::Left);
                assert_eq!(once % ROW_STRIDE, 0);
                assert_eq!(twice, once);
            }
        }
    }

    #[test]
    fn no_wraparound_at_edges() {
        let g = NavLayout::grid2col(names(20)).unwrap();
        assert_eq!(g.apply(0,  NavCommand::Up),    0);
        assert_eq!(g.apply(1,  NavCommand::Right), 1);
        assert_eq!(g.apply(18, NavCommand::Down),  18);
        assert_eq!(g.apply(19, NavCommand::Down),  19);
        assert_eq!(g.apply(5,  NavCommand::Up),    3);
        assert_eq!(g.apply(4,  NavCommand::Right), 5);
    }

    #[test]
    fn odd_grid_last_item_has_no_right() {
        let g = NavLayout::grid2col(names(5)).unwrap();
        assert_eq!(g.apply(4, NavCommand::Right), 4);
        assert_eq!(g.apply(3, NavCommand::Down),  3);
        assert_eq!(g.apply(2, NavCommand::Down),  4);
    }

    #[test]
    fn binary_only_left_right() {
        let b = NavLayout::binary2("All Poses", "Training");
        assert_eq!(b.apply(0, NavCommand::Right), 1);
        assert_eq!(b.apply(1, NavCommand::Right), 1);
        assert_eq!(b.apply(1, NavCommand::Left),  0);
        assert_eq!(b.apply(0, NavCommand::Up),    0);
        assert_eq!(b.apply(1, NavCommand::Down),  1);
    }

    #[test]
    fn terminal_commands_keep_index() {
        let g = NavLayout::grid2col(names(6)).unwrap();
        assert_eq!(g.apply(3, NavCommand::Confirm), 3);
        assert_eq!(g.apply(3, NavCommand::Back),    3);
    }

    #[test]
    fn item_counts_are_checked() {
        assert_eq!(
            NavLayout::chain10(names(9)),
            Err(LayoutError::ItemCount { kind: "chain10", expected: 10, found: 9 })
        );
        assert_eq!(NavLayout::grid2col(Vec::<String>::new()), Err(LayoutError::Empty));
        assert_eq!(NavLayout::binary2("a", "b").kind(), LayoutKind::Binary2);
    }
}
