//! Root-to-node position path and the repetition rule built on it.
//!
//! The search pushes a position before expanding it and pops it on return,
//! so sibling branches never see each other's entries. The game driver
//! hands the search the positions already played, which makes repetitions
//! that straddle the search root visible too.

use serde::{Deserialize, Serialize};

use crate::errors::{EndgameError, EndgameResult};
use crate::game_state::chess_types::Position;

/// Inclusive range of lags (in plies) at which a repeated position counts as
/// a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleWindow {
    pub min_lag: usize,
    pub max_lag: usize,
}

impl Default for CycleWindow {
    fn default() -> Self {
        Self {
            min_lag: 4,
            max_lag: 8,
        }
    }
}

impl CycleWindow {
    pub fn validate(&self) -> EndgameResult<()> {
        if self.min_lag == 0 || self.min_lag > self.max_lag {
            return Err(EndgameError::InvalidArgument(format!(
                "cycle window [{}, {}] must satisfy 1 <= min_lag <= max_lag",
                self.min_lag, self.max_lag
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathHistory {
    positions: Vec<Position>,
}

impl PathHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, position: Position) {
        self.positions.push(position);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<Position> {
        self.positions.pop()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn last(&self) -> Option<&Position> {
        self.positions.last()
    }

    /// The position `lag` plies before a candidate that would be pushed next.
    /// `lag == 1` is the most recent entry.
    #[inline]
    pub fn ply_back(&self, lag: usize) -> Option<&Position> {
        if lag == 0 {
            return None;
        }
        self.positions
            .len()
            .checked_sub(lag)
            .map(|index| &self.positions[index])
    }

    /// See [`is_repeating_cycle`].
    pub fn is_repeating_cycle(&self, candidate: &Position, window: CycleWindow) -> bool {
        is_repeating_cycle(self, candidate, window)
    }
}

impl FromIterator<Position> for PathHistory {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}

/// Whether `candidate` equals the position exactly `lag` plies back for some
/// lag inside `window`. Only that exact entry is compared; an equal position
/// elsewhere in the path does not count.
pub fn is_repeating_cycle(history: &PathHistory, candidate: &Position, window: CycleWindow) -> bool {
    (window.min_lag..=window.max_lag)
        .filter_map(|lag| history.ply_back(lag))
        .any(|earlier| earlier == candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{square_from_coords, Side, Square};

    fn sq(file: i32, rank: i32) -> Square {
        square_from_coords(file, rank).expect("test square should be on the board")
    }

    fn filler(file: i32) -> Position {
        Position::new(sq(file, 0), Some(sq(file, 7)), sq(4, 4), Side::Attacker)
    }

    fn path_with_target_at_lag(target: Position, lag: usize, len: usize) -> PathHistory {
        (0..len)
            .map(|i| {
                if len - i == lag {
                    target
                } else {
                    filler((i % 3) as i32)
                }
            })
            .collect()
    }

    fn target() -> Position {
        Position::new(sq(7, 0), Some(sq(0, 6)), sq(3, 3), Side::Attacker)
    }

    #[test]
    fn repeat_six_plies_back_is_a_cycle() {
        let history = path_with_target_at_lag(target(), 6, 10);
        assert_eq!(history.ply_back(6), Some(&target()));
        assert!(history.is_repeating_cycle(&target(), CycleWindow::default()));
    }

    #[test]
    fn window_bounds_are_inclusive() {
        for lag in [4, 8] {
            let history = path_with_target_at_lag(target(), lag, 12);
            assert!(is_repeating_cycle(&history, &target(), CycleWindow::default()));
        }
    }

    #[test]
    fn repeats_outside_the_window_do_not_count() {
        for lag in [1, 2, 3, 9, 10] {
            let history = path_with_target_at_lag(target(), lag, 12);
            assert!(
                !is_repeating_cycle(&history, &target(), CycleWindow::default()),
                "lag {lag} should not trigger"
            );
        }
    }

    #[test]
    fn short_path_never_cycles() {
        let history: PathHistory = std::iter::repeat(target()).take(3).collect();
        assert!(!history.is_repeating_cycle(&target(), CycleWindow::default()));
    }

    #[test]
    fn push_and_pop_keep_stack_order() {
        let mut history = PathHistory::new();
        history.push(filler(0));
        history.push(filler(1));
        assert_eq!(history.len(), 2);
        assert_eq!(history.pop(), Some(filler(1)));
        assert_eq!(history.last(), Some(&filler(0)));
        assert_eq!(history.ply_back(0), None);
        assert_eq!(history.ply_back(2), None);
    }

    #[test]
    fn inverted_window_is_rejected() {
        let window = CycleWindow {
            min_lag: 6,
            max_lag: 4,
        };
        assert!(window.validate().is_err());
        assert!(CycleWindow::default().validate().is_ok());
    }
}
