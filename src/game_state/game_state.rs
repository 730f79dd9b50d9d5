//! Immutable endgame position.
//!
//! `Position` is a small `Copy` value holding the three piece squares and the
//! side to move. Moves never mutate a position; the generator builds the
//! successor through the `after_*` constructors, which also flip the side to
//! move.

use std::fmt;

use crate::errors::{EndgameError, EndgameResult};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_defender_in_check;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    attacker_king: Square,
    attacker_rook: Option<Square>,
    defender_king: Square,
    side_to_move: Side,
}

impl Position {
    /// Build a position without checking it. Use [`Position::try_new`] for
    /// anything that comes from user input.
    #[inline]
    pub const fn new(
        attacker_king: Square,
        attacker_rook: Option<Square>,
        defender_king: Square,
        side_to_move: Side,
    ) -> Self {
        Self {
            attacker_king,
            attacker_rook,
            defender_king,
            side_to_move,
        }
    }

    /// Build a position and reject it with `InvalidConfiguration` unless it
    /// passes [`Position::is_legal`].
    pub fn try_new(
        attacker_king: Square,
        attacker_rook: Option<Square>,
        defender_king: Square,
        side_to_move: Side,
    ) -> EndgameResult<Self> {
        Self::new(attacker_king, attacker_rook, defender_king, side_to_move).validated()
    }

    #[inline]
    pub const fn attacker_king(&self) -> Square {
        self.attacker_king
    }

    #[inline]
    pub const fn attacker_rook(&self) -> Option<Square> {
        self.attacker_rook
    }

    #[inline]
    pub const fn defender_king(&self) -> Square {
        self.defender_king
    }

    #[inline]
    pub const fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// Whether the position can occur in a game.
    ///
    /// Rejects off-board squares, shared squares, touching kings, and a
    /// defender king left attacked by the rook while the attacker is to move.
    pub fn is_legal(&self) -> bool {
        self.illegality().is_none()
    }

    /// Return `self` if legal, otherwise an `InvalidConfiguration` naming the
    /// first rule that failed.
    pub fn validated(self) -> EndgameResult<Self> {
        match self.illegality() {
            None => Ok(self),
            Some(reason) => Err(EndgameError::InvalidConfiguration(format!(
                "{} in {}",
                reason, self
            ))),
        }
    }

    fn illegality(&self) -> Option<&'static str> {
        let on_board = is_on_board(self.attacker_king)
            && is_on_board(self.defender_king)
            && self.attacker_rook.is_none_or(is_on_board);
        if !on_board {
            return Some("piece outside the board");
        }

        if self.attacker_king == self.defender_king
            || self.attacker_rook == Some(self.attacker_king)
            || self.attacker_rook == Some(self.defender_king)
        {
            return Some("two pieces share a square");
        }

        if chebyshev_distance(self.attacker_king, self.defender_king) <= 1 {
            return Some("kings are adjacent");
        }

        if self.side_to_move == Side::Attacker && is_defender_in_check(self) {
            return Some("defender king left in check on the attacker's turn");
        }

        None
    }

    #[inline]
    pub(crate) const fn after_attacker_king_move(&self, to: Square) -> Self {
        Self::new(to, self.attacker_rook, self.defender_king, Side::Defender)
    }

    #[inline]
    pub(crate) const fn after_attacker_rook_move(&self, to: Square) -> Self {
        Self::new(self.attacker_king, Some(to), self.defender_king, Side::Defender)
    }

    /// Defender king steps to `to`, taking the rook if it stands there.
    #[inline]
    pub(crate) fn after_defender_king_move(&self, to: Square) -> Self {
        let rook = self.attacker_rook.filter(|&rook| rook != to);
        Self::new(self.attacker_king, rook, to, Side::Attacker)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rook = match self.attacker_rook {
            Some(rook) => square_label(rook),
            None => "captured".to_owned(),
        };
        write!(
            f,
            "KX{} RX{} KY{} ({} to move)",
            square_label(self.attacker_king),
            rook,
            square_label(self.defender_king),
            self.side_to_move
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Position;
    use crate::errors::EndgameError;
    use crate::game_state::chess_types::{square_from_coords, Side, Square};

    fn sq(file: i32, rank: i32) -> Square {
        square_from_coords(file, rank).expect("test square should be on the board")
    }

    #[test]
    fn accepts_spread_out_pieces() {
        let position = Position::new(sq(0, 0), Some(sq(0, 7)), sq(4, 4), Side::Attacker);
        assert!(position.is_legal());
    }

    #[test]
    fn rejects_adjacent_kings_for_either_side_to_move() {
        for side in [Side::Attacker, Side::Defender] {
            let position = Position::new(sq(3, 3), Some(sq(7, 7)), sq(4, 4), side);
            assert!(!position.is_legal());
        }
    }

    #[test]
    fn rejects_shared_and_off_board_squares() {
        let shared = Position::new(sq(0, 0), Some(sq(0, 0)), sq(5, 5), Side::Attacker);
        assert!(!shared.is_legal());

        let off_board = Position::new(64, Some(sq(0, 0)), sq(5, 5), Side::Attacker);
        assert!(!off_board.is_legal());

        let rook_off_board = Position::new(sq(0, 0), Some(70), sq(5, 5), Side::Attacker);
        assert!(!rook_off_board.is_legal());
    }

    #[test]
    fn rejects_defender_in_check_on_attacker_turn() {
        // Rook on a8 looks down the a-file at the defender king on a4.
        let checked = Position::new(sq(7, 0), Some(sq(0, 7)), sq(0, 3), Side::Attacker);
        assert!(!checked.is_legal());

        let defender_to_move = Position::new(sq(7, 0), Some(sq(0, 7)), sq(0, 3), Side::Defender);
        assert!(defender_to_move.is_legal());
    }

    #[test]
    fn try_new_reports_invalid_configuration() {
        let err = Position::try_new(sq(3, 3), None, sq(3, 4), Side::Attacker)
            .expect_err("adjacent kings should be rejected");
        assert!(matches!(err, EndgameError::InvalidConfiguration(_)));
    }

    #[test]
    fn defender_capture_removes_the_rook() {
        let position = Position::new(sq(0, 0), Some(sq(5, 5)), sq(4, 4), Side::Defender);
        let after = position.after_defender_king_move(sq(5, 5));
        assert_eq!(after.attacker_rook(), None);
        assert_eq!(after.defender_king(), sq(5, 5));
        assert_eq!(after.side_to_move(), Side::Attacker);
    }
}
