//! Terminal classification of positions.

use std::fmt;

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_defender_in_check;
use crate::move_generation::legal_move_generator::{GeneratedMove, LegalMoveGenerator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOutcome {
    Checkmate { winner: Side },
    Stalemate,
    RookCaptured,
    MoveLimitReached,
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            GameOutcome::Stalemate => write!(f, "stalemate"),
            GameOutcome::RookCaptured => write!(f, "insufficient material (rook captured)"),
            GameOutcome::MoveLimitReached => write!(f, "maximum number of moves reached"),
        }
    }
}

/// Classify `position` with `plies_remaining` plies left in the game.
///
/// Returns `None` while the game goes on.
pub fn game_outcome(position: &Position, plies_remaining: u32) -> Option<GameOutcome> {
    let moves = LegalMoveGenerator.generate_legal_moves(position);
    classify_position(position, &moves, plies_remaining)
}

/// Same as [`game_outcome`] for callers that already generated `moves`.
pub fn classify_position(
    position: &Position,
    moves: &[GeneratedMove],
    plies_remaining: u32,
) -> Option<GameOutcome> {
    if position.attacker_rook().is_none() {
        return Some(GameOutcome::RookCaptured);
    }

    if moves.is_empty() {
        let mover = position.side_to_move();
        let in_check = mover == Side::Defender && is_defender_in_check(position);
        return Some(if in_check {
            GameOutcome::Checkmate {
                winner: mover.opposite(),
            }
        } else {
            GameOutcome::Stalemate
        });
    }

    if plies_remaining == 0 {
        return Some(GameOutcome::MoveLimitReached);
    }

    None
}
