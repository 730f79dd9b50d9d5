//! Legal king steps for both sides.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::defender_king_targets;
use crate::move_generation::legal_move_generator::{GeneratedMove, Move};
use crate::moves::king_moves::king_attacks;

/// Attacker king steps: never onto its own rook, never next to the
/// defender king.
pub fn generate_attacker_king_moves(position: &Position, out: &mut Vec<GeneratedMove>) {
    let from = position.attacker_king();
    let rook_bit = position.attacker_rook().map_or(0, square_bit);
    let defender_zone =
        king_attacks(position.defender_king()) | square_bit(position.defender_king());

    let mut targets = king_attacks(from) & !rook_bit & !defender_zone;
    while targets != 0 {
        let to = targets.trailing_zeros() as Square;
        out.push(GeneratedMove {
            mv: Move {
                side: Side::Attacker,
                piece: PieceKind::King,
                from,
                to,
                captures_rook: false,
            },
            position_after: position.after_attacker_king_move(to),
        });
        targets &= targets - 1;
    }
}

/// Defender king steps to any square neither king nor rook controls,
/// including the rook's own square when the attacker king does not guard it.
pub fn generate_defender_king_moves(position: &Position, out: &mut Vec<GeneratedMove>) {
    let from = position.defender_king();

    let mut targets = defender_king_targets(position);
    while targets != 0 {
        let to = targets.trailing_zeros() as Square;
        out.push(GeneratedMove {
            mv: Move {
                side: Side::Defender,
                piece: PieceKind::King,
                from,
                to,
                captures_rook: position.attacker_rook() == Some(to),
            },
            position_after: position.after_defender_king_move(to),
        });
        targets &= targets - 1;
    }
}
