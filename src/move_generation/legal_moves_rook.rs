//! Legal rook moves.
//!
//! The rook slides along its rank and file until it meets either king. It
//! never captures a king and is never parked next to the defender king
//! without the attacker king covering that square.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::{GeneratedMove, Move};
use crate::moves::king_moves::king_attacks;
use crate::moves::rook_moves::rook_attacks;

pub fn generate_rook_moves(position: &Position, out: &mut Vec<GeneratedMove>) {
    let Some(from) = position.attacker_rook() else {
        return;
    };
    let kings = square_bit(position.attacker_king()) | square_bit(position.defender_king());
    let exposed =
        king_attacks(position.defender_king()) & !king_attacks(position.attacker_king());

    let mut targets = rook_attacks(from, kings) & !kings & !exposed;
    while targets != 0 {
        let to = targets.trailing_zeros() as Square;
        out.push(GeneratedMove {
            mv: Move {
                side: Side::Attacker,
                piece: PieceKind::Rook,
                from,
                to,
                captures_rook: false,
            },
            position_after: position.after_attacker_rook_move(to),
        });
        targets &= targets - 1;
    }
}
