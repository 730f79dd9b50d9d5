//! Attack and safety queries shared by move generation and scoring.

use crate::game_state::chess_types::*;
use crate::moves::king_moves::king_attacks;
use crate::moves::rook_moves::rook_attacks;

/// Squares attacked by the rook, or `0` once it has been captured.
///
/// Only the attacker king blocks the rays. The defender king is transparent
/// so that stepping straight back along a checking line stays illegal.
#[inline]
pub fn rook_attack_mask(position: &Position) -> u64 {
    match position.attacker_rook() {
        Some(rook) => rook_attacks(rook, square_bit(position.attacker_king())),
        None => 0,
    }
}

#[inline]
pub fn is_defender_in_check(position: &Position) -> bool {
    rook_attack_mask(position) & square_bit(position.defender_king()) != 0
}

#[inline]
pub fn attacker_king_guards(position: &Position, square: Square) -> bool {
    king_attacks(position.attacker_king()) & square_bit(square) != 0
}

/// Destinations available to the defender king, capture of an unguarded
/// rook included.
#[inline]
pub fn defender_king_targets(position: &Position) -> u64 {
    king_attacks(position.defender_king())
        & !king_attacks(position.attacker_king())
        & !rook_attack_mask(position)
}

#[inline]
pub fn defender_king_mobility(position: &Position) -> u32 {
    defender_king_targets(position).count_ones()
}

/// The rook stands next to the defender king with no attacker king cover.
pub fn is_rook_hanging(position: &Position) -> bool {
    match position.attacker_rook() {
        Some(rook) => {
            chebyshev_distance(rook, position.defender_king()) == 1
                && !attacker_king_guards(position, rook)
        }
        None => false,
    }
}

/// Whether the attacker king stands strictly between the rook and the
/// defender king on a shared rank or file.
pub fn attacker_king_blocks_rook(position: &Position) -> bool {
    let Some(rook) = position.attacker_rook() else {
        return false;
    };
    let king = position.attacker_king();
    let target = position.defender_king();

    let between = |a: i32, mid: i32, b: i32| (a < mid && mid < b) || (b < mid && mid < a);

    if file_of(king) == file_of(rook) && file_of(king) == file_of(target) {
        return between(rank_of(rook), rank_of(king), rank_of(target));
    }
    if rank_of(king) == rank_of(rook) && rank_of(king) == rank_of(target) {
        return between(file_of(rook), file_of(king), file_of(target));
    }
    false
}
