//! King attack bitboards.
//!
//! Both kings use the same precomputed table: legal king steps, king
//! adjacency checks and "is the rook guarded" tests all reduce to a lookup.

use crate::game_state::chess_types::{is_on_board, Square};

pub const KING_ATTACKS: [u64; 64] = generate_king_attacks();

/// # Panics
///
/// Panics if `square` is off the board.
#[inline]
pub const fn king_attacks(square: Square) -> u64 {
    debug_assert!(is_on_board(square), "square is off the board");
    KING_ATTACKS[square as usize]
}

const KING_STEPS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const fn generate_king_attacks() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut step = 0usize;

        while step < KING_STEPS.len() {
            let (df, dr) = KING_STEPS[step];
            let (to_file, to_rank) = (file + df, rank + dr);
            if to_file >= 0 && to_file < 8 && to_rank >= 0 && to_rank < 8 {
                table[sq] |= 1u64 << (to_rank * 8 + to_file);
            }
            step += 1;
        }

        sq += 1;
    }

    table
}
