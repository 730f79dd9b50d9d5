//! Occupancy-aware rook rays.

use crate::game_state::chess_types::Square;

/// Squares a rook on `square` reaches along its rank and file.
///
/// Each ray includes the first occupied square it meets and stops there.
#[inline]
pub fn rook_attacks(square: Square, occupancy: u64) -> u64 {
    let sq = square as i32;
    let mut attacks = 0u64;

    attacks |= trace_ray(sq, 0, 1, occupancy);
    attacks |= trace_ray(sq, 0, -1, occupancy);
    attacks |= trace_ray(sq, 1, 0, occupancy);
    attacks |= trace_ray(sq, -1, 0, occupancy);

    attacks
}

fn trace_ray(square: i32, file_step: i32, rank_step: i32, occupancy: u64) -> u64 {
    let mut file = (square % 8) + file_step;
    let mut rank = (square / 8) + rank_step;
    let mut attacks = 0u64;

    while (0..8).contains(&file) && (0..8).contains(&rank) {
        let bit = 1u64 << (rank * 8 + file);
        attacks |= bit;

        if (occupancy & bit) != 0 {
            break;
        }

        file += file_step;
        rank += rank_step;
    }

    attacks
}

#[cfg(test)]
mod tests {
    use super::rook_attacks;

    #[test]
    fn empty_board_gives_fourteen_squares() {
        let d4 = 27u8;
        assert_eq!(rook_attacks(d4, 0).count_ones(), 14);
    }

    #[test]
    fn blocker_stops_ray() {
        let a1 = 0u8;
        let blocker_on_a4 = 1u64 << 24;
        let attacks = rook_attacks(a1, blocker_on_a4);

        assert_ne!(attacks & (1u64 << 24), 0);
        assert_eq!(attacks & (1u64 << 32), 0);
    }
}
