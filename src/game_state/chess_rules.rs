//! Board-rule constants for the king-and-rook versus king endgame.

/// Files and ranks per side of the board.
pub const BOARD_SIZE: u8 = 8;

/// Full moves (one ply per side) a game lasts when nothing else ends it.
pub const DEFAULT_MAX_MOVES: u32 = 35;

/// Centre Manhattan distance per square, indexed like `Square`.
pub const CENTER_MANHATTAN_DISTANCE: [i32; 64] = generate_center_distances();

const fn generate_center_distances() -> [i32; 64] {
    let mut table = [0i32; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        table[sq] = axis_distance(file) + axis_distance(rank);
        sq += 1;
    }

    table
}

const fn axis_distance(coord: i32) -> i32 {
    if coord < 4 {
        3 - coord
    } else {
        coord - 4
    }
}
