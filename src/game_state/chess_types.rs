//! Core value types shared by every subsystem.
//!
//! Squares are plain indices (`0 == a1`, `7 == h1`, `63 == h8`) so that the
//! attack tables in `moves` can be addressed directly and positions stay
//! `Copy`.

use std::fmt;

use crate::game_state::chess_rules::{BOARD_SIZE, CENTER_MANHATTAN_DISTANCE};

pub use crate::game_state::game_state::Position;

/// Board square index (`0..=63`). Anything larger is off the board.
pub type Square = u8;

/// The two players of the endgame.
///
/// The attacker (player X) owns a king and a rook; the defender (player Y)
/// owns a lone king.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Attacker,
    Defender,
}

impl Side {
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::Attacker => Side::Defender,
            Side::Defender => Side::Attacker,
        }
    }

    /// Single-letter player label used in diagrams and scenario files.
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            Side::Attacker => 'X',
            Side::Defender => 'Y',
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.letter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    King,
    Rook,
}

impl PieceKind {
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            PieceKind::King => 'K',
            PieceKind::Rook => 'R',
        }
    }
}

/// Build a square from 0-based file and rank, rejecting off-board values.
#[inline]
pub fn square_from_coords(file: i32, rank: i32) -> Option<Square> {
    let size = BOARD_SIZE as i32;
    if !(0..size).contains(&file) || !(0..size).contains(&rank) {
        return None;
    }
    Some((rank * size + file) as Square)
}

#[inline]
pub const fn file_of(square: Square) -> i32 {
    (square % 8) as i32
}

#[inline]
pub const fn rank_of(square: Square) -> i32 {
    (square / 8) as i32
}

#[inline]
pub const fn is_on_board(square: Square) -> bool {
    square < 64
}

#[inline]
pub const fn square_bit(square: Square) -> u64 {
    1u64 << square
}

/// King-move distance between two squares.
#[inline]
pub fn chebyshev_distance(a: Square, b: Square) -> i32 {
    let df = (file_of(a) - file_of(b)).abs();
    let dr = (rank_of(a) - rank_of(b)).abs();
    df.max(dr)
}

#[inline]
pub fn manhattan_distance(a: Square, b: Square) -> i32 {
    (file_of(a) - file_of(b)).abs() + (rank_of(a) - rank_of(b)).abs()
}

/// Manhattan distance to the nearest of the four centre squares.
///
/// # Panics
///
/// Panics if `square` is off the board.
#[inline]
pub fn center_manhattan_distance(square: Square) -> i32 {
    debug_assert!(is_on_board(square), "square {square} is off the board");
    CENTER_MANHATTAN_DISTANCE[square as usize]
}

/// 1-based `(file,rank)` label used in every human-facing surface.
pub fn square_label(square: Square) -> String {
    format!("({},{})", file_of(square) + 1, rank_of(square) + 1)
}
