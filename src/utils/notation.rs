//! Text forms of squares and piece moves.
//!
//! Human-facing coordinates are 1-based `(file,rank)` pairs. The file may
//! also be written as a letter, so `(5,2)`, `5,2`, `(e,2)` and `e2` all name
//! the same square.

use crate::errors::{EndgameError, EndgameResult};
use crate::game_state::chess_types::*;

/// Parse a single file token: `1`-`8` or `a`-`h` (either case).
fn parse_file(token: &str, input: &str) -> EndgameResult<i32> {
    let mut chars = token.chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return Err(EndgameError::notation(input, "file must be a single character"));
    };
    let file = match c.to_ascii_lowercase() {
        'a'..='h' => c.to_ascii_lowercase() as i32 - 'a' as i32 + 1,
        '1'..='8' => c as i32 - '0' as i32,
        _ => {
            return Err(EndgameError::notation(
                input,
                "file must be a number 1-8 or a letter a-h",
            ))
        }
    };
    Ok(file)
}

fn parse_rank(token: &str, input: &str) -> EndgameResult<i32> {
    match token.parse::<i32>() {
        Ok(rank) if (1..=8).contains(&rank) => Ok(rank),
        _ => Err(EndgameError::notation(input, "rank must be a number 1-8")),
    }
}

/// Square from separate 1-based file and rank tokens.
pub fn parse_coordinates(file: &str, rank: &str) -> EndgameResult<Square> {
    let input = format!("({file},{rank})");
    let file = parse_file(file.trim(), &input)?;
    let rank = parse_rank(rank.trim(), &input)?;
    square_from_coords(file - 1, rank - 1)
        .ok_or_else(|| EndgameError::notation(&input, "square is off the board"))
}

/// Parse `(f,r)`, `f,r` or a two-character form such as `e2`.
pub fn parse_square(input: &str) -> EndgameResult<Square> {
    let trimmed = input.trim();
    let inner = trimmed
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(trimmed);

    if let Some((file, rank)) = inner.split_once(',') {
        return parse_coordinates(file, rank);
    }

    if inner.len() == 2 && inner.is_ascii() {
        let (file, rank) = inner.split_at(1);
        return parse_coordinates(file, rank);
    }

    Err(EndgameError::notation(
        input,
        "expected a square such as (5,2) or e2",
    ))
}

/// Parse a piece move such as `K(1,2)` or `r(e,8)`.
pub fn parse_piece_move(input: &str) -> EndgameResult<(PieceKind, Square)> {
    let trimmed = input.trim();
    let mut chars = trimmed.chars();
    let piece = match chars.next().map(|c| c.to_ascii_uppercase()) {
        Some('K') => PieceKind::King,
        Some('R') => PieceKind::Rook,
        _ => {
            return Err(EndgameError::notation(
                input,
                "move must start with K or R, e.g. K(1,2)",
            ))
        }
    };
    let square = parse_square(chars.as_str())
        .map_err(|_| EndgameError::notation(input, "expected a piece and square, e.g. K(1,2)"))?;
    Ok((piece, square))
}
