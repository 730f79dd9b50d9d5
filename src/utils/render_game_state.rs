//! Plain-text board diagrams and game status reports.
//!
//! Output is ASCII only so the same text can go to a terminal and to the
//! transcript file.

use crate::game_state::chess_types::*;
use crate::game_state::game_outcome::GameOutcome;
use crate::move_generation::legal_move_checks::is_defender_in_check;

const SEPARATOR: &str = "-----------------------------------------------------------------";

/// Render the board with rank 8 at the top and 1-based labels.
pub fn render_position(position: &Position) -> String {
    let mut out = String::new();
    let border = format!("  +{}+\n", "---".repeat(8));

    out.push_str(&border);
    for rank in (0..8).rev() {
        out.push_str("  |");
        for file in 0..8 {
            let cell = square_from_coords(file, rank)
                .and_then(|square| piece_label(position, square))
                .unwrap_or(" .");
            out.push_str(cell);
            out.push(' ');
        }
        out.push_str(&format!("| {}\n", rank + 1));
    }
    out.push_str(&border);

    out.push_str("   ");
    for file in 1..=8 {
        out.push_str(&format!(" {file} "));
    }
    out.push('\n');

    out
}

fn piece_label(position: &Position, square: Square) -> Option<&'static str> {
    if position.attacker_king() == square {
        Some("KX")
    } else if position.attacker_rook() == Some(square) {
        Some("RX")
    } else if position.defender_king() == square {
        Some("KY")
    } else {
        None
    }
}

/// Status report printed above each diagram.
///
/// `plies_played` counts plies since the start; `ply_limit` is the game's
/// total ply budget.
pub fn describe_state(
    position: &Position,
    outcome: Option<GameOutcome>,
    plies_played: u32,
    ply_limit: u32,
) -> String {
    let mut out = String::new();
    let turns = plies_played / 2;

    if plies_played % 2 == 0 {
        out.push_str(SEPARATOR);
        out.push_str("\n\n");
    }

    match outcome {
        None => {
            out.push_str(&format!("Number of turns completed: {turns}\n"));
            out.push_str(&format!(
                "It is currently {}'s turn.\n",
                position.side_to_move()
            ));
            if position.side_to_move() == Side::Defender && is_defender_in_check(position) {
                out.push_str(&format!("{} is in check!\n", Side::Defender));
            }
        }
        Some(outcome) => {
            match outcome {
                GameOutcome::Checkmate { winner } => {
                    out.push_str(&format!("Checkmate! {winner} wins!\n"))
                }
                draw => out.push_str(&format!("Game has reached a draw due to: {draw}\n")),
            }
            out.push_str(&format!(
                "A total of {turns} moves were made out of {}.\n",
                ply_limit / 2
            ));
            out.push_str("Game over!\n");
        }
    }

    out.push('\n');
    out.push_str(&render_position(position));
    out
}
