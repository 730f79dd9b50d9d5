//! Interactive engine: a human types the move.
//!
//! Reads from any `BufRead` and prompts on any `Write`, so the same code
//! drives stdin/stdout in the binary and in-memory buffers in tests.

use std::io::{self, BufRead, Write};

use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::errors::{EndgameError, EndgameResult};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::{GeneratedMove, LegalMoveGenerator};
use crate::search::history::PathHistory;
use crate::utils::notation::parse_piece_move;

pub const MOVE_PROMPT: &str =
    "Please enter the piece and the position you would like to move it to (e.g., K(1,2)):";

pub struct ConsoleEngine<R, W> {
    input: R,
    output: W,
    move_generator: LegalMoveGenerator,
}

impl<R: BufRead, W: Write> ConsoleEngine<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            move_generator: LegalMoveGenerator,
        }
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }

    fn read_line(&mut self) -> EndgameResult<String> {
        write!(self.output, "{MOVE_PROMPT} >> ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed").into());
        }
        Ok(line.trim().to_owned())
    }

    fn match_move(legal: &[GeneratedMove], piece: PieceKind, to: Square) -> Option<GeneratedMove> {
        legal
            .iter()
            .find(|generated| generated.mv.piece == piece && generated.mv.to == to)
            .copied()
    }
}

impl<R: BufRead, W: Write> Engine for ConsoleEngine<R, W> {
    fn name(&self) -> &str {
        "console"
    }

    fn choose_move(
        &mut self,
        position: &Position,
        _plies_remaining: u32,
        _history: &PathHistory,
    ) -> EndgameResult<EngineOutput> {
        let legal = self.move_generator.generate_legal_moves(position);
        if legal.is_empty() {
            return Err(EndgameError::InvalidConfiguration(format!(
                "no legal move in {position}"
            )));
        }

        loop {
            let line = self.read_line()?;
            let (piece, to) = match parse_piece_move(&line) {
                Ok(parsed) => parsed,
                Err(err) => {
                    writeln!(self.output, "{err}")?;
                    continue;
                }
            };
            match Self::match_move(&legal, piece, to) {
                Some(chosen) => return Ok(EngineOutput::new(chosen)),
                None => writeln!(
                    self.output,
                    "{}{} cannot move to {} for {}. Please try again.",
                    piece.letter(),
                    position.side_to_move().letter(),
                    square_label(to),
                    position.side_to_move()
                )?,
            }
        }
    }
}
