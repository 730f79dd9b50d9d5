//! Random-move engine.
//!
//! Picks uniformly among legal moves. Used as a sparring partner for the
//! search engines and in driver tests.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::errors::{EndgameError, EndgameResult};
use crate::game_state::chess_types::Position;
use crate::game_state::game_outcome::classify_position;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::search::history::PathHistory;

pub struct RandomEngine {
    move_generator: LegalMoveGenerator,
    rng: StdRng,
}

impl RandomEngine {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            move_generator: LegalMoveGenerator,
            rng,
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_move(
        &mut self,
        position: &Position,
        plies_remaining: u32,
        _history: &PathHistory,
    ) -> EndgameResult<EngineOutput> {
        let legal_moves = self.move_generator.generate_legal_moves(position);
        if let Some(outcome) = classify_position(position, &legal_moves, plies_remaining) {
            return Err(EndgameError::GameOver(outcome));
        }

        let picked = legal_moves
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| {
                EndgameError::InvalidConfiguration(format!("no legal move in {position}"))
            })?;

        let mut out = EngineOutput::new(picked);
        out.info_lines
            .push(format!("random pick among {} legal moves", legal_moves.len()));
        Ok(out)
    }
}
