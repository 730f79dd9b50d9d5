//! Search-backed engine for either side.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::EngineConfig;
use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::errors::EndgameResult;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::GeneratedMove;
use crate::search::alpha_beta::{AlphaBetaSearch, SearchConfig};
use crate::search::board_scoring::{
    AttackerScorer, AttackerWeights, BoardScorer, DefenderScorer, DefenderWeights,
};
use crate::search::history::PathHistory;

pub struct MinimaxEngine {
    name: String,
    search: AlphaBetaSearch,
    scorer: Box<dyn BoardScorer>,
    seed: Option<u64>,
    rng: StdRng,
}

impl MinimaxEngine {
    pub fn new(config: SearchConfig, scorer: Box<dyn BoardScorer>, seed: Option<u64>) -> Self {
        Self {
            name: format!("minimax {} (depth {})", scorer.side(), config.max_depth),
            search: AlphaBetaSearch::new(config),
            scorer,
            seed,
            rng: make_rng(seed),
        }
    }

    pub fn attacker(config: SearchConfig, weights: AttackerWeights, seed: Option<u64>) -> Self {
        Self::new(config, Box::new(AttackerScorer::new(weights)), seed)
    }

    pub fn defender(config: SearchConfig, weights: DefenderWeights, seed: Option<u64>) -> Self {
        Self::new(config, Box::new(DefenderScorer::new(weights)), seed)
    }

    /// Engine for `side` with the configured depth, weights and seed.
    pub fn from_config(config: &EngineConfig, side: Side) -> Self {
        let seed = config.game.seed_for(side);
        match side {
            Side::Attacker => Self::attacker(config.search, config.attacker, seed),
            Side::Defender => Self::defender(config.search, config.defender, seed),
        }
    }

    pub fn side(&self) -> Side {
        self.scorer.side()
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

impl Engine for MinimaxEngine {
    fn name(&self) -> &str {
        &self.name
    }

    /// Seeded engines replay the same random stream every game.
    fn new_game(&mut self) {
        if self.seed.is_some() {
            self.rng = make_rng(self.seed);
        }
    }

    fn choose_move(
        &mut self,
        position: &Position,
        plies_remaining: u32,
        history: &PathHistory,
    ) -> EndgameResult<EngineOutput> {
        let result = self.search.best_move(
            position,
            self.scorer.as_ref(),
            plies_remaining,
            history,
            &mut self.rng,
        )?;

        let chosen = GeneratedMove {
            mv: result.best_move,
            position_after: result.best_position,
        };

        let mut out = EngineOutput::new(chosen);
        out.info_lines.push(format!(
            "depth {} nodes {} score {:.3} ties {}",
            result.searched_depth, result.nodes, result.best_score, result.tied_candidates
        ));
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::MinimaxEngine;
    use crate::engines::engine_trait::Engine;
    use crate::game_state::chess_types::*;
    use crate::search::alpha_beta::SearchConfig;
    use crate::search::board_scoring::{AttackerWeights, DefenderWeights};
    use crate::search::history::PathHistory;

    fn sq(file: i32, rank: i32) -> Square {
        square_from_coords(file, rank).expect("test square should be on the board")
    }

    #[test]
    fn seeded_engine_repeats_after_new_game() {
        let start = Position::new(sq(0, 0), Some(sq(0, 7)), sq(4, 4), Side::Attacker);
        let mut engine =
            MinimaxEngine::attacker(SearchConfig::default(), AttackerWeights::default(), Some(3));

        let first = engine
            .choose_move(&start, 70, &PathHistory::new())
            .expect("engine should move");
        engine.new_game();
        let second = engine
            .choose_move(&start, 70, &PathHistory::new())
            .expect("engine should move");

        assert_eq!(first.chosen, second.chosen);
        assert_eq!(first.info_lines.len(), 1);
    }

    #[test]
    fn defender_engine_moves_the_defender_king() {
        let position = Position::new(sq(0, 0), Some(sq(0, 7)), sq(4, 4), Side::Defender);
        let mut engine =
            MinimaxEngine::defender(SearchConfig::default(), DefenderWeights::default(), Some(1));
        assert_eq!(engine.side(), Side::Defender);

        let out = engine
            .choose_move(&position, 10, &PathHistory::new())
            .expect("engine should move");
        assert_eq!(out.chosen.mv.side, Side::Defender);
        assert_eq!(out.chosen.mv.from, sq(4, 4));
        assert!(out.chosen.position_after.is_legal());
    }
}
