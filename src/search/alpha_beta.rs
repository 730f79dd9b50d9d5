//! Depth-limited minimax with alpha-beta pruning.
//!
//! The search is parameterized by a [`BoardScorer`]: the scorer's side is the
//! maximizing side and every leaf is scored on that side's own scale. The
//! opponent's nodes minimize the same scale. Root children are searched with
//! an open window so their values are exact; the best move is drawn
//! uniformly from the children sharing the maximal value.

use rand::prelude::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::errors::{EndgameError, EndgameResult};
use crate::game_state::chess_types::*;
use crate::game_state::game_outcome::classify_position;
use crate::move_generation::legal_move_generator::{LegalMoveGenerator, Move};
use crate::search::board_scoring::{BoardScorer, ScoringContext};
use crate::search::history::{CycleWindow, PathHistory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Lookahead in plies. The effective depth is further capped by the
    /// plies left in the game.
    pub max_depth: u32,
    pub cycle_window: CycleWindow,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            cycle_window: CycleWindow::default(),
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> EndgameResult<()> {
        if self.max_depth == 0 {
            return Err(EndgameError::InvalidArgument(
                "search max_depth must be at least 1".to_owned(),
            ));
        }
        self.cycle_window.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    pub best_move: Move,
    pub best_position: Position,
    pub best_score: f64,
    /// Root children sharing `best_score`, the chosen one included.
    pub tied_candidates: usize,
    pub searched_depth: u32,
    pub nodes: u64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AlphaBetaSearch {
    config: SearchConfig,
    generator: LegalMoveGenerator,
}

impl AlphaBetaSearch {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            generator: LegalMoveGenerator,
        }
    }

    /// Pick a move for the side to move in `root`.
    ///
    /// `history` holds the positions played before `root` (oldest first, the
    /// root itself excluded). `plies_remaining` is the game's remaining ply
    /// budget including the move being chosen.
    pub fn best_move<R: Rng + ?Sized>(
        &self,
        root: &Position,
        scorer: &dyn BoardScorer,
        plies_remaining: u32,
        history: &PathHistory,
        rng: &mut R,
    ) -> EndgameResult<SearchResult> {
        self.config.validate()?;
        if plies_remaining == 0 {
            return Err(EndgameError::InvalidArgument(
                "cannot search with zero plies remaining".to_owned(),
            ));
        }
        let root = root.validated()?;
        if root.side_to_move() != scorer.side() {
            return Err(EndgameError::InvalidArgument(format!(
                "{} scorer asked to move for {}",
                scorer.side(),
                root.side_to_move()
            )));
        }

        let moves = self.generator.generate_legal_moves(&root);
        if let Some(outcome) = classify_position(&root, &moves, plies_remaining) {
            return Err(EndgameError::GameOver(outcome));
        }

        let depth = self.config.max_depth.min(plies_remaining);
        let mut run = SearchRun {
            generator: &self.generator,
            scorer,
            window: self.config.cycle_window,
            plies_remaining,
            depth,
            path: history.clone(),
            nodes: 1,
        };
        run.path.push(root);

        let mut values = Vec::with_capacity(moves.len());
        for generated in &moves {
            let value =
                run.node_value(&generated.position_after, 1, f64::NEG_INFINITY, f64::INFINITY);
            trace!(mv = %generated.mv, value, "root child scored");
            values.push(value);
        }

        let best_score = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let tied: Vec<usize> = values
            .iter()
            .enumerate()
            .filter(|(_, value)| **value == best_score)
            .map(|(index, _)| index)
            .collect();
        let &chosen = tied.choose(rng).ok_or_else(|| {
            EndgameError::InvalidConfiguration(format!("no move to choose from {root}"))
        })?;
        let chosen = &moves[chosen];

        debug!(
            side = %scorer.side(),
            depth,
            nodes = run.nodes,
            best_score,
            ties = tied.len(),
            mv = %chosen.mv,
            "search complete"
        );

        Ok(SearchResult {
            best_move: chosen.mv,
            best_position: chosen.position_after,
            best_score,
            tied_candidates: tied.len(),
            searched_depth: depth,
            nodes: run.nodes,
        })
    }
}

/// State owned by one `best_move` call.
struct SearchRun<'a> {
    generator: &'a LegalMoveGenerator,
    scorer: &'a dyn BoardScorer,
    window: CycleWindow,
    plies_remaining: u32,
    depth: u32,
    path: PathHistory,
    nodes: u64,
}

impl SearchRun<'_> {
    /// Minimax value of `position`, `ply` plies below the root. `path` holds
    /// every ancestor of `position` but not `position` itself.
    fn node_value(&mut self, position: &Position, ply: u32, mut alpha: f64, mut beta: f64) -> f64 {
        self.nodes += 1;

        let moves = self.generator.generate_legal_moves(position);
        let outcome =
            classify_position(position, &moves, self.plies_remaining.saturating_sub(ply));
        let repeating_cycle = self.scorer.side() == Side::Attacker
            && position.side_to_move() == Side::Attacker
            && self.path.is_repeating_cycle(position, self.window);

        if outcome.is_some() || ply >= self.depth || repeating_cycle {
            return self.scorer.score(&ScoringContext {
                position: *position,
                outcome,
                ply,
                repeating_cycle,
            });
        }

        let maximizing = position.side_to_move() == self.scorer.side();
        let mut best = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };

        self.path.push(*position);
        for generated in &moves {
            let value = self.node_value(&generated.position_after, ply + 1, alpha, beta);
            if maximizing {
                best = best.max(value);
                alpha = alpha.max(best);
            } else {
                best = best.min(value);
                beta = beta.min(best);
            }
            if alpha >= beta {
                break;
            }
        }
        self.path.pop();

        best
    }
}
