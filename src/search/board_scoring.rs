//! Static evaluation for the two sides.
//!
//! Each side owns its own scale: the attacker scorer rewards confining the
//! defender king, the defender scorer rewards staying central and drawing.
//! They are not negations of each other, so the search always asks the
//! scorer for the side it is playing and never flips signs.

use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::*;
use crate::game_state::game_outcome::GameOutcome;
use crate::move_generation::legal_move_checks::{
    attacker_king_blocks_rook, defender_king_mobility, is_defender_in_check, is_rook_hanging,
};

/// Everything a scorer may look at for one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringContext {
    pub position: Position,
    pub outcome: Option<GameOutcome>,
    /// Distance of the node from the search root.
    pub ply: u32,
    /// The node repeats the path inside the cycle window.
    pub repeating_cycle: bool,
}

impl ScoringContext {
    pub fn new(position: Position, outcome: Option<GameOutcome>, ply: u32) -> Self {
        Self {
            position,
            outcome,
            ply,
            repeating_cycle: false,
        }
    }

    #[inline]
    fn depth_scale(&self) -> f64 {
        f64::from(self.ply) + 1.0
    }
}

pub trait BoardScorer: Send + Sync {
    /// The side whose scale this scorer uses. The search maximizes this
    /// scorer's value when that side is to move.
    fn side(&self) -> Side;

    /// Finite score, larger is better for [`BoardScorer::side`].
    ///
    /// # Panics
    ///
    /// Panics on a position with an off-board square. Positions from the
    /// move generator or [`Position::try_new`] are always on the board.
    fn score(&self, ctx: &ScoringContext) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackerWeights {
    pub edge: f64,
    pub king_proximity: f64,
    pub rook_alignment: f64,
    pub mobility: f64,
    pub checkmate_bonus: f64,
    pub draw_penalty: f64,
    pub cycle_penalty: f64,
    pub hanging_rook_penalty: f64,
    pub opposition_bonus: f64,
}

impl Default for AttackerWeights {
    fn default() -> Self {
        Self {
            edge: 9.7,
            king_proximity: 1.6,
            rook_alignment: 1.0,
            mobility: 10.0,
            checkmate_bonus: 1000.0,
            draw_penalty: 1000.0,
            cycle_penalty: 1000.0,
            hanging_rook_penalty: 1000.0,
            opposition_bonus: 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefenderWeights {
    pub rook_diagonal: f64,
    pub center: f64,
    pub mobility: f64,
    pub checkmate_penalty: f64,
    pub stalemate_bonus: f64,
    pub rook_capture_bonus: f64,
    pub check_penalty: f64,
    pub rook_threat_bonus: f64,
    pub opposition_bonus: f64,
}

impl Default for DefenderWeights {
    fn default() -> Self {
        Self {
            rook_diagonal: 9.3,
            center: 5.7,
            mobility: 10.0,
            checkmate_penalty: 1000.0,
            stalemate_bonus: 1000.0,
            rook_capture_bonus: 1500.0,
            check_penalty: 500.0,
            rook_threat_bonus: 250.0,
            opposition_bonus: 10.0,
        }
    }
}

/// Mobility of the defender king, damped near the edge where every lost
/// square matters more.
#[inline]
fn damped_mobility(position: &Position, cmd: i32) -> f64 {
    f64::from(defender_king_mobility(position)) / f64::from(cmd + 1)
}

#[inline]
fn rook_offsets(position: &Position) -> Option<(i32, i32)> {
    position.attacker_rook().map(|rook| {
        let king = position.defender_king();
        (
            (file_of(rook) - file_of(king)).abs(),
            (rank_of(rook) - rank_of(king)).abs(),
        )
    })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AttackerScorer {
    pub weights: AttackerWeights,
}

impl AttackerScorer {
    pub const fn new(weights: AttackerWeights) -> Self {
        Self { weights }
    }

    /// How well the rook lines up with the defender king: high on a shared
    /// rank or file, negative on the diagonal.
    fn rook_alignment(position: &Position) -> f64 {
        let Some((df, dr)) = rook_offsets(position) else {
            return 0.0;
        };
        let align = f64::from(df.max(dr)) / f64::from(df.min(dr) + 1) - 1.0;
        if attacker_king_blocks_rook(position) {
            -2.0 * align
        } else {
            align
        }
    }
}

impl BoardScorer for AttackerScorer {
    fn side(&self) -> Side {
        Side::Attacker
    }

    fn score(&self, ctx: &ScoringContext) -> f64 {
        let w = &self.weights;
        let position = &ctx.position;
        let cmd = center_manhattan_distance(position.defender_king());
        let kings = manhattan_distance(position.attacker_king(), position.defender_king());

        let mut score = w.edge * f64::from(cmd)
            + w.king_proximity * f64::from(14 - kings)
            + w.rook_alignment * Self::rook_alignment(position)
            - w.mobility * damped_mobility(position, cmd);

        match ctx.outcome {
            Some(GameOutcome::Checkmate {
                winner: Side::Attacker,
            }) => score += w.checkmate_bonus / ctx.depth_scale(),
            Some(GameOutcome::Stalemate | GameOutcome::RookCaptured) => {
                score -= w.draw_penalty / ctx.depth_scale()
            }
            _ => {}
        }

        if ctx.repeating_cycle {
            score -= w.cycle_penalty;
        }

        if position.side_to_move() == Side::Defender {
            if is_rook_hanging(position) {
                score -= w.hanging_rook_penalty;
            }
            if chebyshev_distance(position.attacker_king(), position.defender_king()) == 2 {
                score += w.opposition_bonus;
            }
        }

        score
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefenderScorer {
    pub weights: DefenderWeights,
}

impl DefenderScorer {
    pub const fn new(weights: DefenderWeights) -> Self {
        Self { weights }
    }
}

impl BoardScorer for DefenderScorer {
    fn side(&self) -> Side {
        Side::Defender
    }

    fn score(&self, ctx: &ScoringContext) -> f64 {
        let w = &self.weights;
        let position = &ctx.position;
        let cmd = center_manhattan_distance(position.defender_king());
        let diagonal = rook_offsets(position).map_or(0, |(df, dr)| (df - dr).abs());

        let mut score = -w.rook_diagonal * f64::from(diagonal) - w.center * f64::from(cmd)
            + w.mobility * damped_mobility(position, cmd);

        match ctx.outcome {
            Some(GameOutcome::Checkmate { .. }) => score -= w.checkmate_penalty / ctx.depth_scale(),
            Some(GameOutcome::Stalemate) => score += w.stalemate_bonus / ctx.depth_scale(),
            Some(GameOutcome::RookCaptured) => score += w.rook_capture_bonus / ctx.depth_scale(),
            _ => {}
        }

        if is_defender_in_check(position) {
            score -= w.check_penalty;
        }

        if position.side_to_move() == Side::Attacker {
            let near_rook = position
                .attacker_rook()
                .is_some_and(|rook| chebyshev_distance(rook, position.defender_king()) == 1);
            if near_rook {
                score += w.rook_threat_bonus;
            }
            if chebyshev_distance(position.attacker_king(), position.defender_king()) == 2 {
                score += w.opposition_bonus;
            }
        }

        score
    }
}
