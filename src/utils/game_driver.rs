//! Game loop and per-game state machine.
//!
//! A game starts `InProgress` and moves to `Finished(outcome)` the first
//! time [`game_outcome`] classifies the position after a ply. Finished is
//! absorbing. The driver owns the ply budget: it hands each engine the plies
//! still left and decrements the budget once per ply.

use tracing::{debug, info};

use crate::engines::engine_trait::Engine;
use crate::errors::{EndgameError, EndgameResult};
use crate::game_state::chess_types::*;
use crate::game_state::game_outcome::{game_outcome, GameOutcome};
use crate::move_generation::legal_move_generator::{LegalMoveGenerator, Move};
use crate::search::history::PathHistory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Finished(GameOutcome),
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, GameStatus::Finished(_))
    }
}

/// One played ply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlyRecord {
    /// 1-based ply number.
    pub ply: u32,
    pub mover: Side,
    pub mv: Move,
    /// Position after the move.
    pub position: Position,
    pub outcome: Option<GameOutcome>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub start: Position,
    pub ply_limit: u32,
    pub plies: Vec<PlyRecord>,
    pub status: GameStatus,
}

impl GameRecord {
    pub fn final_position(&self) -> Position {
        self.plies.last().map_or(self.start, |record| record.position)
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.status {
            GameStatus::InProgress => None,
            GameStatus::Finished(outcome) => Some(outcome),
        }
    }
}

/// Play `start` to the end with at most `ply_limit` plies, streaming every
/// ply to `on_ply` as soon as it is played.
pub fn play_game(
    start: Position,
    ply_limit: u32,
    attacker: &mut dyn Engine,
    defender: &mut dyn Engine,
    mut on_ply: impl FnMut(&PlyRecord),
) -> EndgameResult<GameRecord> {
    if ply_limit == 0 {
        return Err(EndgameError::InvalidArgument(
            "a game needs a ply limit of at least 1".to_owned(),
        ));
    }
    let start = start.validated()?;
    if let Some(outcome) = game_outcome(&start, ply_limit) {
        return Err(EndgameError::InvalidConfiguration(format!(
            "{start} is already decided ({outcome})"
        )));
    }

    attacker.new_game();
    defender.new_game();
    debug!(
        %start,
        ply_limit,
        attacker = attacker.name(),
        defender = defender.name(),
        "game started"
    );

    let generator = LegalMoveGenerator;
    let mut history = PathHistory::with_capacity(ply_limit as usize + 1);
    let mut record = GameRecord {
        start,
        ply_limit,
        plies: Vec::new(),
        status: GameStatus::InProgress,
    };
    let mut current = start;

    while !record.status.is_finished() {
        let played = record.plies.len() as u32;
        let remaining = ply_limit - played;
        let mover = current.side_to_move();
        let engine: &mut dyn Engine = match mover {
            Side::Attacker => &mut *attacker,
            Side::Defender => &mut *defender,
        };

        let output = engine.choose_move(&current, remaining, &history)?;
        if !generator.generate_legal_moves(&current).contains(&output.chosen) {
            return Err(EndgameError::InvalidArgument(format!(
                "{} answered {} which is not a legal move in {}",
                engine.name(),
                output.chosen.mv,
                current
            )));
        }
        for line in &output.info_lines {
            debug!(engine = engine.name(), "{line}");
        }

        history.push(current);
        current = output.chosen.position_after;
        let outcome = game_outcome(&current, remaining - 1);

        let ply = PlyRecord {
            ply: played + 1,
            mover,
            mv: output.chosen.mv,
            position: current,
            outcome,
        };
        info!(ply = ply.ply, mover = %mover, mv = %ply.mv, "ply played");
        on_ply(&ply);
        record.plies.push(ply);

        if let Some(outcome) = outcome {
            info!(%outcome, plies = ply.ply, "game finished");
            record.status = GameStatus::Finished(outcome);
        }
    }

    Ok(record)
}
