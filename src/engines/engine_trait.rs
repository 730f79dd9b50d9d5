//! Engine abstraction used by the game driver.
//!
//! Every way of picking a move (search, random baseline, a human at the
//! console) sits behind [`Engine`] so the driver can pair any two of them.

use crate::errors::EndgameResult;
use crate::game_state::chess_types::Position;
use crate::move_generation::legal_move_generator::GeneratedMove;
use crate::search::history::PathHistory;

#[derive(Debug, Clone)]
pub struct EngineOutput {
    pub chosen: GeneratedMove,
    pub info_lines: Vec<String>,
}

impl EngineOutput {
    pub fn new(chosen: GeneratedMove) -> Self {
        Self {
            chosen,
            info_lines: Vec::new(),
        }
    }
}

pub trait Engine {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    /// Pick a move for the side to move in `position`.
    ///
    /// `history` holds the positions played so far, `position` excluded.
    fn choose_move(
        &mut self,
        position: &Position,
        plies_remaining: u32,
        history: &PathHistory,
    ) -> EndgameResult<EngineOutput>;
}
