//! Crate root module declarations for the KRK endgame engine.
//!
//! King and rook against a lone king: position model, move generation,
//! per-side heuristics, alpha-beta search, the engines built on it, and the
//! game driver with its text surfaces (scenario files, console moves,
//! diagrams, transcripts).

pub mod config;
pub mod errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_outcome;
    pub mod game_state;
}

pub mod moves {
    pub mod king_moves;
    pub mod rook_moves;
}

pub mod move_generation {
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_moves_king;
    pub mod legal_moves_rook;
}

pub mod search {
    pub mod alpha_beta;
    pub mod board_scoring;
    pub mod history;
}

pub mod engines {
    pub mod engine_console;
    pub mod engine_minimax;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod utils {
    pub mod game_driver;
    pub mod notation;
    pub mod render_game_state;
    pub mod scenario;
    pub mod transcript;
}
