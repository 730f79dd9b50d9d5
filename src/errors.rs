//! Errors used throughout the endgame engine.
//!
//! `EndgameError` is the single error type returned by position validation,
//! search entry points, the game driver, and the text parsers. Callers match
//! on it to tell input problems (bad scenario lines, unparseable moves) apart
//! from caller bugs (zero search budgets) and finished games.

use std::io;

use thiserror::Error;

use crate::game_state::game_outcome::GameOutcome;

pub type EndgameResult<T> = Result<T, EndgameError>;

/// Unified error type for the engine.
#[derive(Debug, Error)]
pub enum EndgameError {
    /// A starting position overlaps pieces, leaves the board, puts the kings
    /// next to each other, or is already decided.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A search or driver argument that can never be satisfied, such as a
    /// zero depth budget or an engine answering with an illegal successor.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A move was requested from a position that is already terminal.
    #[error("game is already over: {0}")]
    GameOver(GameOutcome),

    /// A square or piece move written by a human could not be interpreted.
    #[error("could not parse '{input}': {reason}")]
    Notation { input: String, reason: String },

    /// A scenario file line is malformed.
    ///
    /// Payload: 1-based line number and a description of the problem.
    #[error("scenario line {line}: {reason}")]
    ScenarioSyntax { line: usize, reason: String },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("failed to parse configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl EndgameError {
    pub(crate) fn notation(input: &str, reason: impl Into<String>) -> Self {
        EndgameError::Notation {
            input: input.to_owned(),
            reason: reason.into(),
        }
    }
}
