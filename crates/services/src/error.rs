//! Shared error types for the services crate.

use thiserror::Error;

use glimpse_core::model::{ImageStatus, QuestionError, RoundPhase, SettingsError};

/// Errors emitted by the round controller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GameError {
    #[error("game has not been started")]
    NotStarted,
    #[error("game is over; restart to play again")]
    GameOver,
    #[error("round {round} is still in progress")]
    RoundInProgress { round: u32 },
    #[error("choices are not accepted right now (phase {phase:?}, image {image:?})")]
    NotAcceptingChoices {
        phase: RoundPhase,
        image: ImageStatus,
    },
    #[error("question pool has {available} questions but {requested} rounds were requested")]
    PoolTooSmall { available: usize, requested: u32 },
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
