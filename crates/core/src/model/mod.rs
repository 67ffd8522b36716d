mod ids;
mod question;
mod round;
mod session;
mod settings;

pub use ids::QuestionId;
pub use question::{CHOICE_COUNT, ImageRef, Label, Question, QuestionError};
pub use round::{
    ATTEMPTS_PER_ROUND, Guess, GuessOutcome, ImageStatus, QUADRANTS, Quadrant, REVEAL_ORDER,
    RevealState, RoundOutcome, RoundPhase, RoundState,
};
pub use session::{GameSession, GameSummary, RoundRecord};
pub use settings::{GameSettings, SettingsError};
