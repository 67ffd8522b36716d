use serde::Serialize;

use glimpse_core::model::{GameSession, ImageStatus, RoundPhase, RoundState};

/// Read-only view of the game for front-ends that redraw from state rather
/// than from port calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub round: u32,
    pub total_rounds: u32,
    pub score: u32,
    pub streak: u32,
    pub attempts_remaining: u8,
    pub quarters_revealed: u8,
    pub progress_percent: u8,
    pub choices: Vec<String>,
    pub phase: Option<RoundPhase>,
    pub image: Option<ImageStatus>,
    pub ended: bool,
}

impl GameSnapshot {
    pub(crate) fn capture(session: &GameSession, round: Option<&RoundState>) -> Self {
        Self {
            round: session.round_index(),
            total_rounds: session.total_rounds(),
            score: session.score(),
            streak: session.streak(),
            attempts_remaining: round.map_or(0, RoundState::attempts_remaining),
            quarters_revealed: round.map_or(0, RoundState::quarters_revealed),
            progress_percent: round.map_or(0, RoundState::progress_percent),
            choices: round
                .map(|r| {
                    r.question()
                        .candidates()
                        .iter()
                        .map(|label| label.as_str().to_string())
                        .collect()
                })
                .unwrap_or_default(),
            phase: round.map(RoundState::phase),
            image: round.map(RoundState::image_status),
            ended: session.is_ended(),
        }
    }
}
