use serde::{Deserialize, Serialize};

use crate::model::question::{Label, Question};
use crate::scoring::points_for;

/// Number of regions the picture is split into.
pub const QUADRANTS: u8 = 4;

/// Guesses allowed per round before the answer is disclosed.
pub const ATTEMPTS_PER_ROUND: u8 = 4;

/// Top-left, bottom-right, top-right, bottom-left.
pub const REVEAL_ORDER: [Quadrant; QUADRANTS as usize] =
    [Quadrant(0), Quadrant(3), Quadrant(1), Quadrant(2)];

/// One of the four regions of a picture, numbered row-major from the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quadrant(u8);

impl Quadrant {
    #[must_use]
    pub fn index(self) -> u8 {
        self.0
    }
}

//
// ─── REVEAL ────────────────────────────────────────────────────────────────────
//

/// Tracks how much of the picture is visible. Only ever grows within a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RevealState {
    revealed: u8,
}

impl RevealState {
    #[must_use]
    pub fn quarters_revealed(&self) -> u8 {
        self.revealed
    }

    /// Reveal the next quadrant in `REVEAL_ORDER`; `None` once everything is visible.
    pub fn reveal_next(&mut self) -> Option<Quadrant> {
        let quadrant = REVEAL_ORDER.get(usize::from(self.revealed)).copied()?;
        self.revealed += 1;
        Some(quadrant)
    }

    /// Reveal everything still hidden, returning the newly revealed quadrants in order.
    pub fn reveal_all(&mut self) -> Vec<Quadrant> {
        std::iter::from_fn(|| self.reveal_next()).collect()
    }

    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        let percent = u16::from(self.revealed) * 100 / u16::from(QUADRANTS);
        u8::try_from(percent).unwrap_or(100)
    }
}

//
// ─── ROUND STATE ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageStatus {
    Pending,
    Ready,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum RoundOutcome {
    Correct { points: u32 },
    /// Attempts ran out; the correct label was shown to the player.
    Disclosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "phase")]
pub enum RoundPhase {
    Guessing,
    /// A wrong guess was made; choices stay locked until the cooldown ends.
    CoolingDown,
    Resolved { outcome: RoundOutcome },
}

/// What a single guess did to the round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct { points: u32 },
    Retry { attempts_remaining: u8 },
    Disclosed,
}

/// Result of applying a guess: the outcome and the quadrants it uncovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guess {
    pub outcome: GuessOutcome,
    pub revealed: Vec<Quadrant>,
}

/// Per-round state. Replaced wholesale when the next round loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    question: Question,
    attempts_remaining: u8,
    reveal: RevealState,
    image: ImageStatus,
    phase: RoundPhase,
}

impl RoundState {
    #[must_use]
    pub fn new(question: Question) -> Self {
        Self {
            question,
            attempts_remaining: ATTEMPTS_PER_ROUND,
            reveal: RevealState::default(),
            image: ImageStatus::Pending,
            phase: RoundPhase::Guessing,
        }
    }

    #[must_use]
    pub fn question(&self) -> &Question {
        &self.question
    }

    #[must_use]
    pub fn attempts_remaining(&self) -> u8 {
        self.attempts_remaining
    }

    #[must_use]
    pub fn wrong_guesses(&self) -> u8 {
        ATTEMPTS_PER_ROUND - self.attempts_remaining
    }

    #[must_use]
    pub fn quarters_revealed(&self) -> u8 {
        self.reveal.quarters_revealed()
    }

    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        self.reveal.progress_percent()
    }

    #[must_use]
    pub fn image_status(&self) -> ImageStatus {
        self.image
    }

    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    #[must_use]
    pub fn outcome(&self) -> Option<RoundOutcome> {
        match self.phase {
            RoundPhase::Resolved { outcome } => Some(outcome),
            RoundPhase::Guessing | RoundPhase::CoolingDown => None,
        }
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.outcome().is_some()
    }

    /// Guesses are only taken once the picture is on screen.
    #[must_use]
    pub fn accepts_choices(&self) -> bool {
        self.phase == RoundPhase::Guessing && self.image == ImageStatus::Ready
    }

    pub fn reveal_next(&mut self) -> Option<Quadrant> {
        self.reveal.reveal_next()
    }

    /// Marks the picture as loaded. Returns `false` if it was not pending.
    pub fn mark_image_ready(&mut self) -> bool {
        if self.image != ImageStatus::Pending {
            return false;
        }
        self.image = ImageStatus::Ready;
        true
    }

    /// Marks the picture as unavailable. Returns `false` if it was not pending.
    pub fn mark_image_failed(&mut self) -> bool {
        if self.image != ImageStatus::Pending {
            return false;
        }
        self.image = ImageStatus::Failed;
        true
    }

    /// Ends a cooldown. Returns `false` if the round was not cooling down.
    pub fn end_cooldown(&mut self) -> bool {
        if self.phase != RoundPhase::CoolingDown {
            return false;
        }
        self.phase = RoundPhase::Guessing;
        true
    }

    /// Apply a guess. Returns `None` when the round is not taking choices.
    pub fn apply_guess(&mut self, label: &Label) -> Option<Guess> {
        if !self.accepts_choices() {
            return None;
        }

        if self.question.is_correct(label) {
            let points = points_for(self.reveal.quarters_revealed());
            self.phase = RoundPhase::Resolved {
                outcome: RoundOutcome::Correct { points },
            };
            return Some(Guess {
                outcome: GuessOutcome::Correct { points },
                revealed: self.reveal.reveal_all(),
            });
        }

        self.attempts_remaining = self.attempts_remaining.saturating_sub(1);
        if self.attempts_remaining > 0 {
            self.phase = RoundPhase::CoolingDown;
            Some(Guess {
                outcome: GuessOutcome::Retry {
                    attempts_remaining: self.attempts_remaining,
                },
                revealed: self.reveal.reveal_next().into_iter().collect(),
            })
        } else {
            self.phase = RoundPhase::Resolved {
                outcome: RoundOutcome::Disclosed,
            };
            Some(Guess {
                outcome: GuessOutcome::Disclosed,
                revealed: self.reveal.reveal_all(),
            })
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
