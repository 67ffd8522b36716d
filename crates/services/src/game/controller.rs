use std::fmt;

use rand::rngs::StdRng;
use rand::{SeedableRng, rng};
use tracing::{debug, info, warn};

use glimpse_core::Catalog;
use glimpse_core::Clock;
use glimpse_core::model::{
    GameSession, GameSettings, GameSummary, GuessOutcome, Label, Question, RoundRecord,
    RoundState,
};
use glimpse_core::scoring::FinalGrade;

use super::selection::select_questions;
use super::snapshot::GameSnapshot;
use super::ticket::{Ticket, TicketKind};
use crate::error::GameError;
use crate::presentation::{ChoiceState, Feedback, Hud, PresentationPort};

const IMAGE_LOAD_FAILED: &str = "Error loading image. Please try again.";
const TRY_AGAIN: &str = "Incorrect! Try again with more of the image revealed.";

//
// ─── CHOICE RESULT ─────────────────────────────────────────────────────────────
//

/// What happened when the player picked a label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceResult {
    pub is_correct: bool,
    pub points: u32,
    pub attempts_remaining: u8,
    pub round_resolved: bool,
    pub feedback: Feedback,
}

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// Drives a whole game: question draw, reveals, scoring, round advance and game over.
///
/// Everything happens on explicit commands. Deferred work (image loads, cooldowns,
/// the game-over pause) is requested from the port with a [`Ticket`] and resumes
/// when the front-end hands that ticket back.
pub struct RoundController<P> {
    port: P,
    catalog: Catalog,
    settings: GameSettings,
    clock: Clock,
    rng: StdRng,
    session: GameSession,
    questions: Vec<Question>,
    round: Option<RoundState>,
    epoch: u64,
    game_over_pending: bool,
}

impl<P: PresentationPort> RoundController<P> {
    #[must_use]
    pub fn new(catalog: Catalog, settings: GameSettings, port: P) -> Self {
        let clock = Clock::default();
        Self {
            port,
            catalog,
            session: GameSession::new(settings.total_rounds(), clock.now()),
            settings,
            clock,
            rng: StdRng::from_rng(&mut rng()),
            questions: Vec::new(),
            round: None,
            epoch: 0,
            game_over_pending: false,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// A controller over the built-in catalog with default settings, optionally
    /// overriding the round count.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Settings` for an invalid round count and
    /// `GameError::Question` if the built-in catalog fails validation.
    pub fn builtin(total_rounds: Option<u32>, port: P) -> Result<Self, GameError> {
        let settings = match total_rounds {
            Some(rounds) => GameSettings::default().with_total_rounds(rounds)?,
            None => GameSettings::default(),
        };
        Ok(Self::new(Catalog::builtin()?, settings, port))
    }

    /// Make question draws reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    #[must_use]
    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    #[must_use]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    #[must_use]
    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    /// Questions drawn for the current game, in round order.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn summary(&self) -> Option<GameSummary> {
        self.session.summary()
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(&self.session, self.round.as_ref())
    }

    //
    // ─── COMMANDS ──────────────────────────────────────────────────────────────
    //

    /// Draw questions and load the first round.
    ///
    /// # Errors
    ///
    /// Returns `GameError::PoolTooSmall` if the catalog cannot fill the game.
    pub fn start(&mut self) -> Result<(), GameError> {
        self.questions =
            select_questions(self.catalog.questions(), self.settings.total_rounds(), &mut self.rng)?;
        self.session = GameSession::new(self.settings.total_rounds(), self.clock.now());
        self.game_over_pending = false;
        info!(
            rounds = self.settings.total_rounds(),
            pool = self.catalog.len(),
            "game started"
        );
        self.port.hide_controls();
        self.load_round();
        Ok(())
    }

    /// Throw the current game away and start a fresh one with a new draw.
    ///
    /// # Errors
    ///
    /// Same as [`RoundController::start`].
    pub fn restart(&mut self) -> Result<(), GameError> {
        info!(
            score = self.session.score(),
            round = self.session.round_index(),
            "restarting game"
        );
        self.start()
    }

    /// The picture for `ticket` finished loading; show the first quadrant.
    ///
    /// Returns `false` if the ticket is stale or already answered.
    pub fn image_ready(&mut self, ticket: Ticket) -> bool {
        if !self.is_current(ticket, TicketKind::ImageLoad) {
            return false;
        }
        let Some(round) = self.round.as_mut() else {
            return false;
        };
        if !round.mark_image_ready() {
            return false;
        }
        if let Some(quadrant) = round.reveal_next() {
            self.port.reveal_quadrant(quadrant);
        }
        self.push_hud();
        true
    }

    /// The picture for `ticket` could not be loaded. The round stays stuck until
    /// the player restarts.
    ///
    /// Returns `false` if the ticket is stale or already answered.
    pub fn image_failed(&mut self, ticket: Ticket) -> bool {
        if !self.is_current(ticket, TicketKind::ImageLoad) {
            return false;
        }
        let Some(round) = self.round.as_mut() else {
            return false;
        };
        if !round.mark_image_failed() {
            return false;
        }
        warn!(
            round = self.session.round_index(),
            image = %round.question().image(),
            "image failed to load"
        );
        self.port.show_feedback(&Feedback::negative(IMAGE_LOAD_FAILED));
        self.port.show_restart_control();
        true
    }

    /// A delay requested through [`PresentationPort::schedule`] has elapsed.
    ///
    /// Returns `false` if the ticket is stale or nothing was waiting on it.
    pub fn timer_fired(&mut self, ticket: Ticket) -> bool {
        if ticket.epoch() != self.epoch {
            debug!(?ticket, epoch = self.epoch, "ignoring stale timer");
            return false;
        }
        match ticket.kind() {
            TicketKind::RetryCooldown => self.end_cooldown(),
            TicketKind::GameOver if self.game_over_pending => {
                self.end_game();
                true
            }
            TicketKind::GameOver | TicketKind::ImageLoad => false,
        }
    }

    /// Score a pick of `label` against the active question.
    ///
    /// # Errors
    ///
    /// Returns `GameError::GameOver` after the game ended, `GameError::NotStarted`
    /// before [`RoundController::start`], and `GameError::NotAcceptingChoices`
    /// until the picture has loaded, during a cooldown and after the round resolved.
    pub fn submit_choice(&mut self, label: &Label) -> Result<ChoiceResult, GameError> {
        if self.session.is_ended() {
            return Err(GameError::GameOver);
        }
        let round = self.round.as_mut().ok_or(GameError::NotStarted)?;
        let guess = round
            .apply_guess(label)
            .ok_or(GameError::NotAcceptingChoices {
                phase: round.phase(),
                image: round.image_status(),
            })?;

        for quadrant in &guess.revealed {
            self.port.reveal_quadrant(*quadrant);
        }

        let correct = round.question().correct().clone();
        let candidates = round.question().candidates().clone();
        let attempts_remaining = round.attempts_remaining();
        let record = round.outcome().map(|outcome| RoundRecord {
            question_id: round.question().id(),
            outcome,
            wrong_guesses: round.wrong_guesses(),
        });

        for candidate in &candidates {
            self.port.set_choice_state(candidate, ChoiceState::Disabled);
        }

        let (feedback, points) = match guess.outcome {
            GuessOutcome::Correct { points } => {
                self.session.record_correct(points);
                self.port.set_choice_state(&correct, ChoiceState::Correct);
                (Feedback::positive(format!("Correct! +{points} points")), points)
            }
            GuessOutcome::Retry { .. } => {
                self.session.record_miss();
                self.port.set_choice_state(label, ChoiceState::Incorrect);
                self.port.schedule(
                    Ticket::new(self.epoch, TicketKind::RetryCooldown),
                    self.settings.retry_cooldown(),
                );
                (Feedback::negative(TRY_AGAIN), 0)
            }
            GuessOutcome::Disclosed => {
                self.session.record_miss();
                self.port.set_choice_state(label, ChoiceState::Incorrect);
                self.port.set_choice_state(&correct, ChoiceState::Correct);
                (
                    Feedback::negative(format!("No more attempts! The answer was \"{correct}\"")),
                    0,
                )
            }
        };

        let is_correct = matches!(guess.outcome, GuessOutcome::Correct { .. });
        let round_resolved = record.is_some();
        debug!(
            round = self.session.round_index(),
            label = %label,
            outcome = ?guess.outcome,
            "choice scored"
        );

        self.port.show_feedback(&feedback);
        self.push_hud();
        if let Some(record) = record {
            self.session.push_record(record);
            self.after_resolution();
        }

        Ok(ChoiceResult {
            is_correct,
            points,
            attempts_remaining,
            round_resolved,
            feedback,
        })
    }

    /// Move on once the round is resolved. On the last round this schedules the
    /// final score instead.
    ///
    /// # Errors
    ///
    /// Returns `GameError::GameOver` after the game ended and
    /// `GameError::RoundInProgress` while the round is unresolved.
    pub fn advance_round(&mut self) -> Result<(), GameError> {
        if self.session.is_ended() {
            return Err(GameError::GameOver);
        }
        let round = self.round.as_ref().ok_or(GameError::NotStarted)?;
        if !round.is_resolved() {
            return Err(GameError::RoundInProgress {
                round: self.session.round_index(),
            });
        }

        if self.session.is_last_round() {
            self.schedule_game_over();
            return Ok(());
        }

        self.session.advance();
        self.load_round();
        Ok(())
    }

    //
    // ─── INTERNALS ─────────────────────────────────────────────────────────────
    //

    fn is_current(&self, ticket: Ticket, kind: TicketKind) -> bool {
        if ticket.kind() != kind {
            return false;
        }
        if ticket.epoch() != self.epoch {
            debug!(?ticket, epoch = self.epoch, "ignoring stale ticket");
            return false;
        }
        true
    }

    fn load_round(&mut self) {
        let index = self.session.round_index();
        let drawn = usize::try_from(index.saturating_sub(1))
            .ok()
            .and_then(|i| self.questions.get(i))
            .cloned();
        // Past the last drawn question means the game is over.
        let Some(question) = drawn else {
            self.end_game();
            return;
        };

        self.epoch += 1;
        let ticket = Ticket::new(self.epoch, TicketKind::ImageLoad);

        self.port.reset_board();
        self.port.clear_feedback();
        self.port.hide_controls();
        self.port.render_choices(question.candidates());
        for candidate in question.candidates() {
            self.port.set_choice_state(candidate, ChoiceState::Enabled);
        }
        self.port.display_image(question.image(), ticket);

        info!(round = index, question = %question.id(), "round loaded");
        self.round = Some(RoundState::new(question));
        self.push_hud();
    }

    fn end_cooldown(&mut self) -> bool {
        let Some(round) = self.round.as_mut() else {
            return false;
        };
        if !round.end_cooldown() {
            return false;
        }
        for candidate in round.question().candidates() {
            self.port.set_choice_state(candidate, ChoiceState::Enabled);
        }
        true
    }

    fn after_resolution(&mut self) {
        if self.session.is_last_round() {
            self.schedule_game_over();
        } else {
            self.port.show_next_control();
        }
    }

    fn schedule_game_over(&mut self) {
        if self.game_over_pending {
            return;
        }
        self.game_over_pending = true;
        self.port.schedule(
            Ticket::new(self.epoch, TicketKind::GameOver),
            self.settings.game_over_delay(),
        );
    }

    fn end_game(&mut self) -> FinalGrade {
        self.game_over_pending = false;
        let grade = self.session.finish(self.clock.now());
        info!(
            score = grade.score,
            max = grade.max_score,
            percentage = grade.percentage,
            tier = ?grade.tier,
            "game over"
        );
        self.port.hide_controls();
        self.port.show_feedback(&Feedback {
            message: grade.message(),
            polarity: grade.polarity(),
        });
        self.port.show_restart_control();
        self.push_hud();
        grade
    }

    fn push_hud(&mut self) {
        let (attempts_remaining, reveal_progress_percent) = self
            .round
            .as_ref()
            .map_or((0, 0), |r| (r.attempts_remaining(), r.progress_percent()));
        self.port.update_hud(&Hud {
            round: self.session.round_index(),
            total_rounds: self.session.total_rounds(),
            score: self.session.score(),
            streak: self.session.streak(),
            attempts_remaining,
            reveal_progress_percent,
        });
    }
}

impl<P> fmt::Debug for RoundController<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoundController")
            .field("session", &self.session)
            .field("round", &self.round)
            .field("questions_len", &self.questions.len())
            .field("epoch", &self.epoch)
            .field("game_over_pending", &self.game_over_pending)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
