use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{QuestionId, RoundOutcome};
use crate::scoring::FinalGrade;

/// How a finished round went, kept for the end-of-game summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub question_id: QuestionId,
    pub outcome: RoundOutcome,
    pub wrong_guesses: u8,
}

/// Game-wide counters. Created at game start, replaced on restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    round_index: u32,
    total_rounds: u32,
    score: u32,
    streak: u32,
    best_streak: u32,
    ended: bool,
    records: Vec<RoundRecord>,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl GameSession {
    #[must_use]
    pub fn new(total_rounds: u32, started_at: DateTime<Utc>) -> Self {
        Self {
            round_index: 1,
            total_rounds,
            score: 0,
            streak: 0,
            best_streak: 0,
            ended: false,
            records: Vec::new(),
            started_at,
            completed_at: None,
        }
    }

    /// 1-based index of the active round.
    #[must_use]
    pub fn round_index(&self) -> u32 {
        self.round_index
    }

    #[must_use]
    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    #[must_use]
    pub fn is_last_round(&self) -> bool {
        self.round_index >= self.total_rounds
    }

    pub fn record_correct(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        self.streak += 1;
        self.best_streak = self.best_streak.max(self.streak);
    }

    pub fn record_miss(&mut self) {
        self.streak = 0;
    }

    pub fn push_record(&mut self, record: RoundRecord) {
        self.records.push(record);
    }

    pub fn advance(&mut self) {
        self.round_index += 1;
    }

    /// Ends the game and grades it. Repeated calls keep the first completion time.
    pub fn finish(&mut self, completed_at: DateTime<Utc>) -> FinalGrade {
        self.ended = true;
        self.completed_at.get_or_insert(completed_at);
        FinalGrade::new(self.score, self.total_rounds)
    }

    /// Summary of a finished game; `None` while the game is still running.
    #[must_use]
    pub fn summary(&self) -> Option<GameSummary> {
        let completed_at = self.completed_at?;
        let correct_rounds = self
            .records
            .iter()
            .filter(|r| matches!(r.outcome, RoundOutcome::Correct { .. }))
            .count();

        Some(GameSummary {
            grade: FinalGrade::new(self.score, self.total_rounds),
            rounds_played: self.records.len(),
            correct_rounds,
            best_streak: self.best_streak,
            started_at: self.started_at,
            completed_at,
        })
    }
}

/// Aggregate view of a completed game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    pub grade: FinalGrade,
    pub rounds_played: usize,
    pub correct_rounds: usize,
    pub best_streak: u32,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl GameSummary {
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.completed_at.signed_duration_since(self.started_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::Tier;
    use crate::time::fixed_now;

    #[test]
    fn streak_counts_consecutive_correct() {
        let mut session = GameSession::new(5, fixed_now());
        session.record_correct(20);
        session.record_correct(15);
        assert_eq!(session.streak(), 2);
        session.record_miss();
        assert_eq!(session.streak(), 0);
        session.record_correct(5);
        assert_eq!(session.streak(), 1);
        assert_eq!(session.best_streak(), 2);
        assert_eq!(session.score(), 40);
    }

    #[test]
    fn last_round_detection() {
        let mut session = GameSession::new(2, fixed_now());
        assert!(!session.is_last_round());
        session.advance();
        assert!(session.is_last_round());
        assert_eq!(session.round_index(), 2);
    }

    #[test]
    fn summary_only_after_finish() {
        let mut session = GameSession::new(1, fixed_now());
        session.record_correct(20);
        session.push_record(RoundRecord {
            question_id: QuestionId::new(3),
            outcome: RoundOutcome::Correct { points: 20 },
            wrong_guesses: 0,
        });
        assert!(session.summary().is_none());

        let done = fixed_now() + Duration::seconds(42);
        let grade = session.finish(done);
        assert_eq!(grade.tier, Tier::Excellent);
        assert!(session.is_ended());

        let summary = session.summary().unwrap();
        assert_eq!(summary.rounds_played, 1);
        assert_eq!(summary.correct_rounds, 1);
        assert_eq!(summary.elapsed(), Duration::seconds(42));

        session.finish(done + Duration::seconds(5));
        assert_eq!(session.summary().unwrap().completed_at, done);
    }
}
