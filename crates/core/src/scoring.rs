//! Points per guess and end-of-game grading.

use serde::{Deserialize, Serialize};

use crate::model::QUADRANTS;

/// Points step: each hidden quadrant is worth this much.
pub const POINTS_PER_STEP: u32 = 5;

/// Best possible score for a single round: correct with only the first quadrant showing.
pub const MAX_POINTS_PER_ROUND: u32 = QUADRANTS as u32 * POINTS_PER_STEP;

/// Points for a correct guess made with `quarters_revealed` quadrants visible.
///
/// A loaded picture always shows at least one quadrant, so guesses score 20, 15,
/// 10, then 5 once everything is visible.
#[must_use]
pub fn points_for(quarters_revealed: u8) -> u32 {
    (u32::from(QUADRANTS) + 1)
        .saturating_sub(u32::from(quarters_revealed))
        .max(1)
        * POINTS_PER_STEP
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Positive,
    Negative,
}

/// Qualitative bucket for the final percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Excellent,
    Good,
    KeepPracticing,
}

impl Tier {
    #[must_use]
    pub fn for_percentage(percentage: u32) -> Self {
        match percentage {
            80.. => Tier::Excellent,
            60..=79 => Tier::Good,
            _ => Tier::KeepPracticing,
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Tier::Excellent => "🏆 Excellent!",
            Tier::Good => "👍 Good job!",
            Tier::KeepPracticing => "💪 Keep practicing!",
        }
    }

    #[must_use]
    pub fn polarity(self) -> Polarity {
        match self {
            Tier::Excellent | Tier::Good => Polarity::Positive,
            Tier::KeepPracticing => Polarity::Negative,
        }
    }
}

/// Final score expressed against the best possible result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalGrade {
    pub score: u32,
    pub max_score: u32,
    pub percentage: u32,
    pub tier: Tier,
}

impl FinalGrade {
    #[must_use]
    pub fn new(score: u32, total_rounds: u32) -> Self {
        let max_score = total_rounds.saturating_mul(MAX_POINTS_PER_ROUND);
        let percentage = if max_score == 0 {
            0
        } else {
            // Round half up, in integers.
            let scaled = u64::from(score) * 100 + u64::from(max_score) / 2;
            u32::try_from(scaled / u64::from(max_score)).unwrap_or(u32::MAX)
        };

        Self {
            score,
            max_score,
            percentage,
            tier: Tier::for_percentage(percentage),
        }
    }

    #[must_use]
    pub fn polarity(&self) -> Polarity {
        self.tier.polarity()
    }

    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Game Complete! Final Score: {}/{} ({}%) {}",
            self.score,
            self.max_score,
            self.percentage,
            self.tier.message()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_shrink_with_each_reveal() {
        assert_eq!(points_for(1), 20);
        assert_eq!(points_for(2), 15);
        assert_eq!(points_for(3), 10);
        assert_eq!(points_for(4), 5);
        assert_eq!(points_for(9), 5);
        assert_eq!(points_for(1), MAX_POINTS_PER_ROUND);
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(Tier::for_percentage(100), Tier::Excellent);
        assert_eq!(Tier::for_percentage(80), Tier::Excellent);
        assert_eq!(Tier::for_percentage(79), Tier::Good);
        assert_eq!(Tier::for_percentage(60), Tier::Good);
        assert_eq!(Tier::for_percentage(59), Tier::KeepPracticing);
        assert_eq!(Tier::for_percentage(0), Tier::KeepPracticing);
    }

    #[test]
    fn perfect_game_is_excellent() {
        let grade = FinalGrade::new(100, 5);
        assert_eq!(grade.max_score, 100);
        assert_eq!(grade.percentage, 100);
        assert_eq!(grade.tier, Tier::Excellent);
        assert_eq!(grade.polarity(), Polarity::Positive);
        assert_eq!(
            grade.message(),
            "Game Complete! Final Score: 100/100 (100%) 🏆 Excellent!"
        );
    }

    #[test]
    fn percentage_rounds_half_up() {
        // 5 / 60 = 8.33% and 10 / 80 = 12.5%
        assert_eq!(FinalGrade::new(5, 3).percentage, 8);
        assert_eq!(FinalGrade::new(10, 4).percentage, 13);
    }

    #[test]
    fn empty_game_keeps_practicing() {
        let grade = FinalGrade::new(0, 5);
        assert_eq!(grade.percentage, 0);
        assert_eq!(grade.tier, Tier::KeepPracticing);
        assert_eq!(grade.polarity(), Polarity::Negative);
    }
}
