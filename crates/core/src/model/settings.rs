use std::time::Duration;

use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("total rounds must be > 0")]
    InvalidTotalRounds,

    #[error("retry cooldown must be at most 60000 ms")]
    InvalidRetryCooldown,

    #[error("game over delay must be at most 60000 ms")]
    InvalidGameOverDelay,
}

const MAX_DELAY_MS: u32 = 60_000;

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Tunables for a single game.
///
/// Attempts per round and the reveal order are fixed by the board layout and are
/// not configurable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSettings {
    total_rounds: u32,
    retry_cooldown_ms: u32,
    game_over_delay_ms: u32,
}

impl GameSettings {
    /// Creates validated settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidTotalRounds` for zero rounds, or a delay error
    /// when a delay exceeds one minute.
    pub fn new(
        total_rounds: u32,
        retry_cooldown_ms: u32,
        game_over_delay_ms: u32,
    ) -> Result<Self, SettingsError> {
        if total_rounds == 0 {
            return Err(SettingsError::InvalidTotalRounds);
        }
        if retry_cooldown_ms > MAX_DELAY_MS {
            return Err(SettingsError::InvalidRetryCooldown);
        }
        if game_over_delay_ms > MAX_DELAY_MS {
            return Err(SettingsError::InvalidGameOverDelay);
        }

        Ok(Self {
            total_rounds,
            retry_cooldown_ms,
            game_over_delay_ms,
        })
    }

    /// Same settings with a different round count.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidTotalRounds` for zero rounds.
    pub fn with_total_rounds(self, total_rounds: u32) -> Result<Self, SettingsError> {
        Self::new(total_rounds, self.retry_cooldown_ms, self.game_over_delay_ms)
    }

    #[must_use]
    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    /// Pause after a wrong guess before choices are accepted again.
    #[must_use]
    pub fn retry_cooldown(&self) -> Duration {
        Duration::from_millis(u64::from(self.retry_cooldown_ms))
    }

    /// Pause between resolving the last round and announcing the final score.
    #[must_use]
    pub fn game_over_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.game_over_delay_ms))
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            total_rounds: 5,
            retry_cooldown_ms: 1_500,
            game_over_delay_ms: 2_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_game() {
        let settings = GameSettings::default();
        assert_eq!(settings.total_rounds(), 5);
        assert_eq!(settings.retry_cooldown(), Duration::from_millis(1_500));
        assert_eq!(settings.game_over_delay(), Duration::from_secs(2));
    }

    #[test]
    fn zero_rounds_rejected() {
        assert_eq!(
            GameSettings::new(0, 0, 0).unwrap_err(),
            SettingsError::InvalidTotalRounds
        );
    }

    #[test]
    fn long_delays_rejected() {
        assert_eq!(
            GameSettings::new(5, 60_001, 0).unwrap_err(),
            SettingsError::InvalidRetryCooldown
        );
        assert_eq!(
            GameSettings::new(5, 0, 60_001).unwrap_err(),
            SettingsError::InvalidGameOverDelay
        );
    }

    #[test]
    fn with_total_rounds_keeps_delays() {
        let settings = GameSettings::default().with_total_rounds(3).unwrap();
        assert_eq!(settings.total_rounds(), 3);
        assert_eq!(settings.retry_cooldown(), Duration::from_millis(1_500));
    }
}
