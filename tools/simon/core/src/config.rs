use thiserror::Error;

use crate::region::Extents;
use crate::sequence::MAX_SEQUENCE_CAPACITY;

/// Tunables for one game. Every duration is counted in ticks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SimonConfig {
    /// How many symbols each generated sequence holds.
    pub sequence_capacity: usize,
    /// Symbols to repeat before the first congratulation.
    pub initial_round_length: usize,
    /// Ticks playback spends in its pause phase for each flashed symbol.
    pub playback_pause_ticks: u16,
    /// Ticks the player gets per symbol before a timeout.
    pub verify_timeout_ticks: u16,
    pub game_over_delay_ticks: u16,
    pub congratulate_delay_ticks: u16,
    /// Ticks to wait for "touch to try again" before starting over.
    pub congratulate_touch_timeout_ticks: u16,
    pub extents: Extents,
    pub seed: u64,
}

impl Default for SimonConfig {
    fn default() -> Self {
        Self {
            sequence_capacity: 20,
            initial_round_length: 4,
            playback_pause_ticks: 2,
            verify_timeout_ticks: 60,
            game_over_delay_ticks: 30,
            congratulate_delay_ticks: 10,
            congratulate_touch_timeout_ticks: 50,
            extents: Extents::default(),
            seed: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("sequence capacity {0} is outside 1..={max}", max = MAX_SEQUENCE_CAPACITY)]
    Capacity(usize),
    #[error("round length {length} must be between 1 and the sequence capacity ({capacity})")]
    RoundLength { length: usize, capacity: usize },
    #[error("{0} must be at least one tick")]
    ZeroTicks(&'static str),
    #[error("panel extents {width}x{height} are too small to split into quadrants")]
    Extents { width: i16, height: i16 },
}

impl SimonConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sequence_capacity == 0 || self.sequence_capacity > MAX_SEQUENCE_CAPACITY {
            return Err(ConfigError::Capacity(self.sequence_capacity));
        }

        if self.initial_round_length == 0 || self.initial_round_length > self.sequence_capacity {
            return Err(ConfigError::RoundLength {
                length: self.initial_round_length,
                capacity: self.sequence_capacity,
            });
        }

        if self.playback_pause_ticks == 0 {
            return Err(ConfigError::ZeroTicks("playback pause"));
        }
        if self.congratulate_touch_timeout_ticks == 0 {
            return Err(ConfigError::ZeroTicks("congratulate touch timeout"));
        }

        if self.extents.width < 2 || self.extents.height < 2 {
            return Err(ConfigError::Extents {
                width: self.extents.width,
                height: self.extents.height,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(SimonConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_round_longer_than_sequence() {
        let config = SimonConfig { initial_round_length: 21, ..Default::default() };
        assert_eq!(
            config.validate(),
            Err(ConfigError::RoundLength { length: 21, capacity: 20 })
        );
    }

    #[test]
    fn rejects_oversized_capacity_and_zero_pause() {
        let config = SimonConfig { sequence_capacity: MAX_SEQUENCE_CAPACITY + 1, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigError::Capacity(MAX_SEQUENCE_CAPACITY + 1)));

        let config = SimonConfig { playback_pause_ticks: 0, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTicks("playback pause")));
    }
}
