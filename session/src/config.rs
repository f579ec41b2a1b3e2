//! Session configuration.

use std::time::Duration;

use playstep_system_movement::MovementConfig;
use playstep_system_snake::{SnakeConfig, SnakeError};
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_SEED: u64 = 0x7a3c_91d2_4be8_105f;
const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

/// Tuning for a tutorial session. Every field falls back to its default.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seed of the master random stream that seeds each snake game.
    pub seed: u64,
    /// Tick interval of the movement sandbox in milliseconds.
    pub frame_interval_ms: u64,
    /// Movement sandbox tuning.
    pub movement: MovementConfig,
    /// Snake game tuning.
    pub snake: SnakeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            movement: MovementConfig::default(),
            snake: SnakeConfig::default(),
        }
    }
}

impl Config {
    /// Checks every section for values the simulations cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_interval_ms == 0 {
            return Err(ConfigError::ZeroFrameInterval);
        }

        let movement = &self.movement;
        if movement.player_size <= 0.0 {
            return Err(ConfigError::InvalidPlayerSize {
                size: movement.player_size,
            });
        }
        let min = movement.min_bound();
        let max = movement.max_bound();
        if min.x > max.x || min.y > max.y {
            return Err(ConfigError::PlayerDoesNotFit {
                size: movement.player_size,
                inset: movement.inset,
            });
        }

        self.snake.validate()?;
        Ok(())
    }

    /// Tick interval of the movement sandbox.
    #[must_use]
    pub const fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

/// Reasons a [`Config`] is rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// The movement sandbox needs a positive tick interval.
    #[error("frame interval must be positive")]
    ZeroFrameInterval,
    /// The player must have a positive size.
    #[error("player size must be positive (received {size})")]
    InvalidPlayerSize {
        /// Rejected size.
        size: f32,
    },
    /// The player does not fit between the inset boundaries.
    #[error("a {size} unit player does not fit inside the field with a {inset} unit inset")]
    PlayerDoesNotFit {
        /// Configured player size.
        size: f32,
        /// Configured inset.
        inset: f32,
    },
    /// The snake section is invalid.
    #[error("invalid snake configuration: {0}")]
    Snake(#[from] SnakeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(Config::default().validate(), Ok(()));
        assert_eq!(
            Config::default().frame_interval(),
            Duration::from_millis(16)
        );
    }

    #[test]
    fn zero_frame_interval_is_rejected() {
        let config = Config {
            frame_interval_ms: 0,
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroFrameInterval));
    }

    #[test]
    fn oversized_player_is_rejected() {
        let mut config = Config::default();
        config.movement.player_size = 390.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PlayerDoesNotFit { .. })
        ));
    }

    #[test]
    fn snake_errors_are_wrapped() {
        let mut config = Config::default();
        config.snake.cell_size = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::Snake(SnakeError::InvalidCellSize { cell_size: 0 }))
        );
    }
}
