use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

use super::state::BoundaryPolicy;

pub const DEFAULT_GRID_SIZE: usize = 20;
pub const MAX_GRID_SIZE: usize = 1024;
pub const INITIAL_SNAKE_LENGTH: usize = 3;
/// Points per food eaten. Not configurable.
pub const FOOD_SCORE: u32 = 10;

/// Configuration for one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square grid
    pub grid_size: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Boundary policy, fixed for the lifetime of a run
    pub policy: BoundaryPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            initial_snake_length: INITIAL_SNAKE_LENGTH,
            policy: BoundaryPolicy::Wall,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size and policy
    pub fn new(policy: BoundaryPolicy, grid_size: usize) -> Self {
        Self {
            grid_size,
            policy,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self {
            grid_size: 10,
            ..Default::default()
        }
    }

    /// The body has to fit left of the centre cell, which keeps the
    /// initial snake inside the grid for both policies.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.grid_size >= 4,
            "grid_size must be at least 4, got {}",
            self.grid_size
        );
        ensure!(
            self.grid_size <= MAX_GRID_SIZE,
            "grid_size must be at most {}, got {}",
            MAX_GRID_SIZE,
            self.grid_size
        );
        ensure!(
            (1..=self.grid_size / 2).contains(&self.initial_snake_length),
            "initial_snake_length must be between 1 and {}, got {}",
            self.grid_size / 2,
            self.initial_snake_length
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, 20);
        assert_eq!(config.initial_snake_length, 3);
        assert_eq!(config.policy, BoundaryPolicy::Wall);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(BoundaryPolicy::Wrap, 15);
        assert_eq!(config.grid_size, 15);
        assert_eq!(config.policy, BoundaryPolicy::Wrap);
        assert_eq!(config.initial_snake_length, INITIAL_SNAKE_LENGTH);
    }

    #[test]
    fn test_rejects_tiny_grid() {
        let config = GameConfig::new(BoundaryPolicy::Wall, 3);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_snake_longer_than_half_grid() {
        let config = GameConfig {
            initial_snake_length: 6,
            ..GameConfig::small()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            initial_snake_length: 0,
            ..GameConfig::small()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"policy":"wrap"}"#).unwrap();
        assert_eq!(config.policy, BoundaryPolicy::Wrap);
        assert_eq!(config.grid_size, DEFAULT_GRID_SIZE);
    }
}
