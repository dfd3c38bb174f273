use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tick cadence for the interactive loop: the game speeds up as the score
/// grows, down to a floor. The engine itself accepts ticks at any rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Interval at score 0
    pub base_ms: u64,
    /// Fastest allowed interval
    pub min_ms: u64,
    /// Speed-up applied per level
    pub decrement_ms: u64,
    /// Points needed per level
    pub points_per_level: u32,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            base_ms: 150,
            min_ms: 50,
            decrement_ms: 10,
            points_per_level: 50,
        }
    }
}

impl PacingConfig {
    /// Interval between ticks for the given score
    pub fn tick_interval(&self, score: u32) -> Duration {
        let level = u64::from(score / self.points_per_level.max(1));
        let ms = self
            .base_ms
            .saturating_sub(level.saturating_mul(self.decrement_ms))
            .max(self.min_ms);
        Duration::from_millis(ms)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.min_ms > 0, "pacing min_ms must be positive");
        ensure!(
            self.min_ms <= self.base_ms,
            "pacing min_ms ({}) must not exceed base_ms ({})",
            self.min_ms,
            self.base_ms
        );
        ensure!(
            self.points_per_level > 0,
            "pacing points_per_level must be positive"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cadence() {
        let pacing = PacingConfig::default();
        assert_eq!(pacing.tick_interval(0), Duration::from_millis(150));
        assert_eq!(pacing.tick_interval(40), Duration::from_millis(150));
        assert_eq!(pacing.tick_interval(50), Duration::from_millis(140));
        assert_eq!(pacing.tick_interval(490), Duration::from_millis(60));
        assert_eq!(pacing.tick_interval(500), Duration::from_millis(50));
    }

    #[test]
    fn test_floor_holds_for_large_scores() {
        let pacing = PacingConfig::default();
        assert_eq!(pacing.tick_interval(10_000), Duration::from_millis(50));
        assert_eq!(pacing.tick_interval(u32::MAX), Duration::from_millis(50));
    }

    #[test]
    fn test_validation() {
        assert!(PacingConfig::default().validate().is_ok());

        let inverted = PacingConfig {
            min_ms: 200,
            ..Default::default()
        };
        assert!(inverted.validate().is_err());

        let zero = PacingConfig {
            min_ms: 0,
            ..Default::default()
        };
        assert!(zero.validate().is_err());
    }
}
