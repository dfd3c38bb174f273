//! Application settings
//!
//! Loaded from an optional JSON file; command-line flags override individual
//! fields afterwards.

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::game::{GameConfig, PacingConfig};
use crate::spectator::DEFAULT_TURN_PROBABILITY;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub game: GameConfig,
    pub pacing: PacingConfig,

    /// Where scores are stored; `None` keeps them in memory
    pub leaderboard_path: Option<PathBuf>,
    /// Log destination for the terminal UI modes
    pub log_file: PathBuf,

    // === Spectator ===
    /// Seconds between feed refreshes
    pub feed_refresh_secs: u64,
    /// Chance per tick that a replica takes a random turn
    pub turn_probability: f64,
    /// Tick interval for replicas, in milliseconds
    pub spectator_tick_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            pacing: PacingConfig::default(),
            leaderboard_path: None,
            log_file: PathBuf::from("snake_arena.log"),
            feed_refresh_secs: 5,
            turn_probability: DEFAULT_TURN_PROBABILITY,
            spectator_tick_ms: 150,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;
        let settings: Settings = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse settings {:?}", path))?;
        settings
            .validate()
            .with_context(|| format!("Invalid settings in {:?}", path))?;
        Ok(settings)
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(path, json).with_context(|| format!("Failed to write settings to {:?}", path))
    }

    pub fn validate(&self) -> Result<()> {
        self.game.validate()?;
        self.pacing.validate()?;
        ensure!(self.feed_refresh_secs > 0, "feed_refresh_secs must be positive");
        ensure!(self.spectator_tick_ms > 0, "spectator_tick_ms must be positive");
        ensure!(
            (0.0..=1.0).contains(&self.turn_probability),
            "turn_probability must be between 0.0 and 1.0, got {}",
            self.turn_probability
        );
        Ok(())
    }

    pub fn feed_refresh(&self) -> Duration {
        Duration::from_secs(self.feed_refresh_secs)
    }

    pub fn spectator_tick(&self) -> Duration {
        Duration::from_millis(self.spectator_tick_ms)
    }
}
