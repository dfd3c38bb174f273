//! Core game logic module for Snake
//!
//! This module contains all the simulation rules without any I/O or rendering
//! dependencies. The interactive player loop and the spectator replica both
//! drive the same [`GameEngine`].

pub mod action;
pub mod config;
pub mod engine;
pub mod pacing;
pub mod state;

// Re-export commonly used types
pub use action::{Command, Direction};
pub use config::{DEFAULT_GRID_SIZE, FOOD_SCORE, GameConfig, INITIAL_SNAKE_LENGTH, MAX_GRID_SIZE};
pub use engine::{GameEngine, StepInfo, StepResult};
pub use pacing::PacingConfig;
pub use state::{BoundaryPolicy, CollisionType, Phase, Position, SimulationState};
