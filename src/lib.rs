//! Snake Arena - a deterministic single-snake grid game
//!
//! This library provides:
//! - Core simulation: state, boundary policies, food, scoring (game module)
//! - Tick scheduling and score-based pacing (scheduler, game::pacing)
//! - Spectator replicas of other players' games (feed, spectator)
//! - Score submission and storage (leaderboard)
//! - TUI rendering and the play/spectate/leaderboard modes

pub mod feed;
pub mod game;
pub mod input;
pub mod leaderboard;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod scheduler;
pub mod settings;
pub mod spectator;
