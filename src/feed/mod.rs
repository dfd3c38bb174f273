//! Active player feed
//!
//! The feed supplies raw snapshots of other players' games. Spectators build
//! a local replica from a snapshot and advance it with the shared engine.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::PathBuf;

use crate::game::{BoundaryPolicy, Direction, Position};

/// Snapshot of a player currently in a game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivePlayer {
    pub id: String,
    pub username: String,
    pub score: u32,
    #[serde(rename = "mode")]
    pub policy: BoundaryPolicy,
    /// Body cells, head first
    pub snake: Vec<Position>,
    pub food: Position,
    pub direction: Direction,
}

pub trait ActivePlayerFeed {
    fn active_players(&self) -> impl Future<Output = Result<Vec<ActivePlayer>>> + Send;

    fn player(&self, id: &str) -> impl Future<Output = Result<Option<ActivePlayer>>> + Send;
}

/// In-memory feed with a fixed set of players
#[derive(Debug, Clone, Default)]
pub struct DemoFeed {
    players: Vec<ActivePlayer>,
}

impl DemoFeed {
    pub fn with_players(players: Vec<ActivePlayer>) -> Self {
        Self { players }
    }

    /// A few players spread over a 20x20 grid
    pub fn demo() -> Self {
        fn row(head_x: i32, y: i32, len: i32) -> Vec<Position> {
            (0..len).map(|i| Position::new(head_x - i, y)).collect()
        }

        Self::with_players(vec![
            ActivePlayer {
                id: "player-1".to_string(),
                username: "SnakeMaster".to_string(),
                score: 120,
                policy: BoundaryPolicy::Wall,
                snake: row(10, 4, 6),
                food: Position::new(15, 4),
                direction: Direction::Right,
            },
            ActivePlayer {
                id: "player-2".to_string(),
                username: "PixelPro".to_string(),
                score: 80,
                policy: BoundaryPolicy::Wrap,
                snake: vec![
                    Position::new(5, 12),
                    Position::new(5, 13),
                    Position::new(5, 14),
                    Position::new(5, 15),
                    Position::new(5, 16),
                ],
                food: Position::new(5, 3),
                direction: Direction::Up,
            },
            ActivePlayer {
                id: "player-3".to_string(),
                username: "NeonNinja".to_string(),
                score: 30,
                policy: BoundaryPolicy::Wrap,
                snake: row(17, 16, 4),
                food: Position::new(2, 16),
                direction: Direction::Right,
            },
        ])
    }
}

impl ActivePlayerFeed for DemoFeed {
    async fn active_players(&self) -> Result<Vec<ActivePlayer>> {
        Ok(self.players.clone())
    }

    async fn player(&self, id: &str) -> Result<Option<ActivePlayer>> {
        Ok(self.players.iter().find(|p| p.id == id).cloned())
    }
}

/// Feed backed by a JSON array of snapshots, re-read on every request so an
/// external writer can keep it current.
#[derive(Debug, Clone)]
pub struct JsonFileFeed {
    path: PathBuf,
}

impl JsonFileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read(&self) -> Result<Vec<ActivePlayer>> {
        let json = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read feed from {:?}", self.path))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse feed {:?}", self.path))
    }
}

impl ActivePlayerFeed for JsonFileFeed {
    async fn active_players(&self) -> Result<Vec<ActivePlayer>> {
        self.read().await
    }

    async fn player(&self, id: &str) -> Result<Option<ActivePlayer>> {
        Ok(self.read().await?.into_iter().find(|p| p.id == id))
    }
}
