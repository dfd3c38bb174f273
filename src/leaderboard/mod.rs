//! Leaderboard collaborator
//!
//! Finished games with a non-zero score are submitted as `(score, policy)`
//! under the player's identity. Stores keep entries sorted by score,
//! highest first.

mod store;
mod submission;

pub use store::{InMemoryLeaderboard, JsonFileLeaderboard};
pub use submission::{ScoreSubmitter, SkipReason, Submission};

use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::future::Future;

use crate::game::BoundaryPolicy;

/// Default number of rows returned by [`Leaderboard::top`]
pub const DEFAULT_LIMIT: usize = 10;

/// Authenticated player on whose behalf scores are submitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerIdentity {
    pub id: String,
    pub username: String,
}

impl PlayerIdentity {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: String,
    /// Identity the score was submitted under
    #[serde(default)]
    pub player_id: String,
    pub username: String,
    pub score: u32,
    #[serde(rename = "mode")]
    pub policy: BoundaryPolicy,
    pub date: NaiveDate,
}

pub trait Leaderboard {
    /// Best entries, optionally restricted to one policy
    fn top(
        &self,
        policy: Option<BoundaryPolicy>,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<LeaderboardEntry>>> + Send;

    fn submit(
        &self,
        player: &PlayerIdentity,
        score: u32,
        policy: BoundaryPolicy,
    ) -> impl Future<Output = Result<LeaderboardEntry>> + Send;
}

fn new_entry(player: &PlayerIdentity, score: u32, policy: BoundaryPolicy) -> LeaderboardEntry {
    LeaderboardEntry {
        id: format!("{:016x}", rand::random::<u64>()),
        player_id: player.id.clone(),
        username: player.username.clone(),
        score,
        policy,
        date: chrono::Local::now().date_naive(),
    }
}

/// Insert below every entry with an equal or higher score
fn insert_sorted(entries: &mut Vec<LeaderboardEntry>, entry: LeaderboardEntry) {
    let pos = entries
        .iter()
        .position(|e| entry.score > e.score)
        .unwrap_or(entries.len());
    entries.insert(pos, entry);
}

fn select_top(
    entries: &[LeaderboardEntry],
    policy: Option<BoundaryPolicy>,
    limit: usize,
) -> Vec<LeaderboardEntry> {
    entries
        .iter()
        .filter(|e| policy.is_none_or(|p| e.policy == p))
        .take(limit)
        .cloned()
        .collect()
}
