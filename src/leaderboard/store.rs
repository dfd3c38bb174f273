use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::PathBuf;
use tokio::sync::Mutex;

use super::{Leaderboard, LeaderboardEntry, PlayerIdentity, insert_sorted, new_entry, select_top};
use crate::game::BoundaryPolicy;

/// Process-local leaderboard
#[derive(Debug, Default)]
pub struct InMemoryLeaderboard {
    entries: Mutex<Vec<LeaderboardEntry>>,
}

impl InMemoryLeaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeded with a handful of scores so a fresh board is not empty
    pub fn with_demo_entries() -> Self {
        let seed = [
            ("SnakeMaster", 2450, BoundaryPolicy::Wall, 10),
            ("PixelPro", 2100, BoundaryPolicy::Wrap, 10),
            ("RetroGamer", 1890, BoundaryPolicy::Wall, 9),
            ("NeonNinja", 1650, BoundaryPolicy::Wrap, 9),
            ("ArcadeKing", 1420, BoundaryPolicy::Wall, 8),
        ];

        let entries = seed
            .iter()
            .enumerate()
            .map(|(i, (username, score, policy, day))| LeaderboardEntry {
                id: (i + 1).to_string(),
                player_id: format!("demo-{}", i + 1),
                username: username.to_string(),
                score: *score,
                policy: *policy,
                date: NaiveDate::from_ymd_opt(2024, 12, *day).unwrap_or_default(),
            })
            .collect();

        Self {
            entries: Mutex::new(entries),
        }
    }
}

impl Leaderboard for InMemoryLeaderboard {
    async fn top(&self, policy: Option<BoundaryPolicy>, limit: usize) -> Result<Vec<LeaderboardEntry>> {
        let entries = self.entries.lock().await;
        Ok(select_top(&entries, policy, limit))
    }

    async fn submit(
        &self,
        player: &PlayerIdentity,
        score: u32,
        policy: BoundaryPolicy,
    ) -> Result<LeaderboardEntry> {
        let entry = new_entry(player, score, policy);
        insert_sorted(&mut *self.entries.lock().await, entry.clone());
        Ok(entry)
    }
}

/// Leaderboard persisted as a JSON array.
///
/// The whole file is rewritten on every submission; the lock serializes
/// writers inside this process.
#[derive(Debug)]
pub struct JsonFileLeaderboard {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileLeaderboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<Vec<LeaderboardEntry>> {
        let json = match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to read leaderboard from {:?}", self.path));
            }
        };

        let mut entries: Vec<LeaderboardEntry> = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse leaderboard {:?}", self.path))?;
        // Hand-edited files may be out of order
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(entries)
    }

    async fn save(&self, entries: &[LeaderboardEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(entries).context("Failed to serialize leaderboard")?;
        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("Failed to write leaderboard to {:?}", self.path))
    }
}

impl Leaderboard for JsonFileLeaderboard {
    async fn top(&self, policy: Option<BoundaryPolicy>, limit: usize) -> Result<Vec<LeaderboardEntry>> {
        let _guard = self.lock.lock().await;
        let entries = self.load().await?;
        Ok(select_top(&entries, policy, limit))
    }

    async fn submit(
        &self,
        player: &PlayerIdentity,
        score: u32,
        policy: BoundaryPolicy,
    ) -> Result<LeaderboardEntry> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        let entry = new_entry(player, score, policy);
        insert_sorted(&mut entries, entry.clone());
        self.save(&entries).await?;
        log::info!(
            "Recorded {} for {} ({}) in {:?}",
            score,
            player.username,
            policy.as_str(),
            self.path
        );
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn player() -> PlayerIdentity {
        PlayerIdentity::new("user-demo", "demo")
    }

    #[tokio::test]
    async fn test_in_memory_submit_and_top() {
        let board = InMemoryLeaderboard::new();
        board.submit(&player(), 40, BoundaryPolicy::Wall).await.unwrap();
        board.submit(&player(), 90, BoundaryPolicy::Wrap).await.unwrap();
        board.submit(&player(), 60, BoundaryPolicy::Wall).await.unwrap();

        let all = board.top(None, 10).await.unwrap();
        let scores: Vec<u32> = all.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![90, 60, 40]);

        let walls = board.top(Some(BoundaryPolicy::Wall), 1).await.unwrap();
        assert_eq!(walls.len(), 1);
        assert_eq!(walls[0].score, 60);
    }

    #[tokio::test]
    async fn test_demo_entries() {
        let board = InMemoryLeaderboard::with_demo_entries();
        let top = board.top(None, 3).await.unwrap();

        assert_eq!(top.len(), 3);
        assert_eq!(top[0].username, "SnakeMaster");
        assert_eq!(top[0].score, 2450);
    }

    #[tokio::test]
    async fn test_json_file_missing_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let board = JsonFileLeaderboard::new(temp_dir.path().join("missing.json"));

        assert!(board.top(None, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_json_file_persists_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("scores.json");

        let board = JsonFileLeaderboard::new(&path);
        board.submit(&player(), 30, BoundaryPolicy::Wall).await.unwrap();
        board.submit(&player(), 70, BoundaryPolicy::Wall).await.unwrap();

        let reopened = JsonFileLeaderboard::new(&path);
        let entries = reopened.top(Some(BoundaryPolicy::Wall), 10).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].score, 70);
        assert_eq!(entries[0].username, "demo");
        assert_eq!(entries[0].player_id, "user-demo");
    }

    #[tokio::test]
    async fn test_json_file_rejects_garbage() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("scores.json");
        std::fs::write(&path, "not json").unwrap();

        let board = JsonFileLeaderboard::new(&path);
        assert!(board.top(None, 10).await.is_err());
        assert!(board.submit(&player(), 10, BoundaryPolicy::Wall).await.is_err());
    }
}
