use anyhow::Result;
use std::io::Write;

use crate::game::BoundaryPolicy;
use crate::leaderboard::{Leaderboard, LeaderboardEntry};

/// Print the best scores as a plain table
pub async fn print_leaderboard<L: Leaderboard>(
    store: &L,
    policy: Option<BoundaryPolicy>,
    limit: usize,
    out: &mut impl Write,
) -> Result<()> {
    let entries = store.top(policy, limit).await?;
    let title = match policy {
        Some(policy) => format!("Top {} ({})", limit, policy.as_str()),
        None => format!("Top {}", limit),
    };
    writeln!(out, "{}", title)?;

    if entries.is_empty() {
        writeln!(out, "No scores yet")?;
        return Ok(());
    }

    writeln!(out, "{:>4}  {:<16} {:>6}  {:<12} {}", "#", "Player", "Score", "Mode", "Date")?;
    for (rank, entry) in entries.iter().enumerate() {
        writeln!(out, "{}", format_row(rank + 1, entry))?;
    }
    Ok(())
}

fn format_row(rank: usize, entry: &LeaderboardEntry) -> String {
    format!(
        "{:>4}  {:<16} {:>6}  {:<12} {}",
        rank,
        entry.username,
        entry.score,
        entry.policy.as_str(),
        entry.date.format("%Y-%m-%d")
    )
}
