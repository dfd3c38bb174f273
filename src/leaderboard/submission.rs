use super::{Leaderboard, LeaderboardEntry, PlayerIdentity};
use crate::game::SimulationState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The game is still running
    NotTerminal,
    ZeroScore,
    /// No authenticated player
    Anonymous,
}

/// Outcome of a submission attempt. Store failures are reported here and
/// never reach the simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Submitted(LeaderboardEntry),
    Skipped(SkipReason),
    Failed(String),
}

/// Submits finished games on behalf of the current player
pub struct ScoreSubmitter<L> {
    store: L,
    identity: Option<PlayerIdentity>,
}

impl<L: Leaderboard> ScoreSubmitter<L> {
    pub fn new(store: L, identity: Option<PlayerIdentity>) -> Self {
        Self { store, identity }
    }

    pub fn store(&self) -> &L {
        &self.store
    }

    pub async fn on_game_over(&self, state: &SimulationState) -> Submission {
        if !state.terminal {
            return Submission::Skipped(SkipReason::NotTerminal);
        }
        if state.score == 0 {
            return Submission::Skipped(SkipReason::ZeroScore);
        }
        let Some(identity) = self.identity.as_ref() else {
            log::info!("Score {} not submitted: not signed in", state.score);
            return Submission::Skipped(SkipReason::Anonymous);
        };

        match self.store.submit(identity, state.score, state.policy).await {
            Ok(entry) => {
                log::info!(
                    "Submitted score {} ({}) for {}",
                    entry.score,
                    entry.policy.as_str(),
                    identity.username
                );
                Submission::Submitted(entry)
            }
            Err(err) => {
                log::warn!("Failed to submit score {}: {:#}", state.score, err);
                Submission::Failed(format!("{:#}", err))
            }
        }
    }
}
