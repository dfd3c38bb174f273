//! Spectator replicas of other players' games
//!
//! A replica is built from a feed snapshot and then advanced locally with the
//! same [`GameEngine`] the player loop uses. Between feed refreshes the view
//! is an approximation: the replica does not know the remote player's input,
//! so it either keeps going straight or, with an [`Autopilot`], takes an
//! occasional random turn. Every refresh replaces the replica state with the
//! latest snapshot.

mod autopilot;

pub use autopilot::{Autopilot, DEFAULT_TURN_PROBABILITY};

use anyhow::{Result, ensure};
use std::collections::HashSet;

use crate::feed::ActivePlayer;
use crate::game::{GameConfig, GameEngine, SimulationState, StepInfo};

pub struct SpectatorReplica {
    player_id: String,
    username: String,
    engine: GameEngine,
    state: SimulationState,
    autopilot: Option<Autopilot>,
    steps_since_sync: u64,
}

impl SpectatorReplica {
    /// Build a replica from a snapshot. Snapshots come from outside the
    /// process, so they are checked against the grid first.
    pub fn from_snapshot(snapshot: &ActivePlayer, grid_size: usize, seed: Option<u64>) -> Result<Self> {
        let state = Self::state_from_snapshot(snapshot, grid_size)?;
        let config = GameConfig::new(snapshot.policy, grid_size);
        let engine = match seed {
            Some(seed) => GameEngine::seeded(config, seed),
            None => GameEngine::new(config),
        };

        Ok(Self {
            player_id: snapshot.id.clone(),
            username: snapshot.username.clone(),
            engine,
            state,
            autopilot: None,
            steps_since_sync: 0,
        })
    }

    pub fn with_autopilot(mut self, autopilot: Autopilot) -> Self {
        self.autopilot = Some(autopilot);
        self
    }

    fn state_from_snapshot(snapshot: &ActivePlayer, grid_size: usize) -> Result<SimulationState> {
        ensure!(
            !snapshot.snake.is_empty(),
            "snapshot for {} has an empty body",
            snapshot.id
        );

        let state = SimulationState::from_parts(
            snapshot.snake.clone(),
            snapshot.food,
            snapshot.direction,
            snapshot.score,
            snapshot.policy,
            grid_size,
        );

        let out_of_grid = state
            .body
            .iter()
            .chain(std::iter::once(&state.food))
            .find(|pos| !state.is_in_bounds(**pos));
        if let Some(pos) = out_of_grid {
            anyhow::bail!(
                "snapshot for {} has cell ({}, {}) outside a {}x{} grid",
                snapshot.id,
                pos.x,
                pos.y,
                grid_size,
                grid_size
            );
        }

        ensure!(
            !state.is_occupied_by_snake(state.food),
            "snapshot for {} has food on the body",
            snapshot.id
        );

        let mut seen = HashSet::with_capacity(state.body.len());
        ensure!(
            state.body.iter().all(|pos| seen.insert(*pos)),
            "snapshot for {} has overlapping body cells",
            snapshot.id
        );

        Ok(state)
    }

    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Local steps taken since the last snapshot
    pub fn steps_since_sync(&self) -> u64 {
        self.steps_since_sync
    }

    /// Replace the local state with a fresher snapshot of the same player
    pub fn resync(&mut self, snapshot: &ActivePlayer) -> Result<()> {
        ensure!(
            snapshot.id == self.player_id,
            "snapshot for {} cannot resync replica of {}",
            snapshot.id,
            self.player_id
        );

        self.state = Self::state_from_snapshot(snapshot, self.state.grid_size)?;
        self.username = snapshot.username.clone();
        self.steps_since_sync = 0;
        Ok(())
    }

    /// Advance the replica by one tick
    pub fn advance(&mut self) -> StepInfo {
        if self.state.terminal {
            return StepInfo::default();
        }

        let mut state = self.state.clone();
        if let Some(autopilot) = self.autopilot.as_mut()
            && let Some(direction) = autopilot.choose(state.direction)
        {
            state = self.engine.request_direction(state, direction);
        }

        let result = self.engine.step(state);
        if let Some(collision) = result.info.collision {
            log::debug!(
                "Replica of {} ended with {:?} after {} local steps",
                self.player_id,
                collision,
                self.steps_since_sync
            );
        }

        self.state = result.state;
        self.steps_since_sync += 1;
        result.info
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{BoundaryPolicy, CollisionType, Direction, Position};

    fn snapshot(policy: BoundaryPolicy, head_x: i32) -> ActivePlayer {
        ActivePlayer {
            id: "p1".to_string(),
            username: "Watched".to_string(),
            score: 50,
            policy,
            snake: vec![
                Position::new(head_x, 10),
                Position::new(head_x - 1, 10),
                Position::new(head_x - 2, 10),
            ],
            food: Position::new(0, 0),
            direction: Direction::Right,
        }
    }

    #[test]
    fn test_replica_mirrors_snapshot() {
        let replica = SpectatorReplica::from_snapshot(&snapshot(BoundaryPolicy::Wall, 5), 20, Some(1)).unwrap();
        let state = replica.state();

        assert_eq!(state.head(), Position::new(5, 10));
        assert_eq!(state.score, 50);
        assert_eq!(state.queued_direction, Direction::Right);
        assert!(!state.terminal);
        assert_eq!(replica.username(), "Watched");
    }

    #[test]
    fn test_rejects_invalid_snapshots() {
        let mut empty = snapshot(BoundaryPolicy::Wall, 5);
        empty.snake.clear();
        assert!(SpectatorReplica::from_snapshot(&empty, 20, None).is_err());

        let outside = snapshot(BoundaryPolicy::Wrap, 25);
        assert!(SpectatorReplica::from_snapshot(&outside, 20, None).is_err());

        let mut bad_food = snapshot(BoundaryPolicy::Wall, 5);
        bad_food.food = Position::new(-1, 3);
        assert!(SpectatorReplica::from_snapshot(&bad_food, 20, None).is_err());

        let mut food_on_body = snapshot(BoundaryPolicy::Wall, 5);
        food_on_body.food = Position::new(4, 10);
        assert!(SpectatorReplica::from_snapshot(&food_on_body, 20, None).is_err());

        let mut overlapping = snapshot(BoundaryPolicy::Wrap, 5);
        overlapping.snake.push(Position::new(4, 10));
        assert!(SpectatorReplica::from_snapshot(&overlapping, 20, None).is_err());
    }

    #[test]
    fn test_advance_uses_engine_rules() {
        let mut replica = SpectatorReplica::from_snapshot(&snapshot(BoundaryPolicy::Wrap, 19), 20, Some(1)).unwrap();

        let info = replica.advance();

        assert_eq!(info.collision, None);
        assert_eq!(replica.state().head(), Position::new(0, 10));
        assert_eq!(replica.steps_since_sync(), 1);
    }

    #[test]
    fn test_wall_replica_freezes_until_resync() {
        let source = snapshot(BoundaryPolicy::Wall, 19);
        let mut replica = SpectatorReplica::from_snapshot(&source, 20, Some(1)).unwrap();

        let info = replica.advance();
        assert_eq!(info.collision, Some(CollisionType::Wall));
        assert!(replica.state().terminal);

        let frozen = replica.state().clone();
        replica.advance();
        assert_eq!(replica.state(), &frozen);

        replica.resync(&snapshot(BoundaryPolicy::Wall, 8)).unwrap();
        assert!(!replica.state().terminal);
        assert_eq!(replica.state().head(), Position::new(8, 10));
        assert_eq!(replica.steps_since_sync(), 0);
    }

    #[test]
    fn test_resync_rejects_other_player() {
        let mut replica = SpectatorReplica::from_snapshot(&snapshot(BoundaryPolicy::Wall, 5), 20, None).unwrap();
        let mut other = snapshot(BoundaryPolicy::Wall, 5);
        other.id = "p2".to_string();

        assert!(replica.resync(&other).is_err());
    }

    #[test]
    fn test_autopilot_replica_never_reverses() {
        let mut replica = SpectatorReplica::from_snapshot(&snapshot(BoundaryPolicy::Wrap, 5), 20, Some(9))
            .unwrap()
            .with_autopilot(Autopilot::seeded(1.0, 9));

        for _ in 0..50 {
            let before = replica.state().direction;
            replica.advance();
            let state = replica.state();
            if state.terminal {
                break;
            }
            assert!(!state.direction.is_opposite(before));
        }
    }
}
