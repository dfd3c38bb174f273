use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::game::Direction;

/// Probability of a turn per tick used by the spectator view
pub const DEFAULT_TURN_PROBABILITY: f64 = 0.2;

/// Random-turn heuristic standing in for the remote player's input.
///
/// On each tick it turns with `turn_probability`, picking uniformly among the
/// directions that are not a reversal (the current direction included).
pub struct Autopilot {
    turn_probability: f64,
    rng: StdRng,
}

impl Autopilot {
    pub fn new(turn_probability: f64) -> Self {
        Self::with_rng(turn_probability, StdRng::from_entropy())
    }

    /// Deterministic autopilot for reproducible replicas
    pub fn seeded(turn_probability: f64, seed: u64) -> Self {
        Self::with_rng(turn_probability, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(turn_probability: f64, rng: StdRng) -> Self {
        Self {
            turn_probability: turn_probability.clamp(0.0, 1.0),
            rng,
        }
    }

    pub fn turn_probability(&self) -> f64 {
        self.turn_probability
    }

    pub fn choose(&mut self, current: Direction) -> Option<Direction> {
        if !self.rng.gen_bool(self.turn_probability) {
            return None;
        }

        let candidates: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|d| !d.is_opposite(current))
            .collect();
        candidates.choose(&mut self.rng).copied()
    }
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(DEFAULT_TURN_PROBABILITY)
    }
}
