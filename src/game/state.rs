use serde::{Deserialize, Serialize};

use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Reduce both coordinates into `[0, grid_size)`
    pub fn wrapped(&self, grid_size: usize) -> Self {
        let size = grid_size as i32;
        Self {
            x: self.x.rem_euclid(size),
            y: self.y.rem_euclid(size),
        }
    }
}

/// What happens when the head would leave the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BoundaryPolicy {
    /// Coordinates are taken modulo the grid size
    #[serde(rename = "pass-through", alias = "wrap")]
    Wrap,
    /// Leaving the grid ends the game
    #[default]
    #[serde(rename = "walls", alias = "wall")]
    Wall,
}

impl BoundaryPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryPolicy::Wrap => "Pass-Through",
            BoundaryPolicy::Wall => "Walls",
        }
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Coarse lifecycle phase derived from the flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Paused,
    Terminal,
}

/// Complete state of one snake's grid world.
///
/// Owned by exactly one driving loop and replaced wholesale by every
/// transition of [`GameEngine`](super::GameEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    pub food: Position,
    /// Direction applied on the last step
    pub direction: Direction,
    /// Direction that the next step will apply
    pub queued_direction: Direction,
    pub score: u32,
    pub terminal: bool,
    pub paused: bool,
    pub policy: BoundaryPolicy,
    pub grid_size: usize,
}

impl SimulationState {
    /// Build a running state from raw parts.
    ///
    /// The caller is responsible for the body being non-empty; the engine
    /// and the spectator replica both check this before calling.
    pub fn from_parts(
        body: Vec<Position>,
        food: Position,
        direction: Direction,
        score: u32,
        policy: BoundaryPolicy,
        grid_size: usize,
    ) -> Self {
        Self {
            body,
            food,
            direction,
            queued_direction: direction,
            score,
            terminal: false,
            paused: false,
            policy,
            grid_size,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        let size = self.grid_size as i32;
        pos.x >= 0 && pos.x < size && pos.y >= 0 && pos.y < size
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    pub fn phase(&self) -> Phase {
        if self.terminal {
            Phase::Terminal
        } else if self.paused {
            Phase::Paused
        } else {
            Phase::Running
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> SimulationState {
        SimulationState::from_parts(
            vec![Position::new(5, 5), Position::new(4, 5), Position::new(3, 5)],
            Position::new(10, 10),
            Direction::Right,
            0,
            BoundaryPolicy::Wall,
            20,
        )
    }

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(5, 6));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn test_position_wrapping() {
        assert_eq!(Position::new(-1, 0).wrapped(20), Position::new(19, 0));
        assert_eq!(Position::new(20, 19).wrapped(20), Position::new(0, 19));
        assert_eq!(Position::new(7, -1).wrapped(20), Position::new(7, 19));
        assert_eq!(Position::new(3, 4).wrapped(20), Position::new(3, 4));
    }

    #[test]
    fn test_from_parts_queues_current_direction() {
        let state = sample_state();
        assert_eq!(state.queued_direction, Direction::Right);
        assert_eq!(state.head(), Position::new(5, 5));
        assert_eq!(state.tail(), Position::new(3, 5));
        assert_eq!(state.phase(), Phase::Running);
    }

    #[test]
    fn test_bounds_checking() {
        let state = sample_state();
        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(19, 19)));
        assert!(!state.is_in_bounds(Position::new(-1, 0)));
        assert!(!state.is_in_bounds(Position::new(20, 0)));
        assert!(!state.is_in_bounds(Position::new(0, 20)));
    }

    #[test]
    fn test_phase_prefers_terminal() {
        let mut state = sample_state();
        state.paused = true;
        assert_eq!(state.phase(), Phase::Paused);
        state.terminal = true;
        assert_eq!(state.phase(), Phase::Terminal);
    }

    #[test]
    fn test_policy_wire_names() {
        let json = serde_json::to_string(&BoundaryPolicy::Wrap).unwrap();
        assert_eq!(json, "\"pass-through\"");
        let policy: BoundaryPolicy = serde_json::from_str("\"walls\"").unwrap();
        assert_eq!(policy, BoundaryPolicy::Wall);
        let policy: BoundaryPolicy = serde_json::from_str("\"wrap\"").unwrap();
        assert_eq!(policy, BoundaryPolicy::Wrap);
    }
}
