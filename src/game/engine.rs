use super::{
    action::{Command, Direction},
    config::{FOOD_SCORE, GameConfig, MAX_GRID_SIZE},
    state::{BoundaryPolicy, CollisionType, Position, SimulationState},
};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

/// Information about a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Set only on the step that ended the game
    pub collision: Option<CollisionType>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// The state after the step
    pub state: SimulationState,
    /// Additional information about the step
    pub info: StepInfo,
}

/// The game engine that handles all game logic.
///
/// Every transition takes a [`SimulationState`] by value and hands back its
/// replacement. The engine itself only carries the configuration and the
/// random source used for food placement, so each driving loop owns its own
/// engine and nothing is shared between simulations.
pub struct GameEngine<R: Rng = StdRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create a new game engine seeded from system entropy
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a deterministic engine, used by tests and replays
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    /// Start a run with the configured policy and grid size
    pub fn reset(&mut self) -> SimulationState {
        self.initialize(self.config.policy, self.config.grid_size)
    }

    /// Build a fresh state: body centred on the grid heading right,
    /// food placed off the body, score 0.
    ///
    /// `grid_size` is clamped to `1..=MAX_GRID_SIZE` and the body is
    /// shortened to fit between the left edge and the centre, so every
    /// cell is on the grid even for sizes `validate` would reject.
    pub fn initialize(&mut self, policy: BoundaryPolicy, grid_size: usize) -> SimulationState {
        let grid_size = grid_size.clamp(1, MAX_GRID_SIZE);
        let center = (grid_size / 2) as i32;
        let direction = Direction::Right;
        let (dx, dy) = direction.delta();
        let length = self.config.initial_snake_length.clamp(1, grid_size / 2 + 1);

        let body: Vec<Position> = (0..length as i32)
            .map(|i| Position::new(center - dx * i, center - dy * i))
            .collect();

        let food = self.place_food(&body, grid_size);

        SimulationState::from_parts(body, food, direction, 0, policy, grid_size)
    }

    /// Queue a direction for the next step. Reversals are dropped.
    pub fn request_direction(
        &self,
        mut state: SimulationState,
        direction: Direction,
    ) -> SimulationState {
        if state.terminal || state.direction.is_opposite(direction) {
            return state;
        }

        state.queued_direction = direction;
        state
    }

    pub fn toggle_pause(&self, mut state: SimulationState) -> SimulationState {
        if !state.terminal {
            state.paused = !state.paused;
        }
        state
    }

    /// Dispatch an input command
    pub fn apply(&mut self, state: SimulationState, command: Command) -> SimulationState {
        match command {
            Command::Turn(direction) => self.request_direction(state, direction),
            Command::TogglePause => self.toggle_pause(state),
            Command::Restart => {
                log::debug!("Restarting {:?} run", state.policy);
                self.initialize(state.policy, state.grid_size)
            }
        }
    }

    /// Execute one step of the game
    pub fn step(&mut self, mut state: SimulationState) -> StepResult {
        if state.terminal || state.paused {
            return StepResult {
                state,
                info: StepInfo::default(),
            };
        }

        let direction = state.queued_direction;
        let mut new_head = state.head().moved_in_direction(direction);

        if state.policy == BoundaryPolicy::Wrap {
            new_head = new_head.wrapped(state.grid_size);
        }

        // The full current body counts, tail included
        if let Some(collision) = self.check_collision(&state, new_head) {
            log::debug!(
                "{:?} at ({}, {}) with score {}",
                collision,
                new_head.x,
                new_head.y,
                state.score
            );
            state.terminal = true;
            return StepResult {
                state,
                info: StepInfo {
                    ate_food: false,
                    collision: Some(collision),
                },
            };
        }

        let ate_food = new_head == state.food;

        state.body.insert(0, new_head);
        if ate_food {
            state.score += FOOD_SCORE;
            state.food = self.place_food(&state.body, state.grid_size);
            log::debug!(
                "Ate food at ({}, {}). Score: {}",
                new_head.x,
                new_head.y,
                state.score
            );
        } else {
            state.body.pop();
        }

        state.direction = direction;

        StepResult {
            state,
            info: StepInfo {
                ate_food,
                collision: None,
            },
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &SimulationState, pos: Position) -> Option<CollisionType> {
        if state.policy == BoundaryPolicy::Wall && !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if state.is_occupied_by_snake(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Draw a uniformly random cell that is not covered by `body`.
    ///
    /// Short bodies use rejection sampling. Once the body covers half of the
    /// grid the free cells are enumerated instead so the draw stays bounded.
    /// A completely full grid has no free cell; the head is returned and the
    /// next step ends the game.
    pub fn place_food(&mut self, body: &[Position], grid_size: usize) -> Position {
        let cells = grid_size * grid_size;

        if body.len() * 2 < cells {
            loop {
                let x = self.rng.gen_range(0..grid_size) as i32;
                let y = self.rng.gen_range(0..grid_size) as i32;
                let pos = Position::new(x, y);

                if !body.contains(&pos) {
                    return pos;
                }
            }
        }

        let free: Vec<Position> = (0..grid_size as i32)
            .flat_map(|y| (0..grid_size as i32).map(move |x| Position::new(x, y)))
            .filter(|pos| !body.contains(pos))
            .collect();

        match free.choose(&mut self.rng) {
            Some(pos) => *pos,
            None => {
                log::warn!("Grid is full, no free cell for food");
                body.first().copied().unwrap_or(Position::new(0, 0))
            }
        }
    }
}
