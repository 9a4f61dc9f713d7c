use log::{debug, info, trace, warn};

use super::{
    action::{Action, Direction},
    config::GameConfig,
    food::FoodSpawner,
    state::{CollisionType, GameState, Position, Snake},
};

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game is not running; nothing changed
    Idle,
    /// The snake advanced one cell
    Moved,
    /// The snake advanced onto the food and grew
    Ate,
    /// The move was blocked and the game is over
    Collided(CollisionType),
    /// The snake ate the last free cell and the game is over
    BoardFilled,
}

impl TickOutcome {
    /// Whether this tick ended the game
    pub fn ended_game(&self) -> bool {
        matches!(self, TickOutcome::Collided(_) | TickOutcome::BoardFilled)
    }
}

/// The game engine that owns the state and applies all game rules
pub struct GameEngine {
    config: GameConfig,
    state: GameState,
    /// Turn requested since the last tick
    pending_direction: Option<Direction>,
    food: FoodSpawner,
}

impl GameEngine {
    /// Create an engine whose food placement is seeded from the OS
    pub fn new(config: GameConfig) -> Self {
        Self::with_spawner(config, FoodSpawner::new())
    }

    /// Create an engine with a reproducible food sequence
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_spawner(config, FoodSpawner::with_seed(seed))
    }

    fn with_spawner(config: GameConfig, mut food: FoodSpawner) -> Self {
        let state = Self::initial_state(&config, &mut food);
        Self {
            config,
            state,
            pending_direction: None,
            food,
        }
    }

    fn initial_state(config: &GameConfig, spawner: &mut FoodSpawner) -> GameState {
        let snake = Snake::new(config.start_position);
        match spawner.spawn(&snake, config.grid_size) {
            Some(food) => {
                debug!("initial food at ({}, {})", food.x, food.y);
                GameState::new(snake, food, config.start_direction, config.grid_size)
            }
            None => {
                // No free cell: the food is never shown and the game cannot start
                warn!("grid of size {} has no room for food", config.grid_size);
                let mut state = GameState::new(
                    snake,
                    config.start_position,
                    config.start_direction,
                    config.grid_size,
                );
                state.over = true;
                state
            }
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Borrowed view of the current state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Owned copy of the current state
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    /// Turn requested for the next tick, if any
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    /// Begin the game. No-op if already started or over.
    pub fn start(&mut self) {
        if self.state.started || self.state.over {
            return;
        }
        self.state.started = true;
        info!("game started");
    }

    /// Request a turn, applied on the next tick.
    ///
    /// Ignored once the game is over. A request to reverse the heading the
    /// snake last moved in is dropped. Any request starts a game that has
    /// not started yet.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.state.over {
            return;
        }
        self.start();

        if self.state.direction.is_opposite(direction) {
            trace!(
                "ignoring reversal from {:?} to {:?}",
                self.state.direction, direction
            );
            return;
        }
        self.pending_direction = Some(direction);
    }

    /// Dispatch an input action
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Move(direction) => self.set_direction(direction),
            Action::Reset => self.reset(),
        }
    }

    /// Advance the game by one step
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.is_running() {
            return TickOutcome::Idle;
        }

        let direction = self.pending_direction.take().unwrap_or(self.state.direction);
        let new_head = self.state.snake.head().moved_in_direction(direction);

        if let Some(collision) = self.check_collision(new_head) {
            self.state.over = true;
            info!(
                "game over: {:?} at ({}, {}), score {}",
                collision, new_head.x, new_head.y, self.state.score
            );
            return TickOutcome::Collided(collision);
        }

        self.state.direction = direction;
        self.state.snake.push_head(new_head);

        if new_head != self.state.food {
            self.state.snake.pop_tail();
            return TickOutcome::Moved;
        }

        self.state.score += 1;
        match self.food.spawn(&self.state.snake, self.config.grid_size) {
            Some(food) => {
                debug!(
                    "food eaten, score {}, next food at ({}, {})",
                    self.state.score, food.x, food.y
                );
                self.state.food = food;
                TickOutcome::Ate
            }
            None => {
                self.state.over = true;
                info!("board filled, final score {}", self.state.score);
                TickOutcome::BoardFilled
            }
        }
    }

    /// Reinitialize every field, including a freshly placed food cell
    pub fn reset(&mut self) {
        self.state = Self::initial_state(&self.config, &mut self.food);
        self.pending_direction = None;
        info!("game reset");
    }

    fn check_collision(&self, pos: Position) -> Option<CollisionType> {
        if !self.state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        // The tail has not moved yet, so it counts as body
        if self.state.is_occupied_by_snake(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    #[cfg(test)]
    fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
