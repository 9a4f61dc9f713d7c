use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::action::Direction;
use super::state::Position;

/// Cells along each side of the square grid
pub const GRID_SIZE: usize = 20;
/// Period of the game clock
pub const TICK_INTERVAL_MS: u64 = 100;
/// Where the one-cell snake starts
pub const START_POSITION: Position = Position { x: 10, y: 10 };
pub const START_DIRECTION: Direction = Direction::Right;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width and height of the square grid
    pub grid_size: usize,
    /// Milliseconds between ticks
    pub tick_interval_ms: u64,
    /// Head position of a freshly reset snake
    pub start_position: Position,
    /// Heading of a freshly reset snake
    pub start_direction: Direction,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            tick_interval_ms: TICK_INTERVAL_MS,
            start_position: START_POSITION,
            start_direction: START_DIRECTION,
        }
    }
}

impl GameConfig {
    /// A square grid of the given size with the snake starting in its centre.
    ///
    /// # Panics
    ///
    /// Panics if `size` is below 2: the snake would leave no cell for food.
    pub fn with_grid_size(size: usize) -> Self {
        assert!(size >= 2, "grid size must be at least 2, got {size}");
        let centre = (size / 2) as i32;
        Self {
            grid_size: size,
            start_position: Position::new(centre, centre),
            ..Default::default()
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Total number of cells on the grid
    pub fn cell_count(&self) -> usize {
        self.grid_size * self.grid_size
    }
}
