//! Food placement
//!
//! Food is drawn uniformly from the cells the snake does not cover. The
//! common case is rejection sampling over the whole grid; once the snake
//! covers most of the board the sampler gives up after a bounded number of
//! attempts and picks from the enumerated free cells instead.

use log::debug;
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};

use super::state::{Position, Snake};

/// Rejection attempts per grid cell before enumerating free cells
const ATTEMPTS_PER_CELL: usize = 4;

pub struct FoodSpawner {
    rng: StdRng,
}

impl FoodSpawner {
    /// Spawner seeded from the OS
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Spawner producing a reproducible sequence
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Pick a free cell on a `grid_size` square grid.
    ///
    /// Returns `None` only when the snake covers every cell.
    pub fn spawn(&mut self, snake: &Snake, grid_size: usize) -> Option<Position> {
        let cells = grid_size * grid_size;
        if snake.len() >= cells {
            return None;
        }

        for _ in 0..cells * ATTEMPTS_PER_CELL {
            let pos = Position::new(
                self.rng.gen_range(0..grid_size) as i32,
                self.rng.gen_range(0..grid_size) as i32,
            );
            if !snake.occupies(pos) {
                return Some(pos);
            }
        }

        debug!("rejection sampling exhausted, choosing among free cells");
        (0..grid_size as i32)
            .flat_map(|y| (0..grid_size as i32).map(move |x| Position::new(x, y)))
            .filter(|pos| !snake.occupies(*pos))
            .choose(&mut self.rng)
    }
}

impl Default for FoodSpawner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_avoids_snake() {
        let mut spawner = FoodSpawner::with_seed(7);
        let snake = Snake::from_cells([
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(2, 0),
        ])
        .unwrap();

        for _ in 0..500 {
            let food = spawner.spawn(&snake, 3).unwrap();
            assert!(food.is_within(3));
            assert!(!snake.occupies(food));
        }
    }

    #[test]
    fn test_single_free_cell_is_found() {
        let mut spawner = FoodSpawner::with_seed(1);
        let snake = Snake::from_cells([
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(1, 1),
        ])
        .unwrap();

        assert_eq!(spawner.spawn(&snake, 2), Some(Position::new(0, 1)));
    }

    #[test]
    fn test_full_board_has_no_food() {
        let mut spawner = FoodSpawner::with_seed(1);
        let snake = Snake::from_cells([
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(1, 1),
            Position::new(0, 1),
        ])
        .unwrap();

        assert_eq!(spawner.spawn(&snake, 2), None);
    }

    #[test]
    fn test_seeded_spawners_agree() {
        let snake = Snake::new(Position::new(10, 10));
        let mut a = FoodSpawner::with_seed(42);
        let mut b = FoodSpawner::with_seed(42);

        for _ in 0..20 {
            assert_eq!(a.spawn(&snake, 20), b.spawn(&snake, 20));
        }
    }
}
