use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::action::Direction;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
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

    /// Whether the position lies inside a square grid of `size` cells per side
    pub fn is_within(&self, size: usize) -> bool {
        let size = size as i32;
        (0..size).contains(&self.x) && (0..size).contains(&self.y)
    }
}

/// The snake's body, head first and tail last. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "VecDeque<Position>", into = "VecDeque<Position>")]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// A one-cell snake
    pub fn new(head: Position) -> Self {
        Self {
            body: VecDeque::from([head]),
        }
    }

    /// Build a snake from its cells, head first. Returns None when empty.
    pub fn from_cells(cells: impl IntoIterator<Item = Position>) -> Option<Self> {
        Self::try_from(cells.into_iter().collect::<VecDeque<_>>()).ok()
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Check if any segment, head and tail included, occupies the position
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Add a new head. The caller decides whether the tail follows.
    pub fn push_head(&mut self, pos: Position) {
        self.body.push_front(pos);
    }

    /// Drop the tail segment, keeping at least the head
    pub fn pop_tail(&mut self) -> Option<Position> {
        if self.body.len() > 1 {
            self.body.pop_back()
        } else {
            None
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (never true for a constructed snake)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

impl TryFrom<VecDeque<Position>> for Snake {
    type Error = &'static str;

    fn try_from(body: VecDeque<Position>) -> Result<Self, Self::Error> {
        if body.is_empty() {
            Err("snake body must have at least one cell")
        } else {
            Ok(Self { body })
        }
    }
}

impl From<Snake> for VecDeque<Position> {
    fn from(snake: Snake) -> Self {
        snake.body
    }
}

/// What ended the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionType {
    /// Snake left the grid
    Wall,
    /// Snake ran into its own body
    SelfCollision,
}

/// Complete game state, as seen by the renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    /// Heading the snake moved in on the last tick
    pub direction: Direction,
    pub score: u32,
    pub started: bool,
    pub over: bool,
    pub grid_size: usize,
}

impl GameState {
    /// Create a fresh, not yet started game
    pub fn new(snake: Snake, food: Position, direction: Direction, grid_size: usize) -> Self {
        Self {
            snake,
            food,
            direction,
            score: 0,
            started: false,
            over: false,
            grid_size,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.is_within(self.grid_size)
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }

    /// Ticks are applied only while this holds
    pub fn is_running(&self) -> bool {
        self.started && !self.over
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_in_direction(Direction::Left), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(5, 6));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn test_snake_from_cells() {
        assert!(Snake::from_cells(Vec::new()).is_none());

        let snake = Snake::from_cells([
            Position::new(3, 3),
            Position::new(2, 3),
            Position::new(1, 3),
        ])
        .unwrap();
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(3, 3));
        assert_eq!(snake.tail(), Position::new(1, 3));
    }

    #[test]
    fn test_deserializing_empty_body_fails() {
        use serde::de::value::{Error, SeqDeserializer};

        let empty = SeqDeserializer::<_, Error>::new(Vec::<u8>::new().into_iter());
        assert!(Snake::deserialize(empty).is_err());

        assert!(Snake::try_from(VecDeque::new()).is_err());
        let snake = Snake::try_from(VecDeque::from([Position::new(1, 2)])).unwrap();
        assert_eq!(snake.head(), Position::new(1, 2));
        assert_eq!(VecDeque::from(snake), VecDeque::from([Position::new(1, 2)]));
    }

    #[test]
    fn test_snake_growth_and_shrink() {
        let mut snake = Snake::new(Position::new(5, 5));
        snake.push_head(Position::new(6, 5));
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.head(), Position::new(6, 5));
        assert_eq!(snake.tail(), Position::new(5, 5));

        assert_eq!(snake.pop_tail(), Some(Position::new(5, 5)));
        assert_eq!(snake.len(), 1);

        // The head is never removed
        assert_eq!(snake.pop_tail(), None);
        assert_eq!(snake.head(), Position::new(6, 5));
    }

    #[test]
    fn test_occupancy_includes_tail() {
        let snake = Snake::from_cells([Position::new(5, 5), Position::new(4, 5)]).unwrap();
        assert!(snake.occupies(Position::new(5, 5)));
        assert!(snake.occupies(Position::new(4, 5)));
        assert!(!snake.occupies(Position::new(10, 10)));
    }

    #[test]
    fn test_bounds_checking() {
        let state = GameState::new(
            Snake::new(Position::new(5, 5)),
            Position::new(10, 10),
            Direction::Right,
            20,
        );

        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(19, 19)));
        assert!(!state.is_in_bounds(Position::new(-1, 0)));
        assert!(!state.is_in_bounds(Position::new(20, 0)));
        assert!(!state.is_in_bounds(Position::new(0, 20)));
    }

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new(
            Snake::new(Position::new(5, 5)),
            Position::new(1, 1),
            Direction::Right,
            20,
        );
        assert_eq!(state.score, 0);
        assert!(!state.started);
        assert!(!state.over);
        assert!(!state.is_running());
    }
}
