//! Core game logic module for Snake
//!
//! This module contains all the game rules without any I/O or rendering
//! dependencies. The engine is driven from outside: an input source calls
//! [`GameEngine::set_direction`] and a ticker calls [`GameEngine::tick`].

pub mod action;
pub mod config;
pub mod engine;
pub mod food;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::GameConfig;
pub use engine::{GameEngine, TickOutcome};
pub use food::FoodSpawner;
pub use state::{CollisionType, GameState, Position, Snake};
