//! Grid Snake - the classic snake game on a 20x20 grid
//!
//! This library provides:
//! - Core game rules (game module), free of any I/O
//! - Keyboard input mapping (input module)
//! - TUI rendering (render module)
//! - Session statistics (metrics module)
//! - The interactive terminal driver (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
