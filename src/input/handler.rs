use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Action, Direction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    GameAction(Action),
    Quit,
    None,
}

impl KeyAction {
    fn turn(direction: Direction) -> Self {
        KeyAction::GameAction(direction.into())
    }
}

/// Translates terminal key presses into game input
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::turn(Direction::Up),
            KeyCode::Down => KeyAction::turn(Direction::Down),
            KeyCode::Left => KeyAction::turn(Direction::Left),
            KeyCode::Right => KeyAction::turn(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::turn(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::turn(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::turn(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::turn(Direction::Right),

            // Controls
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::GameAction(Action::Reset),

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
