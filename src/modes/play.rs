//! Interactive terminal play
//!
//! `PlayMode` is the only writer of the engine. Key presses, the game clock
//! and the render clock are multiplexed on one task with `tokio::select!`,
//! so a direction change is always fully applied before the next tick reads
//! it.

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{debug, info};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};

use crate::game::{Action, GameConfig, GameEngine};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Render at roughly 30 FPS
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

pub struct PlayMode {
    engine: GameEngine,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(config: GameConfig, seed: Option<u64>) -> Self {
        let engine = match seed {
            Some(seed) => GameEngine::with_seed(config, seed),
            None => GameEngine::new(config),
        };

        Self {
            engine,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;
        debug!("terminal ready");

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;
        debug!("terminal restored");

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.engine.config().tick_interval());
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut render_timer = interval(RENDER_INTERVAL);
        render_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => {
                            return Err(anyhow::Error::from(err).context("Failed to read terminal event"));
                        }
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick, only while a game is in progress
                _ = tick_timer.tick() => {
                    if self.engine.state().is_running() {
                        self.update_game();
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, self.engine.state(), &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!("quitting");
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only presses; held-key repeats and releases are dropped
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::GameAction(action) => self.apply(action),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }
    }

    fn apply(&mut self, action: Action) {
        let was_started = self.engine.state().started;
        self.engine.apply(action);

        match action {
            Action::Move(_) if !was_started && self.engine.state().started => {
                self.metrics.on_game_start();
            }
            Action::Reset => self.metrics.on_reset(),
            Action::Move(_) => {}
        }
    }

    fn update_game(&mut self) {
        let outcome = self.engine.tick();

        if outcome.ended_game() {
            debug!("recording game over after {:?}", outcome);
            self.metrics.on_game_over(self.engine.state().score);
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Position};
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    fn mode() -> PlayMode {
        PlayMode::new(GameConfig::default(), Some(5))
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        let state = mode.engine.state();
        assert!(!state.started);
        assert!(!state.over);
        assert_eq!(state.score, 0);
        assert!(!mode.metrics.is_timing());
    }

    #[test]
    fn test_first_arrow_starts_game_and_clock() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Up, KeyEventKind::Press));

        assert!(mode.engine.state().started);
        assert_eq!(mode.engine.pending_direction(), Some(Direction::Up));
        assert!(mode.metrics.is_timing());
    }

    #[test]
    fn test_key_repeat_and_release_ignored() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Up, KeyEventKind::Repeat));
        mode.handle_event(key(KeyCode::Up, KeyEventKind::Release));

        assert!(!mode.engine.state().started);
    }

    #[test]
    fn test_quit_key() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Char('q'), KeyEventKind::Press));
        assert!(mode.should_quit);
    }

    #[test]
    fn test_wall_hit_records_game_over() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Right, KeyEventKind::Press));

        // From (10,10) heading right the wall is ten moves away
        for _ in 0..20 {
            mode.update_game();
            if mode.engine.state().over {
                break;
            }
        }

        // Food may lie on the path, but eating never stops the snake
        let state = mode.engine.state();
        assert!(state.over);
        assert_eq!(state.snake.head(), Position::new(19, 10));
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(mode.metrics.games_played, 1);
        assert_eq!(mode.metrics.high_score, mode.engine.state().score);
        assert!(!mode.metrics.is_timing());
    }

    #[test]
    fn test_game_reset() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Down, KeyEventKind::Press));
        for _ in 0..3 {
            mode.update_game();
        }

        mode.handle_event(key(KeyCode::Char('r'), KeyEventKind::Press));

        let state = mode.engine.state();
        assert_eq!(state.score, 0);
        assert!(!state.started);
        assert!(!state.over);
        assert_eq!(state.snake.len(), 1);
        assert!(!mode.metrics.is_timing());
    }
}
