use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{GameState, Position};
use crate::metrics::GameMetrics;

/// Terminal columns used by one grid cell
const CELL_WIDTH: u16 = 2;
const OVERLAY_WIDTH: u16 = 36;

/// Draws a read-only view of the game; never mutates it
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, metrics), chunks[0]);

        let size = state.grid_size as u16;
        let board = centered(chunks[1], size * CELL_WIDTH + 2, size + 2);
        frame.render_widget(self.render_grid(state), board);

        if state.over {
            let popup = centered(board, OVERLAY_WIDTH, 7);
            frame.render_widget(Clear, popup);
            frame.render_widget(self.render_game_over(state), popup);
        } else if !state.started {
            let popup = centered(board, OVERLAY_WIDTH, 7);
            frame.render_widget(Clear, popup);
            frame.render_widget(self.render_start(), popup);
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let head = state.snake.head();
        let mut lines = Vec::with_capacity(state.grid_size);

        for y in 0..state.grid_size {
            let spans: Vec<Span> = (0..state.grid_size)
                .map(|x| {
                    let pos = Position::new(x as i32, y as i32);
                    if pos == head {
                        Span::styled(
                            "■ ",
                            Style::default()
                                .fg(Color::Green)
                                .add_modifier(Modifier::BOLD),
                        )
                    } else if state.snake.occupies(pos) {
                        Span::styled("■ ", Style::default().fg(Color::LightGreen))
                    } else if pos == state.food {
                        Span::styled(
                            "● ",
                            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                        )
                    } else {
                        Span::styled(". ", Style::default().fg(Color::DarkGray))
                    }
                })
                .collect();

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.max(state.score).to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_start(&self) -> Paragraph<'_> {
        let hint = Style::default().fg(Color::Gray);
        let text = vec![
            Line::from(Span::styled(
                "Snake Game",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled("Press an arrow key to start", hint)),
            Line::from(Span::styled("Eat the red food to grow", hint)),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
    }

    fn render_game_over(&self, state: &GameState) -> Paragraph<'_> {
        let text = vec![
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to play again", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to reset | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A `width` x `height` rect centred in `area`, clamped to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameEngine};
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(state: &GameState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 32)).unwrap();
        let renderer = Renderer::new();
        let metrics = GameMetrics::new();

        terminal
            .draw(|frame| renderer.render(frame, state, &metrics))
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_start_overlay_before_first_input() {
        let engine = GameEngine::with_seed(GameConfig::default(), 1);
        let screen = draw(engine.state());

        assert!(screen.contains("Press an arrow key to start"));
        assert!(!screen.contains("GAME OVER"));
    }

    #[test]
    fn test_running_game_has_no_overlay() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 1);
        engine.start();
        let screen = draw(engine.state());

        assert!(screen.contains("Score: 0"));
        assert!(screen.contains("■"));
        assert!(screen.contains("●"));
        assert!(!screen.contains("Press an arrow key"));
        assert!(!screen.contains("GAME OVER"));
    }

    #[test]
    fn test_game_over_overlay_shows_final_score() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 1);
        engine.start();
        let mut state = engine.snapshot();
        state.score = 4;
        state.over = true;

        let screen = draw(&state);
        assert!(screen.contains("GAME OVER"));
        assert!(screen.contains("Final Score: 4"));
    }

    #[test]
    fn test_centered_clamps_to_area() {
        let area = Rect::new(0, 0, 10, 4);
        assert_eq!(centered(area, 4, 2), Rect::new(3, 1, 4, 2));
        assert_eq!(centered(area, 40, 20), area);
    }
}
