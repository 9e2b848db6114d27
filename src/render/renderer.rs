use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Rectangle},
        Block, BorderType, Borders, Paragraph, Widget,
    },
};

use super::interpolate;
use crate::game::{GamePhase, Snapshot};

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &Snapshot, progress: f64) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        // Render header with score and difficulty
        let stats = self.render_stats(chunks[0], snapshot);
        frame.render_widget(stats, chunks[0]);

        // Center the board horizontally
        let board_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        // Render the board or the game over screen
        if snapshot.phase == GamePhase::GameOver {
            let game_over = self.render_game_over(board_area, snapshot);
            frame.render_widget(game_over, board_area);
        } else {
            let board = self.render_board(board_area, snapshot, progress);
            frame.render_widget(board, board_area);
        }

        // Render footer with controls
        let controls = self.render_controls(chunks[2]);
        frame.render_widget(controls, chunks[2]);
    }

    /// The board as a canvas in cell coordinates, so segments can sit
    /// between cells while a tick is still in flight
    fn render_board(&self, _area: Rect, snapshot: &Snapshot, progress: f64) -> impl Widget {
        let size = snapshot.grid_size as f64;
        let segments =
            interpolate::blend_segments(snapshot.previous_cells, snapshot.cells, progress);
        let food = snapshot.food;

        let (title, border_color) = match snapshot.phase {
            GamePhase::Ready => (" Snake - Enter to Start ", Color::White),
            GamePhase::Paused => (" Snake - Paused ", Color::Yellow),
            _ => (" Snake ", Color::White),
        };

        Canvas::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(border_color))
                    .title(title),
            )
            .marker(Marker::Braille)
            .x_bounds([0.0, size])
            .y_bounds([0.0, size])
            .paint(move |ctx| {
                // Board rows grow downward, canvas y grows upward
                for (i, &(x, y)) in segments.iter().enumerate() {
                    let color = if i == 0 { Color::Cyan } else { Color::Green };
                    ctx.draw(&Rectangle {
                        x,
                        y: size - 1.0 - y,
                        width: 1.0,
                        height: 1.0,
                        color,
                    });
                }

                if let Some(food) = food {
                    ctx.draw(&Rectangle {
                        x: food.x as f64 + 0.25,
                        y: size - 1.0 - food.y as f64 + 0.25,
                        width: 0.5,
                        height: 0.5,
                        color: Color::Red,
                    });
                }
            })
    }

    fn render_stats(&self, _area: Rect, snapshot: &Snapshot) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("High Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.high_score.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Difficulty: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.difficulty.to_string(),
                Style::default().fg(Color::White),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, _area: Rect, snapshot: &Snapshot) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("High Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.high_score.to_string(),
                    Style::default().fg(Color::White),
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
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, _area: Rect) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" move | "),
            Span::styled("Enter", Style::default().fg(Color::Green)),
            Span::raw(" start | "),
            Span::styled("Space", Style::default().fg(Color::Green)),
            Span::raw(" pause | "),
            Span::styled("1-3", Style::default().fg(Color::Magenta)),
            Span::raw(" speed | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
