use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};

use crate::feed::ActivePlayer;
use crate::game::{BoundaryPolicy, Phase, Position, SimulationState};
use crate::metrics::GameMetrics;
use crate::spectator::SpectatorReplica;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Interactive game: stats header, grid, controls footer.
    /// `notice` is shown on the game over panel (e.g. submission result).
    pub fn render_play(
        &self,
        frame: &mut Frame,
        state: &SimulationState,
        metrics: &GameMetrics,
        notice: Option<&str>,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(state, metrics);
        frame.render_widget(stats, chunks[0]);

        let game_area = centered(chunks[1]);

        if state.terminal {
            let game_over = self.render_game_over(state, notice);
            frame.render_widget(game_over, game_area);
        } else {
            let grid = self.render_grid(state, " Snake ");
            frame.render_widget(grid, game_area);
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    /// Spectator view: player list on the left, watched replica on the right
    pub fn render_spectate(
        &self,
        frame: &mut Frame,
        players: &[ActivePlayer],
        selected: usize,
        replica: Option<&SpectatorReplica>,
        status: &str,
    ) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(frame.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
            .split(rows[0]);

        let items: Vec<ListItem> = players
            .iter()
            .map(|p| {
                ListItem::new(Line::from(vec![
                    Span::styled(p.username.clone(), Style::default().fg(Color::White)),
                    Span::raw("  "),
                    Span::styled(p.policy.as_str(), Style::default().fg(Color::DarkGray)),
                    Span::raw("  "),
                    Span::styled(p.score.to_string(), Style::default().fg(Color::Yellow)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" Active Players ({}) ", players.len())),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut list_state = ListState::default();
        if !players.is_empty() {
            list_state.select(Some(selected.min(players.len() - 1)));
        }
        frame.render_stateful_widget(list, columns[0], &mut list_state);

        match replica {
            Some(replica) => {
                let title = format!(
                    " {} | {} | Score {} ",
                    replica.username(),
                    replica.state().policy.as_str(),
                    replica.state().score
                );
                let grid = self.render_grid(replica.state(), &title);
                frame.render_widget(grid, columns[1]);
            }
            None => {
                let placeholder = Paragraph::new("Select a player to watch their game")
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL));
                frame.render_widget(placeholder, columns[1]);
            }
        }

        let footer = Paragraph::new(vec![
            Line::from(Span::styled(status.to_string(), Style::default().fg(Color::Gray))),
            Line::from(vec![
                Span::styled("↑↓/Tab", Style::default().fg(Color::Cyan)),
                Span::raw(" select | "),
                Span::styled("Enter", Style::default().fg(Color::Cyan)),
                Span::raw(" watch | "),
                Span::styled("R", Style::default().fg(Color::Green)),
                Span::raw(" refresh | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" quit"),
            ]),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(footer, rows[1]);
    }

    fn render_grid(&self, state: &SimulationState, title: &str) -> Paragraph<'static> {
        let mut lines = Vec::new();
        let head = state.head();

        for y in 0..state.grid_size {
            let mut spans = Vec::new();

            for x in 0..state.grid_size {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == head {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.is_occupied_by_snake(pos) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if pos == state.food {
                    Span::styled(
                        "O ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        let (border_type, border_color) = match (state.policy, state.phase()) {
            (_, Phase::Paused) => (BorderType::Rounded, Color::Yellow),
            (_, Phase::Terminal) => (BorderType::Double, Color::Red),
            (BoundaryPolicy::Wall, Phase::Running) => (BorderType::Thick, Color::White),
            (BoundaryPolicy::Wrap, Phase::Running) => (BorderType::Plain, Color::DarkGray),
        };

        let title = match state.phase() {
            Phase::Paused => format!("{}[PAUSED] ", title),
            Phase::Terminal => format!("{}[GAME OVER] ", title),
            Phase::Running => title.to_string(),
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(border_type)
                    .border_style(Style::default().fg(border_color))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, state: &SimulationState, metrics: &GameMetrics) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.high_score.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Mode: ", Style::default().fg(Color::Yellow)),
            Span::styled(state.policy.as_str(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &SimulationState, notice: Option<&str>) -> Paragraph<'static> {
        let mut text = vec![
            Line::from(""),
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
        ];

        if let Some(notice) = notice {
            text.push(Line::from(""));
            text.push(Line::from(Span::styled(
                notice.to_string(),
                Style::default().fg(Color::Gray),
            )));
        }

        text.push(Line::from(""));
        text.push(Line::from(vec![
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
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Space", Style::default().fg(Color::Yellow)),
            Span::raw(" to pause | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
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

/// Center the game grid horizontally
fn centered(area: Rect) -> Rect {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(10),
            Constraint::Percentage(80),
            Constraint::Percentage(10),
        ])
        .split(area)[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameEngine};
    use ratatui::{Terminal, backend::TestBackend};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_play_view_shows_score_and_mode() {
        let mut engine = GameEngine::seeded(GameConfig::new(BoundaryPolicy::Wrap, 10), 1);
        let mut state = engine.reset();
        state.score = 40;
        let metrics = GameMetrics::new();
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();

        terminal
            .draw(|frame| Renderer::new().render_play(frame, &state, &metrics, None))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Score: 40"));
        assert!(text.contains("Pass-Through"));
    }

    #[test]
    fn test_game_over_panel_shows_notice() {
        let mut engine = GameEngine::seeded(GameConfig::small(), 1);
        let mut state = engine.reset();
        state.terminal = true;
        let metrics = GameMetrics::new();
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();

        terminal
            .draw(|frame| {
                Renderer::new().render_play(frame, &state, &metrics, Some("Score saved"))
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Score saved"));
    }
}
