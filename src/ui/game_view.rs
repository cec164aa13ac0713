use crate::game::{GameState, Piece, Player};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(
    frame: &mut Frame,
    game_state: &GameState,
    selected_column: usize,
    message: &Option<String>,
    game_mode: &str,
) {
    // geometry validation caps rows well below u16::MAX
    let rows = game_state.geometry().rows as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(rows + 4), // Board
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, game_state, game_mode, chunks[0]);
    render_board(frame, game_state, selected_column, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn player_color(player: Player) -> Color {
    match player {
        Player::PlayerOne => Color::Red,
        Player::PlayerTwo => Color::Yellow,
    }
}

fn render_header(
    frame: &mut Frame,
    game_state: &GameState,
    game_mode: &str,
    area: ratatui::layout::Rect,
) {
    let current_player = game_state.active_player();

    let (status, color) = match game_state.status().winner() {
        Some(winner) => (
            format!("{} won  |  {}", winner.name(), game_mode),
            player_color(winner),
        ),
        None if game_state.is_terminal() => (format!("Draw  |  {}", game_mode), Color::White),
        None => (
            format!("Current Player: {}  |  {}", current_player.name(), game_mode),
            player_color(current_player),
        ),
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

fn render_board(
    frame: &mut Frame,
    game_state: &GameState,
    selected_column: usize,
    area: ratatui::layout::Rect,
) {
    let geometry = game_state.geometry();
    let winning = game_state.winning_connection_cells();
    let border = "═".repeat(geometry.cols * 3 + 1);
    let mut lines = Vec::new();

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")]; // Padding (3 chars to match "  ║")
    for col in 0..geometry.cols {
        let label = format!("{:^3}", col + 1);
        if col == selected_column {
            col_line.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(label));
        }
    }
    col_line.push(Span::raw("  ")); // Suffix padding to match " ║"
    lines.push(Line::from(col_line));

    lines.push(Line::from(format!("  ╔{border}╗")));

    // Top row first; row 0 is the bottom of the board
    for row in (0..geometry.rows).rev() {
        let mut row_spans = vec![Span::raw("  ║")];

        for col in 0..geometry.cols {
            let (symbol, mut style) = match game_state.cell_at(row, col) {
                Ok(Piece::PlayerOne) => (" ● ", Style::default().fg(Color::Red)),
                Ok(Piece::PlayerTwo) => (" ● ", Style::default().fg(Color::Yellow)),
                Ok(Piece::Empty) | Err(_) => (" . ", Style::default().fg(Color::DarkGray)),
            };
            if winning.contains(&(row, col)) {
                style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
            }
            row_spans.push(Span::styled(symbol, style));
        }

        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("  ╚{border}╝")));

    // Selection indicator
    let mut indicator_line = vec![Span::raw("   ")];
    for col in 0..geometry.cols {
        if col == selected_column {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw("  "));
    lines.push(Line::from(indicator_line));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: ratatui::layout::Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: ratatui::layout::Rect) {
    let line = Line::from("←/→: Move  |  Enter: Drop  |  1-9: Drop in column  |  R: Restart  |  Q: Quit");

    let controls = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(state: &GameState) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| render(f, state, 2, &Some("hello".to_string()), "mode"))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn renders_header_and_message() {
        let screen = draw(&GameState::initial());
        assert!(screen.contains("Current Player: Player 1"));
        assert!(screen.contains("hello"));
    }

    #[test]
    fn renders_winner() {
        let mut state = GameState::initial();
        for col in [2, 5, 2, 5, 2, 5, 2] {
            state.apply_move(col);
        }
        let screen = draw(&state);
        assert!(screen.contains("Player 1 won"));
    }
}
