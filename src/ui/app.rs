use std::io;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use tracing::warn;

use crate::ai::{search, Outlook, SearchResult};
use crate::driver::{Driver, MachineTurn};
use crate::game::GameStatus;

pub struct App {
    driver: Driver,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
    pending: Option<Receiver<SearchResult>>,
}

impl App {
    pub fn new(driver: Driver) -> Self {
        let selected_column = driver.state().geometry().cols / 2; // Start in middle
        App {
            driver,
            selected_column,
            should_quit: false,
            message: None,
            pending: None,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.poll_machine();
            self.handle_events()?;
        }
        Ok(())
    }

    /// Start a search when the machine is to move, or collect a finished one.
    fn poll_machine(&mut self) {
        let Some(rx) = &self.pending else {
            if self.driver.is_machine_turn() {
                self.pending = Some(self.spawn_search());
                self.message = Some("Thinking...".to_string());
            }
            return;
        };

        match rx.try_recv() {
            Ok(result) => {
                self.pending = None;
                let turn = self.driver.commit_machine_move(result);
                self.message = Some(machine_message(&turn));
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                warn!("search worker exited without a result");
                self.pending = None;
            }
        }
    }

    /// Run the search on a clone so the render loop stays responsive.
    ///
    /// There is no cancellation: after a restart the worker still runs to
    /// completion and its result is discarded when the send fails.
    fn spawn_search(&self) -> Receiver<SearchResult> {
        let state = self.driver.state().clone();
        let depth = self.driver.depth();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            // receiver is gone if the game was restarted meanwhile
            let _ = tx.send(search(&state, depth));
        });
        rx
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        let cols = self.driver.state().geometry().cols;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                if self.selected_column > 0 {
                    self.selected_column -= 1;
                }
            }
            KeyCode::Right => {
                if self.selected_column + 1 < cols {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char(c @ '1'..='9') => {
                let col = c as usize - '1' as usize;
                if col < cols {
                    self.selected_column = col;
                    self.drop_piece();
                }
            }
            KeyCode::Char('r') => {
                self.pending = None;
                self.driver.restart();
                self.selected_column = cols / 2;
                self.message = Some("New game started!".to_string());
            }
            _ => {}
        }
    }

    /// Drop piece in selected column
    fn drop_piece(&mut self) {
        if self.driver.state().is_terminal() {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }
        if self.driver.is_machine_turn() {
            self.message = Some("Wait for the machine to move.".to_string());
            return;
        }
        if self.driver.state().board().is_column_full(self.selected_column) {
            self.message = Some("Column is full!".to_string());
            return;
        }

        let status = self.driver.human_move(self.selected_column);
        self.message = status_message(status);
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        let mode = format!(
            "You: {}  |  Machine: {} (depth {})",
            self.driver.machine().other().name(),
            self.driver.machine().name(),
            self.driver.depth()
        );
        super::game_view::render(
            frame,
            self.driver.state(),
            self.selected_column,
            &self.message,
            &mode,
        );
    }
}

fn status_message(status: GameStatus) -> Option<String> {
    match status {
        GameStatus::InProgress => None,
        GameStatus::Draw => Some("It's a draw! Press 'r' to restart.".to_string()),
        GameStatus::PlayerOneWon | GameStatus::PlayerTwoWon => status
            .winner()
            .map(|player| format!("{} wins! Press 'r' to restart.", player.name())),
    }
}

fn machine_message(turn: &MachineTurn) -> String {
    if let Some(message) = status_message(turn.status) {
        return message;
    }
    let played = match turn.column {
        Some(col) => format!("Machine played column {}", col + 1),
        None => "Machine passed".to_string(),
    };
    match turn.outlook {
        Outlook::ForcedWin(player) => format!("{played}. {} has a forced win.", player.name()),
        Outlook::Level => format!("{played}. I can't do better than a draw."),
        Outlook::Unclear => played,
    }
}
