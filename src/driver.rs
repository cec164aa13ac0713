//! Turn sequencing between a human at the keyboard and the machine player.
//!
//! The driver owns the authoritative [`GameState`]. Every step reports a
//! [`GameStatus`] the presentation layer can render however it likes.

use tracing::{debug, info};

use crate::ai::{search, Outlook, SearchResult};
use crate::config::AppConfig;
use crate::error::BoardError;
use crate::game::{GameState, GameStatus, Player};

/// What happened on a machine turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MachineTurn {
    /// Column played, `None` if no move was made
    pub column: Option<usize>,
    pub status: GameStatus,
    pub outlook: Outlook,
}

pub struct Driver {
    state: GameState,
    machine: Player,
    depth: usize,
}

impl Driver {
    pub fn new(state: GameState, machine: Player, depth: usize) -> Self {
        Driver {
            state,
            machine,
            depth,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, BoardError> {
        Ok(Self::new(
            GameState::new(config.board)?,
            config.game.machine,
            config.search.depth,
        ))
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    pub fn machine(&self) -> Player {
        self.machine
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_machine_turn(&self) -> bool {
        !self.state.is_terminal() && self.state.active_player() == self.machine
    }

    /// Apply a column chosen by the human. Ignored while it is the machine's
    /// turn; illegal columns are absorbed by the game state.
    pub fn human_move(&mut self, column: usize) -> GameStatus {
        if self.state.is_terminal() || self.is_machine_turn() {
            return self.status();
        }

        let mover = self.state.active_player();
        if self.state.apply_move(column) {
            debug!(player = mover.name(), column, "human move");
            self.log_game_end();
        }
        self.status()
    }

    /// Search the current position. Pure: the owned state is only cloned.
    pub fn plan_machine_move(&self) -> SearchResult {
        search(&self.state, self.depth)
    }

    /// Play a search result for the machine. A missing or no longer legal
    /// move falls back to the lowest free column.
    pub fn commit_machine_move(&mut self, result: SearchResult) -> MachineTurn {
        let outlook = result.outlook();
        if !self.is_machine_turn() {
            return MachineTurn {
                column: None,
                status: self.status(),
                outlook,
            };
        }

        let legal = self.state.legal_moves();
        let column = result
            .best_move
            .filter(|col| legal.contains(col))
            .or_else(|| legal.first().copied());

        if let Some(col) = column {
            self.state.apply_move(col);
            debug!(
                player = self.machine.name(),
                column = col,
                score = result.score,
                "machine move"
            );
            self.log_game_end();
        }

        MachineTurn {
            column,
            status: self.status(),
            outlook,
        }
    }

    /// Search and play in one blocking step.
    pub fn machine_move(&mut self) -> MachineTurn {
        let result = self.plan_machine_move();
        self.commit_machine_move(result)
    }

    pub fn restart(&mut self) {
        self.state.reset();
        info!("game restarted");
    }

    fn log_game_end(&self) {
        match self.status() {
            GameStatus::InProgress => {}
            GameStatus::Draw => info!("game drawn"),
            status => {
                if let Some(winner) = status.winner() {
                    info!(winner = winner.name(), "game won");
                }
            }
        }
    }
}
