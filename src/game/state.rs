use super::board::{Board, Geometry, MoveError, Piece};
use super::Player;
use crate::error::BoardError;

/// Score of a position PlayerOne has won.
pub const INF: i32 = i32::MAX;
/// Score of a position PlayerTwo has won.
pub const NEG_INF: i32 = i32::MIN;

/// Weight per cell of a partial run in [`GameState::heuristic_value`].
const RUN_WEIGHT: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    PlayerOneWon,
    PlayerTwoWon,
    Draw,
}

impl GameStatus {
    pub fn winner(self) -> Option<Player> {
        match self {
            GameStatus::PlayerOneWon => Some(Player::PlayerOne),
            GameStatus::PlayerTwoWon => Some(Player::PlayerTwo),
            GameStatus::InProgress | GameStatus::Draw => None,
        }
    }

    fn won_by(player: Player) -> Self {
        match player {
            Player::PlayerOne => GameStatus::PlayerOneWon,
            Player::PlayerTwo => GameStatus::PlayerTwoWon,
        }
    }
}

/// Board plus turn bookkeeping. Cloning is a full deep copy, so the search can
/// explore hypothetical futures without touching the caller's game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    status: GameStatus,
}

impl GameState {
    /// Create a fresh game on the given geometry. PlayerOne moves first.
    pub fn new(geometry: Geometry) -> Result<Self, BoardError> {
        Ok(GameState {
            board: Board::new(geometry)?,
            current_player: Player::PlayerOne,
            status: GameStatus::InProgress,
        })
    }

    /// Create initial game state on the standard 6x7 board
    pub fn initial() -> Self {
        GameState {
            board: Board::default(),
            current_player: Player::PlayerOne,
            status: GameStatus::InProgress,
        }
    }

    /// The player whose piece the next move drops. After a winning move this
    /// is still the winner.
    pub fn active_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn geometry(&self) -> Geometry {
        self.board.geometry()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Result<Piece, BoardError> {
        self.board.get(row, col)
    }

    /// Drop the active player's piece into `column`.
    ///
    /// Silently ignored when the game is over or the column is full or off
    /// the board; returns whether a piece was placed. The turn passes to the
    /// other player only if the move did not end the game.
    pub fn apply_move(&mut self, column: usize) -> bool {
        if self.is_terminal() {
            return false;
        }

        let row = match self.board.drop_piece(column, self.current_player.to_piece()) {
            Ok(row) => row,
            Err(MoveError::ColumnFull) | Err(MoveError::InvalidColumn) => return false,
        };

        if self.board.check_win(row, column) {
            self.status = GameStatus::won_by(self.current_player);
        } else if self.board.is_full() {
            self.status = GameStatus::Draw;
        } else {
            self.current_player = self.current_player.other();
        }

        true
    }

    /// Columns with a free cell, ascending. Empty only on a full board.
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..self.board.cols())
            .filter(|&col| !self.board.is_column_full(col))
            .collect()
    }

    pub fn winning_run(&self, player: Player) -> bool {
        self.board.has_connection(player.to_piece())
    }

    /// [`INF`] if PlayerOne has a connection, [`NEG_INF`] if PlayerTwo does, else 0.
    pub fn static_utility(&self) -> i32 {
        if self.winning_run(Player::PlayerOne) {
            INF
        } else if self.winning_run(Player::PlayerTwo) {
            NEG_INF
        } else {
            0
        }
    }

    /// Partial-run evaluation: every maximal run of `k` cells, for `k` below
    /// the connection length, is worth `10 * k`. PlayerOne's runs count up,
    /// PlayerTwo's down.
    pub fn heuristic_value(&self) -> i32 {
        let score = |piece: Piece| -> i32 {
            (1..self.board.connection_length())
                .map(|k| self.board.count_runs(piece, k) as i32 * RUN_WEIGHT * k as i32)
                .sum()
        };
        score(Piece::PlayerOne) - score(Piece::PlayerTwo)
    }

    /// Empty the board and hand the first move back to PlayerOne.
    pub fn reset(&mut self) {
        self.board.clear();
        self.current_player = Player::PlayerOne;
        self.status = GameStatus::InProgress;
    }

    /// Cells of the first winning line found, for highlighting. Empty if none.
    pub fn winning_connection_cells(&self) -> Vec<(usize, usize)> {
        self.board.winning_cells()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
