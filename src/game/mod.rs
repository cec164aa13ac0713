//! Core Connect Four game logic: board representation, player types, and the
//! game state with terminal detection and position evaluation.

mod board;
mod player;
mod state;

pub use board::{Board, Geometry, MoveError, Piece, MAX_COLS, MAX_ROWS};
pub use player::Player;
pub use state::{GameState, GameStatus, INF, NEG_INF};
