//! # Minimax Connect Four
//!
//! Connect Four on a configurable board against a machine opponent that picks
//! its moves with depth-limited minimax search and alpha-beta pruning.
//! Features a terminal UI built with Ratatui.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, player, game state and evaluation
//! - [`ai`] — Minimax search with alpha-beta pruning
//! - [`driver`] — Human/machine turn sequencing with explicit game status
//! - [`ui`] — Terminal UI
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod driver;
pub mod error;
pub mod game;
pub mod ui;
