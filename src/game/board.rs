use serde::{Deserialize, Serialize};

use crate::error::BoardError;

/// Line directions as (row step, col step): horizontal, vertical, diagonal, anti-diagonal.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Largest board the terminal view can draw; columns are picked with keys 1-9.
pub const MAX_ROWS: usize = 64;
pub const MAX_COLS: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Piece {
    Empty,
    PlayerOne,
    PlayerTwo,
}

/// Board dimensions plus the number of aligned pieces needed to win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geometry {
    pub rows: usize,
    pub cols: usize,
    pub connection_length: usize,
}

impl Geometry {
    pub fn new(rows: usize, cols: usize, connection_length: usize) -> Self {
        Geometry {
            rows,
            cols,
            connection_length,
        }
    }

    /// A geometry is playable when it has at least one cell, is no larger
    /// than [`MAX_ROWS`] x [`MAX_COLS`], and a winning line of length
    /// `connection_length` fits along some axis.
    pub fn validate(&self) -> Result<(), BoardError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(BoardError::InvalidGeometry(format!(
                "board must have at least one row and one column, got {}x{}",
                self.rows, self.cols
            )));
        }
        if self.rows > MAX_ROWS || self.cols > MAX_COLS {
            return Err(BoardError::InvalidGeometry(format!(
                "board is at most {}x{}, got {}x{}",
                MAX_ROWS, MAX_COLS, self.rows, self.cols
            )));
        }
        if self.connection_length < 2 {
            return Err(BoardError::InvalidGeometry(
                "connection_length must be >= 2".into(),
            ));
        }
        if self.connection_length > self.rows.max(self.cols) {
            return Err(BoardError::InvalidGeometry(format!(
                "connection_length {} does not fit on a {}x{} board",
                self.connection_length, self.rows, self.cols
            )));
        }
        Ok(())
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Geometry::new(6, 7, 4)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    ColumnFull,
    InvalidColumn,
}

/// Grid of pieces. Row 0 is the bottom row; dropped pieces settle on the
/// lowest free row of their column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    geometry: Geometry,
    cells: Vec<Piece>,
    heights: Vec<usize>,
}

impl Board {
    /// Create a new empty board
    pub fn new(geometry: Geometry) -> Result<Self, BoardError> {
        geometry.validate()?;
        Ok(Board {
            geometry,
            cells: vec![Piece::Empty; geometry.rows * geometry.cols],
            heights: vec![0; geometry.cols],
        })
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn rows(&self) -> usize {
        self.geometry.rows
    }

    pub fn cols(&self) -> usize {
        self.geometry.cols
    }

    pub fn connection_length(&self) -> usize {
        self.geometry.connection_length
    }

    /// Get the cell at a specific position
    pub fn get(&self, row: usize, col: usize) -> Result<Piece, BoardError> {
        if row >= self.rows() || col >= self.cols() {
            return Err(BoardError::OutOfRange {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        Ok(self.piece(row, col))
    }

    fn piece(&self, row: usize, col: usize) -> Piece {
        self.cells[row * self.cols() + col]
    }

    /// Check if a column is full. Columns outside the board count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= self.cols() {
            return true;
        }
        self.heights[col] == self.rows()
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, piece: Piece) -> Result<usize, MoveError> {
        if col >= self.cols() {
            return Err(MoveError::InvalidColumn);
        }

        if self.is_column_full(col) {
            return Err(MoveError::ColumnFull);
        }

        let row = self.heights[col];
        let cols = self.cols();
        self.cells[row * cols + col] = piece;
        self.heights[col] += 1;
        Ok(row)
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..self.cols()).all(|col| self.is_column_full(col))
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells.fill(Piece::Empty);
        self.heights.fill(0);
    }

    /// Check if the piece at (row, col) lies on a winning line
    pub fn check_win(&self, row: usize, col: usize) -> bool {
        let piece = match self.get(row, col) {
            Ok(Piece::Empty) | Err(_) => return false,
            Ok(piece) => piece,
        };

        DIRECTIONS.iter().any(|&dir| {
            let backward = self.run_length(row, col, (-dir.0, -dir.1), piece);
            let forward = self.run_length(row, col, dir, piece);
            // the placed piece is counted by both walks
            backward + forward - 1 >= self.connection_length()
        })
    }

    /// Whether `piece` has at least `connection_length` aligned cells anywhere.
    pub fn has_connection(&self, piece: Piece) -> bool {
        self.first_connection(|p| p == piece).is_some()
    }

    /// Cells of the first winning line found scanning bottom-to-top,
    /// left-to-right, in direction order. Exactly `connection_length` cells.
    pub fn winning_cells(&self) -> Vec<(usize, usize)> {
        self.first_connection(|p| p != Piece::Empty)
            .unwrap_or_default()
    }

    fn first_connection(&self, wanted: impl Fn(Piece) -> bool) -> Option<Vec<(usize, usize)>> {
        let length = self.connection_length();
        for row in 0..self.rows() {
            for col in 0..self.cols() {
                let piece = self.piece(row, col);
                if !wanted(piece) {
                    continue;
                }
                for &dir in &DIRECTIONS {
                    if self.run_length(row, col, dir, piece) >= length {
                        return Some(
                            (0..length as isize)
                                .filter_map(|n| self.step(row, col, dir, n))
                                .collect(),
                        );
                    }
                }
            }
        }
        None
    }

    /// Count maximal runs of exactly `length` cells of `piece`, over all four
    /// directions. An isolated piece is a run of length 1 in each direction.
    pub fn count_runs(&self, piece: Piece, length: usize) -> usize {
        let mut count = 0;
        for row in 0..self.rows() {
            for col in 0..self.cols() {
                if self.piece(row, col) != piece {
                    continue;
                }
                for &dir in &DIRECTIONS {
                    let starts_run = self
                        .step(row, col, dir, -1)
                        .map_or(true, |(r, c)| self.piece(r, c) != piece);
                    if starts_run && self.run_length(row, col, dir, piece) == length {
                        count += 1;
                    }
                }
            }
        }
        count
    }

    /// Number of consecutive `piece` cells starting at (row, col) and walking along `dir`.
    fn run_length(&self, row: usize, col: usize, dir: (isize, isize), piece: Piece) -> usize {
        let mut length = 0;
        while let Some((r, c)) = self.step(row, col, dir, length as isize) {
            if self.piece(r, c) != piece {
                break;
            }
            length += 1;
        }
        length
    }

    fn step(&self, row: usize, col: usize, dir: (isize, isize), n: isize) -> Option<(usize, usize)> {
        let r = row as isize + dir.0 * n;
        let c = col as isize + dir.1 * n;
        if r < 0 || c < 0 || r >= self.rows() as isize || c >= self.cols() as isize {
            return None;
        }
        Some((r as usize, c as usize))
    }
}

impl Default for Board {
    fn default() -> Self {
        let geometry = Geometry::default();
        Board {
            geometry,
            cells: vec![Piece::Empty; geometry.rows * geometry.cols],
            heights: vec![0; geometry.cols],
        }
    }
}
