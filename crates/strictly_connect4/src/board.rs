//! Fixed-size Connect-4 grid.
//!
//! Cells are stored contiguously in row-major order with row 0 at the top,
//! the same orientation used on the wire:
//!
//! ```text
//! row 0: [ 0][ 1][ 2][ 3][ 4][ 5][ 6]  <- top
//! row 1: [ 7][ 8][ 9][10][11][12][13]
//! ...
//! row 5: [35][36][37][38][39][40][41]  <- bottom
//! ```
//!
//! Pieces only ever enter through [`Board::drop_piece`], which always
//! targets the lowest empty row, so a cell is occupied only if every cell
//! below it in the same column is occupied.

use crate::{Cell, Color, GameError};
use derive_getters::Getters;
use tracing::{instrument, trace};

/// Smallest accepted dimension.
pub const MIN_DIMENSION: usize = 4;
/// Largest accepted dimension.
pub const MAX_DIMENSION: usize = 16;

/// Board dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Getters)]
pub struct BoardSize {
    /// Number of rows.
    rows: usize,
    /// Number of columns.
    columns: usize,
}

impl BoardSize {
    /// The 6-row, 7-column standard board.
    pub const STANDARD: BoardSize = BoardSize { rows: 6, columns: 7 };

    /// The 6×6 variant.
    pub const SQUARE: BoardSize = BoardSize { rows: 6, columns: 6 };

    /// Creates a board size, or `None` when either dimension is outside
    /// `MIN_DIMENSION..=MAX_DIMENSION`.
    pub fn new(rows: usize, columns: usize) -> Option<Self> {
        let range = MIN_DIMENSION..=MAX_DIMENSION;
        (range.contains(&rows) && range.contains(&columns)).then_some(Self { rows, columns })
    }

    /// Total number of cells.
    pub fn cells(&self) -> usize {
        self.rows * self.columns
    }
}

impl Default for BoardSize {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Connect-4 grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: BoardSize,
    cells: Vec<Cell>,
}

/// Axis directions as (row step, column step); the opposite direction is
/// walked by negating both.
const AXES: [(isize, isize); 4] = [
    (0, 1),  // horizontal
    (1, 0),  // vertical
    (1, 1),  // diagonal ↘
    (1, -1), // diagonal ↙
];

/// Pieces in a line needed to win.
pub const CONNECT: usize = 4;

impl Board {
    /// Creates an empty board.
    pub fn new(size: BoardSize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size.cells()],
        }
    }

    /// Returns the board dimensions.
    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.size.rows
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.size.columns
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.size.columns + col
    }

    /// Returns the cell at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row >= self.size.rows || col >= self.size.columns {
            return None;
        }
        self.cells.get(self.index(row, col)).copied()
    }

    /// True when the column's top cell is occupied.
    ///
    /// Out-of-range columns report full.
    pub fn is_column_full(&self, col: usize) -> bool {
        !matches!(self.get(0, col), Some(Cell::Empty))
    }

    /// Columns that still accept a piece, left to right.
    pub fn open_columns(&self) -> Vec<usize> {
        (0..self.size.columns)
            .filter(|&col| !self.is_column_full(col))
            .collect()
    }

    /// Drops a piece of `color` into `column` and returns the landing row.
    #[instrument(skip(self), fields(columns = self.size.columns))]
    pub fn drop_piece(&mut self, column: usize, color: Color) -> Result<usize, GameError> {
        if column >= self.size.columns {
            return Err(GameError::ColumnOutOfRange {
                column: i64::try_from(column).unwrap_or(i64::MAX),
                columns: self.size.columns,
            });
        }
        if self.is_column_full(column) {
            return Err(GameError::ColumnFull(column));
        }

        let row = (0..self.size.rows)
            .rev()
            .find(|&row| matches!(self.get(row, column), Some(Cell::Empty)))
            .ok_or(GameError::ColumnFull(column))?;

        let idx = self.index(row, column);
        self.cells[idx] = Cell::Occupied(color);
        trace!(row, column, %color, "Piece landed");
        Ok(row)
    }

    /// Checks for four in a line through the piece at `(row, col)`.
    ///
    /// Only the four axes through that cell are walked, so the cost does
    /// not depend on the board size.
    pub fn check_win(&self, row: usize, col: usize) -> Option<Color> {
        let color = self.get(row, col)?.color()?;

        AXES.iter()
            .any(|&(dr, dc)| {
                1 + self.run_length(row, col, dr, dc, color)
                    + self.run_length(row, col, -dr, -dc, color)
                    >= CONNECT
            })
            .then_some(color)
    }

    /// Counts consecutive `color` cells starting one step away from
    /// `(row, col)` along `(dr, dc)`.
    fn run_length(&self, row: usize, col: usize, dr: isize, dc: isize, color: Color) -> usize {
        let mut count = 0;
        let (mut r, mut c) = (row, col);
        loop {
            let (Some(next_r), Some(next_c)) = (r.checked_add_signed(dr), c.checked_add_signed(dc))
            else {
                break;
            };
            if self.get(next_r, next_c) != Some(Cell::Occupied(color)) {
                break;
            }
            count += 1;
            r = next_r;
            c = next_c;
        }
        count
    }

    /// True when every top-row cell is occupied; by gravity the whole
    /// board is then full.
    pub fn is_full(&self) -> bool {
        (0..self.size.columns).all(|col| self.is_column_full(col))
    }

    /// Row-major nullable grid, row 0 first.
    pub fn rows(&self) -> Vec<Vec<Option<Color>>> {
        self.cells
            .chunks(self.size.columns)
            .map(|row| row.iter().map(|cell| cell.color()).collect())
            .collect()
    }

    /// Number of pieces on the board.
    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Formats the board as a text grid with a column header.
    pub fn display(&self) -> String {
        let header: Vec<String> = (0..self.size.columns).map(|c| c.to_string()).collect();
        let mut out = format!("  {}\n", header.join(" "));
        for (r, row) in self.cells.chunks(self.size.columns).enumerate() {
            let line: Vec<String> = row
                .iter()
                .map(|cell| match cell {
                    Cell::Empty => ".".to_string(),
                    Cell::Occupied(color) => color.symbol().to_string(),
                })
                .collect();
            out.push_str(&format!("{} {}\n", r, line.join(" ")));
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BoardSize::default())
    }
}
